use axum::extract::Path;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use include_dir::{include_dir, Dir};

use super::AppState;

static STATIC_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");
const STATIC_CACHE_CONTROL: &str = "max-age=3600, must-revalidate";
const INDEX_PAGE: &str = "index.html";

pub async fn index() -> Response {
    match STATIC_DIR
        .get_file(INDEX_PAGE)
        .and_then(|file| file.contents_utf8())
    {
        Some(page) => Html(page).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn send_file(Path(path): Path<String>) -> Response {
    let file = match STATIC_DIR.get_file(&path) {
        Some(file) => file,
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    let content_type = match file.path().extension() {
        Some(ext) if ext == "html" => "text/html; charset=utf-8",
        Some(ext) if ext == "css" => "text/css",
        Some(ext) if ext == "svg" => "image/svg+xml",
        Some(ext) if ext == "js" => "text/javascript",
        Some(ext) if ext == "png" => "image/png",
        _ => "application/octet-stream",
    };

    (
        [(CONTENT_TYPE, content_type), (CACHE_CONTROL, STATIC_CACHE_CONTROL)],
        file.contents(),
    )
        .into_response()
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/*path", get(send_file))
}
