use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::quiz::{FetchError, Question, QuestionBank};

mod statics;


#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
}

impl AppState {
    pub fn new(bank: QuestionBank) -> Self {
        AppState {
            bank: Arc::new(bank),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(statics::index))
        .route("/api/questions", get(get_questions))
        .nest("/static", statics::routes())
        .with_state(state)
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        let status = match self {
            FetchError::NoQuestions => StatusCode::INTERNAL_SERVER_ERROR,
            FetchError::InvalidCount => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn get_questions(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Question>>, FetchError> {
    // A repeated parameter uses its first value.
    let count = params
        .iter()
        .find(|(name, _)| name == "count")
        .map(|(_, value)| value.as_str());
    match state.bank.fetch(count) {
        Ok(questions) => {
            debug!(?count, returned = questions.len(), "Serving questions");
            Ok(Json(questions.into_iter().cloned().collect()))
        }
        Err(e) => {
            match e {
                FetchError::NoQuestions => error!("{}", e),
                FetchError::InvalidCount => warn!(?count, "{}", e),
            }
            Err(e)
        }
    }
}
