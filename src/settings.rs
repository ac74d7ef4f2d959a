use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Settings {
    /// CSV file holding the quiz questions.
    #[arg(short, long, env = "QUIZ_QUESTIONS", default_value = "questions.csv")]
    pub questions: PathBuf,

    /// The address to bind to.
    #[arg(short, long, env = "QUIZ_ADDRESS", default_value = "127.0.0.1:5000")]
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_flags() {
        let settings = Settings::try_parse_from(&[
            "quiz-server",
            "--questions",
            "data/quiz.csv",
            "--address",
            "0.0.0.0:8080",
        ])
        .unwrap();
        assert_eq!(settings.questions, PathBuf::from("data/quiz.csv"));
        assert_eq!(settings.address, "0.0.0.0:8080");
    }
}
