use rand::seq::SliceRandom;
use rand::Rng;
use std::convert::TryFrom;
use std::io::ErrorKind;
use std::num::IntErrorKind;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::quiz::definition::{Question, QuizDefinition};

#[cfg(test)]
mod tests;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("No questions loaded. Check server logs for specific parsing errors during startup.")]
    NoQuestions,
    #[error("Number of questions must be positive.")]
    InvalidCount,
}

/// Every question loaded at startup. Never modified afterwards.
#[derive(Debug, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        QuestionBank { questions }
    }

    /// Loads the bank from a CSV file. Failures are logged and yield an empty bank.
    pub fn load(source: &Path) -> Self {
        let definition = match QuizDefinition::open(source) {
            Ok(definition) => definition,
            Err(e) => {
                let not_found = e
                    .root_cause()
                    .downcast_ref::<std::io::Error>()
                    .map_or(false, |io| io.kind() == ErrorKind::NotFound);
                if not_found {
                    error!("Question file not found at {:?}", source);
                } else {
                    error!("Could not load questions from {:?}: {:#}", source, e);
                }
                return QuestionBank::default();
            }
        };

        let skipped_rows = definition.skipped_rows();
        let bank = QuestionBank::new(definition.into_questions());
        if bank.is_empty() {
            warn!(
                "No questions were loaded from {:?}. The file may be missing, contain only a header, or every row may have failed to parse.",
                source
            );
        } else {
            info!(
                loaded = bank.len(),
                skipped = skipped_rows,
                "Loaded questions from {:?}",
                source
            );
        }
        bank
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[cfg(test)]
    pub fn get_questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn fetch(&self, count: Option<&str>) -> Result<Vec<&Question>, FetchError> {
        self.fetch_with_rng(count, &mut rand::thread_rng())
    }

    /// Without a usable count, returns every question in file order.
    /// Otherwise returns up to `count` distinct questions in random order.
    pub fn fetch_with_rng<R: Rng + ?Sized>(
        &self,
        count: Option<&str>,
        rng: &mut R,
    ) -> Result<Vec<&Question>, FetchError> {
        if self.questions.is_empty() {
            return Err(FetchError::NoQuestions);
        }

        let mut questions: Vec<&Question> = self.questions.iter().collect();
        match parse_count(count)? {
            None => Ok(questions),
            Some(count) => {
                let amount = count.min(questions.len());
                let (sample, _rest) = questions.partial_shuffle(rng, amount);
                Ok(sample.to_vec())
            }
        }
    }
}

// Text that is not an integer means "everything". A sign is only
// meaningful when negative.
fn parse_count(count: Option<&str>) -> Result<Option<usize>, FetchError> {
    let count = match count {
        Some(count) if !count.starts_with('+') => count,
        _ => return Ok(None),
    };
    match count.parse::<i64>() {
        Ok(n) if n <= 0 => Err(FetchError::InvalidCount),
        Ok(n) => Ok(Some(usize::try_from(n).unwrap_or(usize::MAX))),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(Some(usize::MAX)),
            IntErrorKind::NegOverflow => Err(FetchError::InvalidCount),
            _ => Ok(None),
        },
    }
}
