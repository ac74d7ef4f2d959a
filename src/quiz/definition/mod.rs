use anyhow::{Context, Result};
use csv::StringRecord;
use std::convert::TryFrom;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub mod question;

pub use question::{Question, QuestionKind, RawQuestion, RowError};


/// Why a row of the table was dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: usize,
    pub id: String,
    pub reason: String,
}

/// Questions parsed from a CSV table, in file order.
///
/// Rows that fail validation are logged and dropped. Only errors that
/// prevent reading the table as a whole are returned.
#[derive(Debug, Default)]
pub struct QuizDefinition {
    questions: Vec<Question>,
    rejected_rows: Vec<RejectedRow>,
}

// Short rows only name the columns they reach, so the cells they lack
// come out as missing rather than failing the whole row.
fn decode(record: &StringRecord, headers: &StringRecord) -> csv::Result<RawQuestion> {
    if record.len() < headers.len() {
        let reached: StringRecord = headers.iter().take(record.len()).collect();
        record.deserialize(Some(&reached))
    } else {
        record.deserialize(Some(headers))
    }
}

impl QuizDefinition {
    pub fn open(source: &Path) -> Result<QuizDefinition> {
        let file = File::open(source).with_context(|| format!("Could not open {:?}", source))?;
        QuizDefinition::from_reader(file)
            .with_context(|| format!("Could not read questions from {:?}", source))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<QuizDefinition> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader
            .headers()
            .context("Could not read header row")?
            .clone();
        debug!(?headers, "Read question table header");

        let mut definition = QuizDefinition::default();
        for (index, record) in csv_reader.records().enumerate() {
            // The header is line 1.
            let line = index + 2;

            let raw_question = match record.and_then(|r| decode(&r, &headers)) {
                Ok(raw_question) => raw_question,
                Err(e) => {
                    definition.reject(line, "N/A", &RowError::from(e), None);
                    continue;
                }
            };

            match Question::try_from(raw_question.clone()) {
                Ok(question) => definition.questions.push(question),
                Err(e) => {
                    let id = raw_question.id.as_deref().unwrap_or("N/A");
                    definition.reject(line, id, &e, Some(&raw_question));
                }
            }
        }

        Ok(definition)
    }

    fn reject(&mut self, line: usize, id: &str, error: &RowError, row: Option<&RawQuestion>) {
        warn!(line, id, ?row, "Skipping question: {}", error);
        self.rejected_rows.push(RejectedRow {
            line,
            id: id.to_owned(),
            reason: error.to_string(),
        });
    }

    #[cfg(test)]
    pub fn get_questions(&self) -> &[Question] {
        &self.questions
    }

    #[cfg(test)]
    pub fn rejected_rows(&self) -> &[RejectedRow] {
        &self.rejected_rows
    }

    pub fn skipped_rows(&self) -> usize {
        self.rejected_rows.len()
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}
