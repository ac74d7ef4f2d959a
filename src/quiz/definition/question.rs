use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::convert::TryFrom;
use thiserror::Error;

const DRAGGABLE_ITEMS: &str = "draggable_items";
const DROPPABLE_TARGETS: &str = "droppable_targets";

// Keeps empty cells as `Some("")`. Only absent columns fall back to `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// One row of the question table, before any validation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RawQuestion {
    #[serde(default, deserialize_with = "present")]
    pub id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub options: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Error)]
pub enum RowError {
    #[error("missing column(s): {}", .0.iter().join(", "))]
    MissingColumns(Vec<&'static str>),
    #[error("{question_type} question has an empty '{field}' field")]
    EmptyField {
        question_type: &'static str,
        field: &'static str,
    },
    #[error("MCQ 'correct_answer' {0:?} is not a valid integer index")]
    InvalidIndex(String),
    #[error("true/false 'correct_answer' must be 'true' or 'false', got {0:?}")]
    InvalidBoolean(String),
    #[error("drag-and-drop 'options' field malformed: expected 3 parts separated by ';', got {0}")]
    SegmentCount(usize),
    #[error("drag-and-drop '{field}' item {item:?} is missing ':'")]
    MalformedItem { field: &'static str, item: String },
    #[error("drag-and-drop '{field}' item {item:?} has an empty id or text")]
    EmptyItem { field: &'static str, item: String },
    #[error("drag-and-drop 'correctMapping' is empty")]
    EmptyMapping,
    #[error("drag-and-drop mapping {0:?} is missing ':'")]
    MalformedMapping(String),
    #[error("drag-and-drop mapping {0:?} has an empty draggable or droppable id")]
    EmptyMappingId(String),
    #[error("unknown question type {0:?}")]
    UnknownType(String),
    #[error("could not decode row: {0}")]
    Decode(#[from] csv::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    #[serde(rename_all = "camelCase")]
    Mcq {
        options: Vec<String>,
        correct_answer_index: i64,
    },
    #[serde(rename_all = "camelCase")]
    TrueFalse { correct_answer: bool },
    #[serde(rename_all = "camelCase")]
    DragDrop {
        draggable_items: Vec<Item>,
        droppable_targets: Vec<Item>,
        correct_mapping: BTreeMap<String, String>,
    },
    #[serde(rename_all = "camelCase")]
    FillInTheBlank {
        placeholder_text: String,
        correct_answer: String,
    },
    #[serde(rename_all = "camelCase")]
    TraceTheOutput {
        code_snippet: String,
        correct_output: String,
    },
    #[serde(rename_all = "camelCase")]
    WriteFullCode { correct_code_solution: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: String,
    pub difficulty: String,
    pub question: String,
    pub explanation: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

fn non_empty(
    value: Option<String>,
    question_type: &'static str,
    field: &'static str,
) -> Result<String, RowError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RowError::EmptyField {
            question_type,
            field,
        }),
    }
}

fn parse_items(segment: &str, field: &'static str) -> Result<Vec<Item>, RowError> {
    if segment.is_empty() {
        return Ok(Vec::new());
    }
    segment
        .split('|')
        .map(|item| {
            let (id, text) = item
                .split_once(':')
                .ok_or_else(|| RowError::MalformedItem {
                    field,
                    item: item.to_owned(),
                })?;
            if id.is_empty() || text.is_empty() {
                return Err(RowError::EmptyItem {
                    field,
                    item: item.to_owned(),
                });
            }
            Ok(Item {
                id: id.to_owned(),
                text: text.to_owned(),
            })
        })
        .collect()
}

// A draggable id listed twice keeps its last target.
fn parse_mapping(segment: &str) -> Result<BTreeMap<String, String>, RowError> {
    if segment.is_empty() {
        return Err(RowError::EmptyMapping);
    }
    let mut mapping = BTreeMap::new();
    for pair in segment.split('|') {
        let (draggable_id, droppable_id) = pair
            .split_once(':')
            .ok_or_else(|| RowError::MalformedMapping(pair.to_owned()))?;
        if draggable_id.is_empty() || droppable_id.is_empty() {
            return Err(RowError::EmptyMappingId(pair.to_owned()));
        }
        mapping.insert(draggable_id.to_owned(), droppable_id.to_owned());
    }
    Ok(mapping)
}

fn parse_drag_drop(options: Option<String>) -> Result<QuestionKind, RowError> {
    let options = non_empty(options, "drag_drop", "options")?;
    let parts = options.split(';').collect_vec();
    if parts.len() != 3 {
        return Err(RowError::SegmentCount(parts.len()));
    }
    Ok(QuestionKind::DragDrop {
        draggable_items: parse_items(parts[0], DRAGGABLE_ITEMS)?,
        droppable_targets: parse_items(parts[1], DROPPABLE_TARGETS)?,
        correct_mapping: parse_mapping(parts[2])?,
    })
}

fn parse_kind(
    question_type: &str,
    options: Option<String>,
    correct_answer: Option<String>,
) -> Result<QuestionKind, RowError> {
    match question_type {
        "mcq" => {
            let options = non_empty(options, "mcq", "options")?;
            let correct_answer = correct_answer.unwrap_or_default();
            let correct_answer_index = correct_answer
                .trim()
                .parse()
                .map_err(|_| RowError::InvalidIndex(correct_answer.clone()))?;
            Ok(QuestionKind::Mcq {
                options: options.split('|').map(str::to_owned).collect(),
                correct_answer_index,
            })
        }
        "true_false" => {
            let correct_answer = correct_answer.unwrap_or_default();
            match correct_answer.trim().to_lowercase().as_str() {
                "true" => Ok(QuestionKind::TrueFalse {
                    correct_answer: true,
                }),
                "false" => Ok(QuestionKind::TrueFalse {
                    correct_answer: false,
                }),
                _ => Err(RowError::InvalidBoolean(correct_answer)),
            }
        }
        "drag_drop" => parse_drag_drop(options),
        "fill_in_the_blank" => Ok(QuestionKind::FillInTheBlank {
            placeholder_text: options.unwrap_or_default(),
            correct_answer: non_empty(correct_answer, "fill_in_the_blank", "correct_answer")?,
        }),
        "trace_the_output" => Ok(QuestionKind::TraceTheOutput {
            code_snippet: non_empty(options, "trace_the_output", "options")?,
            correct_output: non_empty(correct_answer, "trace_the_output", "correct_answer")?,
        }),
        "write_full_code" => Ok(QuestionKind::WriteFullCode {
            correct_code_solution: non_empty(
                correct_answer,
                "write_full_code",
                "correct_answer",
            )?,
        }),
        other => Err(RowError::UnknownType(other.to_owned())),
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = RowError;

    fn try_from(raw_question: RawQuestion) -> Result<Self, Self::Error> {
        let RawQuestion {
            id,
            kind,
            difficulty,
            question,
            explanation,
            options,
            correct_answer,
        } = raw_question;

        let (id, kind, difficulty, question, explanation) =
            match (id, kind, difficulty, question, explanation) {
                (Some(id), Some(kind), Some(difficulty), Some(question), Some(explanation)) => {
                    (id, kind, difficulty, question, explanation)
                }
                (id, kind, difficulty, question, explanation) => {
                    let missing = [
                        ("id", id.is_none()),
                        ("type", kind.is_none()),
                        ("difficulty", difficulty.is_none()),
                        ("question", question.is_none()),
                        ("explanation", explanation.is_none()),
                    ]
                    .iter()
                    .filter(|(_name, is_missing)| *is_missing)
                    .map(|(name, _)| *name)
                    .collect();
                    return Err(RowError::MissingColumns(missing));
                }
            };

        Ok(Question {
            kind: parse_kind(&kind, options, correct_answer)?,
            id,
            difficulty,
            question,
            explanation,
        })
    }
}
