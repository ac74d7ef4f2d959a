use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::quiz::definition::QuestionKind;

fn question(index: usize) -> Question {
    Question {
        id: format!("q{}", index),
        difficulty: "easy".to_owned(),
        question: format!("Question {}", index),
        explanation: "Explained".to_owned(),
        kind: QuestionKind::TrueFalse {
            correct_answer: index % 2 == 0,
        },
    }
}

fn bank_of(size: usize) -> QuestionBank {
    QuestionBank::new((1..=size).map(question).collect())
}

fn ids(questions: &[&Question]) -> Vec<String> {
    questions.iter().map(|q| q.id.clone()).collect()
}

fn temp_csv(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("quiz_bank_{}_{}.csv", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn returns_everything_in_order_without_count() {
    let bank = bank_of(10);
    let questions = bank.fetch(None).unwrap();
    let expected: Vec<String> = (1..=10).map(|i| format!("q{}", i)).collect();
    assert_eq!(ids(&questions), expected);
}

#[test]
fn returns_everything_when_count_is_not_a_number() {
    let bank = bank_of(4);
    for count in &["", "abc", "3.5", "ten", "+3", "+0"] {
        let questions = bank.fetch(Some(*count)).unwrap();
        assert_eq!(ids(&questions), vec!["q1", "q2", "q3", "q4"]);
    }
}

#[test]
fn samples_distinct_members() {
    let bank = bank_of(10);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let questions = bank.fetch_with_rng(Some("3"), &mut rng).unwrap();
        assert_eq!(questions.len(), 3);
        let unique: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(unique.len(), 3);
        for q in &questions {
            assert!(bank.get_questions().contains(*q));
        }
    }
}

#[test]
fn sample_is_capped_at_bank_size() {
    let bank = bank_of(10);
    let questions = bank.fetch(Some("1000")).unwrap();
    assert_eq!(questions.len(), 10);
    let unique: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(unique.len(), 10);

    let questions = bank.fetch(Some("99999999999999999999999")).unwrap();
    assert_eq!(questions.len(), 10);
}

#[test]
fn sample_order_varies() {
    let bank = bank_of(10);
    let mut rng = StdRng::seed_from_u64(42);
    let in_order: Vec<String> = (1..=10).map(|i| format!("q{}", i)).collect();
    let shuffled = (0..10)
        .map(|_| ids(&bank.fetch_with_rng(Some("10"), &mut rng).unwrap()))
        .any(|order| order != in_order);
    assert!(shuffled);
}

#[test]
fn rejects_non_positive_count() {
    let bank = bank_of(10);
    assert_eq!(bank.fetch(Some("0")), Err(FetchError::InvalidCount));
    assert_eq!(bank.fetch(Some("-3")), Err(FetchError::InvalidCount));
    assert_eq!(
        bank.fetch(Some("-99999999999999999999999")),
        Err(FetchError::InvalidCount)
    );
}

#[test]
fn empty_bank_has_no_questions() {
    let bank = QuestionBank::default();
    assert_eq!(bank.fetch(None), Err(FetchError::NoQuestions));
    assert_eq!(bank.fetch(Some("3")), Err(FetchError::NoQuestions));
    assert_eq!(bank.fetch(Some("0")), Err(FetchError::NoQuestions));
}

#[test]
fn load_from_missing_file_is_empty() {
    let path = std::env::temp_dir().join("quiz_bank_does_not_exist.csv");
    let bank = QuestionBank::load(&path);
    assert!(bank.is_empty());
    assert_eq!(bank.fetch(None), Err(FetchError::NoQuestions));
}

#[test]
fn load_keeps_valid_rows() {
    let path = temp_csv(
        "valid_rows",
        "id,type,difficulty,question,explanation,options,correct_answer\n\
         q1,mcq,easy,Pick,Explained,a|b,1\n\
         q2,true_false,easy,Right?,Explained,,nope\n\
         q3,write_full_code,hard,Write,Explained,,fn main() {}\n",
    );
    let bank = QuestionBank::load(&path);
    fs::remove_file(&path).ok();

    assert_eq!(bank.len(), 2);
    assert_eq!(ids(&bank.fetch(None).unwrap()), vec!["q1", "q3"]);
}

#[test]
fn load_header_only_file_is_empty() {
    let path = temp_csv(
        "header_only",
        "id,type,difficulty,question,explanation,options,correct_answer\n",
    );
    let bank = QuestionBank::load(&path);
    fs::remove_file(&path).ok();
    assert!(bank.is_empty());
}
