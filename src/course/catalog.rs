//! Read-only catalog of course days
//!
//! The catalog is authored as JSON, either a bare array of days or an
//! object with a `days` array.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::models::{Day, Question};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Day numbers must be unique and run from 1 to {expected}, found {found:?}")]
    InvalidDayNumbers { expected: usize, found: Vec<u32> },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Days(Vec<Day>),
    Wrapped { days: Vec<Day> },
}

/// Ordered list of days, sorted by day number
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    days: Vec<Day>,
}

impl CourseCatalog {
    /// Build a catalog, validating that day numbers are dense `1..=N`
    pub fn new(mut days: Vec<Day>) -> Result<Self> {
        days.sort_by_key(|d| d.day_number);

        let dense = days
            .iter()
            .enumerate()
            .all(|(i, d)| d.day_number as usize == i + 1);
        if !dense {
            return Err(CatalogError::InvalidDayNumbers {
                expected: days.len(),
                found: days.iter().map(|d| d.day_number).collect(),
            });
        }

        Ok(Self { days })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let days = match serde_json::from_str::<CatalogFile>(content)? {
            CatalogFile::Days(days) => days,
            CatalogFile::Wrapped { days } => days,
        };
        Self::new(days)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        log::info!("Loaded {} course days from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, day_number: u32) -> Option<&Day> {
        // Dense numbering makes the index direct
        day_number
            .checked_sub(1)
            .and_then(|i| self.days.get(i as usize))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Every question in course order, with `day_number` filled from its day
    pub fn all_questions(&self) -> Vec<Question> {
        self.days
            .iter()
            .flat_map(|day| {
                day.questions.iter().map(move |q| {
                    let mut q = q.clone();
                    if q.day_number.is_none() {
                        q.day_number = Some(day.day_number);
                    }
                    q
                })
            })
            .collect()
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.days
            .iter()
            .flat_map(|d| d.questions.iter())
            .find(|q| q.id == question_id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::course::AnswerKey;

    pub(crate) fn sample_catalog_json() -> &'static str {
        r#"{
            "days": [
                {
                    "dayNumber": 2,
                    "title": "Tools",
                    "signals": [],
                    "patterns": [{ "id": "p-tools", "title": "Tools", "rule": "Sterilize first" }],
                    "questions": [
                        {
                            "id": "q3",
                            "question": "Which tool?",
                            "options": { "A": "a", "B": "b", "C": "c", "D": "d" },
                            "correctAnswer": "C",
                            "answerPattern": "p-tools"
                        }
                    ]
                },
                {
                    "dayNumber": 1,
                    "title": "Hygiene",
                    "emoji": "🧼",
                    "signals": [
                        { "id": "s1", "title": "Disinfect", "triggers": ["소독"], "reaction": "Pick alcohol", "trap": null }
                    ],
                    "patterns": [{ "id": "p-hygiene", "title": "Hygiene", "rule": "Alcohol 70%" }],
                    "questions": [
                        {
                            "id": "q1",
                            "question": "Disinfectant?",
                            "options": { "A": "alcohol", "B": "water", "C": "oil", "D": "soap" },
                            "correctAnswer": "A",
                            "answerPattern": "p-hygiene"
                        },
                        {
                            "id": "q2",
                            "question": "Concentration?",
                            "options": { "A": "10%", "B": "30%", "C": "70%", "D": "100%" },
                            "correctAnswer": "C"
                        }
                    ]
                }
            ]
        }"#
    }

    #[test]
    fn test_load_wrapped_catalog_sorted() {
        let catalog = CourseCatalog::from_json(sample_catalog_json()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.days()[0].day_number, 1);
        assert_eq!(catalog.day(2).unwrap().title, "Tools");
        assert!(catalog.day(0).is_none());
        assert!(catalog.day(3).is_none());
    }

    #[test]
    fn test_load_bare_array() {
        let catalog = CourseCatalog::from_json(r#"[{ "dayNumber": 1, "title": "Only" }]"#).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.day(1).unwrap().questions.is_empty());
    }

    #[test]
    fn test_rejects_gaps_and_duplicates() {
        let gap = CourseCatalog::from_json(r#"[{ "dayNumber": 1 }, { "dayNumber": 3 }]"#);
        assert!(matches!(gap, Err(CatalogError::InvalidDayNumbers { .. })));

        let dup = CourseCatalog::from_json(r#"[{ "dayNumber": 1 }, { "dayNumber": 1 }]"#);
        assert!(matches!(dup, Err(CatalogError::InvalidDayNumbers { .. })));
    }

    #[test]
    fn test_all_questions_enriches_day_number() {
        let catalog = CourseCatalog::from_json(sample_catalog_json()).unwrap();
        let questions = catalog.all_questions();

        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
        assert_eq!(questions[2].day_number, Some(2));
    }

    #[test]
    fn test_pattern_id_falls_back_to_question_id() {
        let catalog = CourseCatalog::from_json(sample_catalog_json()).unwrap();

        assert_eq!(catalog.question("q1").unwrap().pattern_id(), "p-hygiene");
        assert_eq!(catalog.question("q2").unwrap().pattern_id(), "q2");
        assert!(catalog.question("q2").unwrap().is_correct(AnswerKey::C));
    }
}
