//! Data models for the course content catalog

use serde::{Deserialize, Serialize};

/// A trigger phrase pattern that teaches the learner to recognize a question type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub reaction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_hint: Option<String>,
}

/// A reusable rule, the unit of mastery tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_hint: Option<String>,
}

/// One of the four option keys of a multiple-choice question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];

    /// Parse a single option letter, case-insensitive
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl std::fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl QuestionOptions {
    pub fn get(&self, key: AnswerKey) -> &str {
        match key {
            AnswerKey::A => &self.a,
            AnswerKey::B => &self.b,
            AnswerKey::C => &self.c,
            AnswerKey::D => &self.d,
        }
    }
}

/// A multiple-choice test question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: QuestionOptions,
    pub correct_answer: AnswerKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_number: Option<u32>,
    /// Pattern a wrong answer should send the learner back to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_pattern: Option<String>,
}

impl Question {
    /// Pattern identifier used for mastery tracking.
    ///
    /// Falls back to the question id when the content has no explicit mapping.
    pub fn pattern_id(&self) -> &str {
        self.answer_pattern.as_deref().unwrap_or(&self.id)
    }

    pub fn is_correct(&self, choice: AnswerKey) -> bool {
        self.correct_answer == choice
    }
}

/// One lesson unit of the course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub day_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default)]
    pub patterns: Vec<Pattern>,
    #[serde(default)]
    pub questions: Vec<Question>,
}
