//! Data models for learner progress
//!
//! Field names serialize in camelCase so persisted blobs keep the shape the
//! client has always written to local storage.

use serde::{Deserialize, Serialize};

use super::ledger::PatternLedger;
use super::scheduler::ReviewSchedule;

/// First day number of the course
pub const FIRST_DAY: u32 = 1;

/// A single answered question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvent {
    pub question_id: String,
    pub pattern_id: String,
    pub is_correct: bool,
}

impl AnswerEvent {
    pub fn new(question_id: impl Into<String>, pattern_id: impl Into<String>, is_correct: bool) -> Self {
        Self {
            question_id: question_id.into(),
            pattern_id: pattern_id.into(),
            is_correct,
        }
    }
}

/// A wrong answer reported by a test submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestError {
    pub question_id: String,
    pub pattern_id: String,
}

impl TestError {
    pub fn new(question_id: impl Into<String>, pattern_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            pattern_id: pattern_id.into(),
        }
    }
}

/// Entry of the append-only error log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub question_id: String,
    pub pattern_id: String,
    pub day_number: u32,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Per-day lesson progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProgress {
    #[serde(default)]
    pub signals_completed: bool,
    #[serde(default)]
    pub patterns_completed: bool,
    #[serde(default)]
    pub test_completed: bool,
    /// Last test score, 0-100
    #[serde(default)]
    pub test_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abc_score: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub abc_completed: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub abc_passed: bool,
}

/// Where a learner stands within one day's lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayPhase {
    NotStarted,
    SignalsDone,
    PatternsDone,
    TestDone,
}

impl DayPhase {
    pub fn of(record: &DayProgress) -> Self {
        if record.test_completed {
            Self::TestDone
        } else if record.patterns_completed {
            Self::PatternsDone
        } else if record.signals_completed {
            Self::SignalsDone
        } else {
            Self::NotStarted
        }
    }

    /// Lesson progress bar fill
    pub fn percent(&self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::SignalsDone => 33,
            Self::PatternsDone => 66,
            Self::TestDone => 100,
        }
    }
}

/// How a day is presented in the day list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayStatus {
    Completed,
    Available,
    Locked,
}

/// The learner's aggregate progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    #[serde(default = "default_current_day")]
    pub current_day: u32,
    #[serde(default)]
    pub completed_days: Vec<u32>,
    #[serde(default)]
    pub activation_code: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub last_test_score: Option<u8>,
    /// Declared by the client but never advanced
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub total_correct: u32,
    #[serde(default)]
    pub total_answered: u32,
    #[serde(default)]
    pub errors: Vec<ErrorRecord>,
    #[serde(default)]
    pub pattern_stats: PatternLedger,
    #[serde(default)]
    pub reviews: ReviewSchedule,
    /// Numeric user id of the hosting chat platform, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<i64>,
}

fn default_current_day() -> u32 {
    FIRST_DAY
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            current_day: FIRST_DAY,
            completed_days: Vec::new(),
            activation_code: None,
            is_premium: false,
            last_test_score: None,
            streak: 0,
            total_correct: 0,
            total_answered: 0,
            errors: Vec::new(),
            pattern_stats: PatternLedger::default(),
            reviews: ReviewSchedule::default(),
            external_user_id: None,
        }
    }
}

impl UserProgress {
    pub fn is_day_completed(&self, day_number: u32) -> bool {
        self.completed_days.contains(&day_number)
    }
}

/// One entry of the weak-spot ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakPattern {
    pub pattern_id: String,
    pub error_count: usize,
}
