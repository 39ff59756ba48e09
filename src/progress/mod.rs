//! Learner progress and mastery scheduling
//!
//! This module provides:
//! - Test scoring and the pass threshold
//! - Per-day lesson state and the premium unlock gate
//! - Pattern correct/wrong counters and weak-spot ranking
//! - Spaced repetition review scheduling per pattern
//! - The progress store that owns and persists all of the above

pub mod ledger;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod store;
pub mod tracker;

pub use ledger::{PatternLedger, PatternStat};
pub use models::*;
pub use scheduler::{ReviewRecord, ReviewSchedule};
pub use store::ProgressStore;
pub use tracker::DayProgressMap;
