//! Per-day lesson state
//!
//! Each day moves through signals, patterns and the test. Completing a phase
//! only ever sets flags, so repeating a call never loses progress.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::models::{DayPhase, DayProgress};
use super::scoring::ABC_PASS_THRESHOLD;

/// Lesson records keyed by day number.
///
/// Records are created lazily on the first completed phase and never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayProgressMap(BTreeMap<u32, DayProgress>);

impl DayProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for a day, or an untouched default if none exists yet
    pub fn get(&self, day_number: u32) -> DayProgress {
        self.0.get(&day_number).copied().unwrap_or_default()
    }

    pub fn phase(&self, day_number: u32) -> DayPhase {
        DayPhase::of(&self.get(day_number))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &DayProgress)> {
        self.0.iter().map(|(day, record)| (*day, record))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn entry(&mut self, day_number: u32) -> &mut DayProgress {
        self.0.entry(day_number).or_default()
    }

    pub fn complete_signals(&mut self, day_number: u32) {
        self.entry(day_number).signals_completed = true;
    }

    pub fn complete_patterns(&mut self, day_number: u32) {
        self.entry(day_number).patterns_completed = true;
    }

    /// Mark the whole lesson done and store the score (clamped to 100)
    pub fn complete_test(&mut self, day_number: u32, score: u8) {
        let record = self.entry(day_number);
        record.signals_completed = true;
        record.patterns_completed = true;
        record.test_completed = true;
        record.test_score = Some(score.min(100));
    }

    /// Store the latest ABC quiz fraction; the passed flag sticks once earned
    pub fn complete_abc(&mut self, day_number: u32, score: f64) {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        let record = self.entry(day_number);
        record.abc_score = Some(score);
        record.abc_completed = true;
        record.abc_passed |= score >= ABC_PASS_THRESHOLD;
    }
}
