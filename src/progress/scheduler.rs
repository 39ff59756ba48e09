//! Spaced repetition scheduling for patterns
//!
//! A simplified SM-2 variant driven by a right/wrong outcome instead of a
//! 0-5 quality grade:
//! - first touch: 1 day if correct, half a day if wrong
//! - correct: 0 → 1, 1 → 6, otherwise `round(interval * ease)`; ease unchanged
//! - wrong: interval back to 1, ease drops by 0.2 down to 1.3
//!
//! Every event computes a fresh record from the previous one and swaps it in.

use serde::{Deserialize, Serialize};

/// Ease factor given to a pattern on first touch
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease penalty for a wrong answer
const EASE_PENALTY: f64 = 0.2;

/// Interval for a pattern whose first answer was wrong
const FIRST_WRONG_INTERVAL: f64 = 0.5;

/// Milliseconds in one day
pub const DAY_MS: i64 = 86_400_000;

/// Scheduling state for one pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub pattern_id: String,
    /// Milliseconds since the Unix epoch
    pub next_review: i64,
    /// Current interval in days
    pub interval: f64,
    pub ease_factor: f64,
    /// Every interval this pattern has been given, oldest first
    #[serde(default)]
    pub history: Vec<f64>,
}

impl ReviewRecord {
    pub fn is_due(&self, now: i64) -> bool {
        self.next_review <= now
    }
}

/// Compute the record that replaces `previous` after one answer
pub fn next_review(
    previous: Option<&ReviewRecord>,
    pattern_id: &str,
    is_correct: bool,
    now: i64,
) -> ReviewRecord {
    let (interval, ease_factor, mut history) = match previous {
        None => {
            let interval = if is_correct { 1.0 } else { FIRST_WRONG_INTERVAL };
            (interval, INITIAL_EASE_FACTOR, Vec::new())
        }
        Some(prev) if is_correct => {
            let interval = if prev.interval == 0.0 {
                1.0
            } else if prev.interval == 1.0 {
                6.0
            } else {
                (prev.interval * prev.ease_factor).round()
            };
            (interval, prev.ease_factor, prev.history.clone())
        }
        Some(prev) => {
            let ease_factor = (prev.ease_factor - EASE_PENALTY).max(MIN_EASE_FACTOR);
            (1.0, ease_factor, prev.history.clone())
        }
    };

    history.push(interval);

    ReviewRecord {
        pattern_id: pattern_id.to_string(),
        next_review: due_at(now, interval),
        interval,
        ease_factor,
        history,
    }
}

fn due_at(now: i64, interval_days: f64) -> i64 {
    // Float-to-int casts saturate, so huge intervals pin to the far future
    let offset = (interval_days * DAY_MS as f64).round() as i64;
    now.saturating_add(offset)
}

/// At most one live review record per pattern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewSchedule(Vec<ReviewRecord>);

impl ReviewSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pattern_id: &str) -> Option<&ReviewRecord> {
        self.0.iter().find(|r| r.pattern_id == pattern_id)
    }

    /// Reschedule a pattern after one answer and return its new record
    pub fn schedule(&mut self, pattern_id: &str, is_correct: bool, now: i64) -> &ReviewRecord {
        let record = next_review(self.get(pattern_id), pattern_id, is_correct, now);
        log::debug!(
            "Scheduled pattern {} (correct: {}): interval {}d, ease {:.2}",
            pattern_id,
            is_correct,
            record.interval,
            record.ease_factor
        );

        self.0.retain(|r| r.pattern_id != pattern_id);
        self.0.push(record);
        &self.0[self.0.len() - 1]
    }

    /// Records due at `now`, most overdue first
    pub fn due(&self, now: i64) -> Vec<&ReviewRecord> {
        let mut due: Vec<&ReviewRecord> = self.0.iter().filter(|r| r.is_due(now)).collect();
        due.sort_by_key(|r| r.next_review);
        due
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Format an interval in days to a short human-readable string
pub fn format_interval(days: f64) -> String {
    if days < 1.0 {
        let hours = (days * 24.0).round() as i64;
        return if hours <= 0 {
            "now".to_string()
        } else {
            format!("{}h", hours)
        };
    }

    let days = days.round() as i64;
    if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
