//! Pattern mastery counters and weak-spot ranking

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::models::{ErrorRecord, WeakPattern};

/// Running outcome counters for one pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternStat {
    pub correct: u32,
    pub wrong: u32,
}

impl PatternStat {
    pub fn attempts(&self) -> u32 {
        self.correct.saturating_add(self.wrong)
    }
}

/// Correct/wrong counters keyed by pattern id. Counters only grow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternLedger(BTreeMap<String, PatternStat>);

impl PatternLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for a pattern, zeros if it was never answered
    pub fn get(&self, pattern_id: &str) -> PatternStat {
        self.0.get(pattern_id).copied().unwrap_or_default()
    }

    pub fn record_outcome(&mut self, pattern_id: &str, is_correct: bool) {
        let stat = self.0.entry(pattern_id.to_string()).or_default();
        if is_correct {
            stat.correct = stat.correct.saturating_add(1);
        } else {
            stat.wrong = stat.wrong.saturating_add(1);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rank patterns by how often they appear in the error log.
///
/// Ties keep the order in which each pattern first appeared. Correct answers
/// do not offset errors here.
pub fn weak_patterns(errors: &[ErrorRecord]) -> Vec<WeakPattern> {
    let mut ranking: Vec<WeakPattern> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for error in errors {
        match index.get(error.pattern_id.as_str()) {
            Some(&i) => ranking[i].error_count += 1,
            None => {
                index.insert(error.pattern_id.as_str(), ranking.len());
                ranking.push(WeakPattern {
                    pattern_id: error.pattern_id.clone(),
                    error_count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    ranking.sort_by(|a, b| b.error_count.cmp(&a.error_count));
    ranking
}
