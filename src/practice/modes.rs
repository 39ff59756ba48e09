//! Question selection for the practice trainer

use std::collections::{HashMap, HashSet};

use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::course::{CourseCatalog, Question};
use crate::progress::UserProgress;

/// Questions drawn in weak mode when the error log matches nothing
const WEAK_FALLBACK_SIZE: usize = 10;

/// Ad-hoc practice modes outside the day-by-day lessons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PracticeMode {
    /// Random questions from the whole course
    Random,
    /// Questions on patterns from the error log
    Weak,
    /// Timed mock exam
    Exam,
    /// Questions on patterns whose review is due
    Review,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 4] = [Self::Random, Self::Weak, Self::Exam, Self::Review];

    pub fn question_limit(&self) -> usize {
        match self {
            Self::Random => 20,
            Self::Weak => 20,
            Self::Exam => 60,
            Self::Review => 30,
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        match self {
            Self::Exam => Some(Duration::minutes(60)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Weak => "weak",
            Self::Exam => "exam",
            Self::Review => "review",
        }
    }
}

impl std::fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PracticeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown practice mode: {}", s))
    }
}

fn shuffled<R: Rng + ?Sized>(mut questions: Vec<Question>, limit: usize, rng: &mut R) -> Vec<Question> {
    questions.shuffle(rng);
    questions.truncate(limit);
    questions
}

/// Pick the questions for a practice session.
///
/// `now` is milliseconds since the Unix epoch and only matters for review mode.
pub fn select_questions<R: Rng + ?Sized>(
    catalog: &CourseCatalog,
    progress: &UserProgress,
    mode: PracticeMode,
    now: i64,
    rng: &mut R,
) -> Vec<Question> {
    let all = catalog.all_questions();
    let limit = mode.question_limit();

    match mode {
        PracticeMode::Random | PracticeMode::Exam => shuffled(all, limit, rng),
        PracticeMode::Weak => {
            let error_patterns: HashSet<&str> = progress
                .errors
                .iter()
                .map(|e| e.pattern_id.as_str())
                .collect();
            let matching: Vec<Question> = all
                .iter()
                .filter(|q| error_patterns.contains(q.pattern_id()))
                .cloned()
                .collect();

            if matching.is_empty() {
                shuffled(all, WEAK_FALLBACK_SIZE.min(limit), rng)
            } else {
                shuffled(matching, limit, rng)
            }
        }
        PracticeMode::Review => {
            let due_rank: HashMap<&str, usize> = progress
                .reviews
                .due(now)
                .into_iter()
                .enumerate()
                .map(|(rank, r)| (r.pattern_id.as_str(), rank))
                .collect();

            let mut due: Vec<(usize, Question)> = all
                .iter()
                .filter_map(|q| due_rank.get(q.pattern_id()).map(|&rank| (rank, q.clone())))
                .collect();

            if due.is_empty() {
                log::debug!("No reviews due, falling back to random questions");
                return shuffled(all, limit, rng);
            }

            // Most overdue patterns first, course order within a pattern
            due.sort_by_key(|(rank, _)| *rank);
            due.into_iter().map(|(_, q)| q).take(limit).collect()
        }
    }
}
