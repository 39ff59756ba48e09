//! Test scoring
//!
//! Scores are whole percentages. An empty answer set scores 0.

use super::models::AnswerEvent;

/// Minimum score that completes a day or counts a session as good
pub const PASS_THRESHOLD: u8 = 70;

/// Minimum ABC trainer quiz score (fraction) that counts as passed
pub const ABC_PASS_THRESHOLD: f64 = 0.7;

/// `round(100 * correct / total)`, 0 when nothing was answered
pub fn score_counts(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    ((correct as f64 * 100.0) / total as f64).round() as u8
}

/// Score an ordered sequence of answers
pub fn score(answers: &[AnswerEvent]) -> u8 {
    let correct = answers.iter().filter(|a| a.is_correct).count();
    score_counts(correct, answers.len())
}

pub fn is_passing(score: u8) -> bool {
    score >= PASS_THRESHOLD
}
