//! A single practice run

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::modes::PracticeMode;
use crate::course::{AnswerKey, Question};
use crate::progress::scoring::{is_passing, score};
use crate::progress::AnswerEvent;

/// Questions of one practice run and the answers given so far
#[derive(Debug, Clone)]
pub struct PracticeSession {
    pub id: Uuid,
    pub mode: PracticeMode,
    pub started_at: DateTime<Utc>,
    questions: Vec<Question>,
    answers: Vec<AnswerEvent>,
}

impl PracticeSession {
    pub fn new(mode: PracticeMode, questions: Vec<Question>) -> Self {
        Self::started_at(mode, questions, Utc::now())
    }

    pub fn started_at(mode: PracticeMode, questions: Vec<Question>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            started_at,
            questions,
            answers: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerEvent] {
        &self.answers
    }

    fn is_answered(&self, question_id: &str) -> bool {
        self.answers.iter().any(|a| a.question_id == question_id)
    }

    /// Next question without an answer, in session order
    pub fn current(&self) -> Option<&Question> {
        self.questions.iter().find(|q| !self.is_answered(&q.id))
    }

    /// Answer a question once.
    ///
    /// Returns whether the choice was right, or `None` if the question is not
    /// part of this session or was already answered.
    pub fn answer(&mut self, question_id: &str, choice: AnswerKey) -> Option<bool> {
        if self.is_answered(question_id) {
            return None;
        }
        let question = self.questions.iter().find(|q| q.id == question_id)?;
        let is_correct = question.is_correct(choice);

        self.answers.push(AnswerEvent::new(
            question.id.clone(),
            question.pattern_id(),
            is_correct,
        ));
        Some(is_correct)
    }

    /// Time left on the clock, `None` for untimed modes
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.mode.time_limit().map(|limit| {
            let left = limit - (now - self.started_at);
            left.max(Duration::zero())
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now).map_or(false, |left| left <= Duration::zero())
    }

    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }

    /// Close the session. Unanswered questions are left out of the score.
    pub fn finish(self) -> PracticeSummary {
        let question_days: HashMap<String, u32> = self
            .questions
            .iter()
            .filter_map(|q| q.day_number.map(|d| (q.id.clone(), d)))
            .collect();
        let unanswered = self.questions.len().saturating_sub(self.answers.len());

        let mut summary = PracticeSummary::build(self.mode, self.answers, question_days);
        summary.session_id = Some(self.id);
        summary.unanswered = unanswered;
        summary
    }
}

/// Outcome of a finished practice session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    pub mode: PracticeMode,
    pub score: u8,
    pub passed: bool,
    pub answers: Vec<AnswerEvent>,
    #[serde(default)]
    pub unanswered: usize,
    #[serde(default)]
    question_days: HashMap<String, u32>,
}

impl PracticeSummary {
    fn build(mode: PracticeMode, answers: Vec<AnswerEvent>, question_days: HashMap<String, u32>) -> Self {
        let score = score(&answers);
        Self {
            session_id: None,
            mode,
            score,
            passed: is_passing(score),
            answers,
            unanswered: 0,
            question_days,
        }
    }

    /// Summary from raw answers, each with the day its question belongs to
    pub fn from_answers(mode: PracticeMode, entries: Vec<(AnswerEvent, Option<u32>)>) -> Self {
        let question_days = entries
            .iter()
            .filter_map(|(a, day)| day.map(|d| (a.question_id.clone(), d)))
            .collect();
        let answers = entries.into_iter().map(|(a, _)| a).collect();
        Self::build(mode, answers, question_days)
    }

    /// Day the answered question belongs to, if known
    pub fn day_of(&self, question_id: &str) -> Option<u32> {
        self.question_days.get(question_id).copied()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}
