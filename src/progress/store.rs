//! Progress store: the single owner of learner state
//!
//! Constructed once at start-up and handed to every consumer. Each mutation
//! runs to completion and then rewrites both blobs:
//! ```text
//! userProgress   # UserProgress (counters, error log, pattern stats, reviews)
//! dayProgress    # DayProgressMap keyed by day number
//! ```
//! Reads that fail or do not parse fall back to defaults. A write that fails
//! is logged and kept until `take_persist_error` collects it.

use std::collections::HashSet;

use chrono::Utc;

use super::ledger::weak_patterns;
use super::models::*;
use super::scheduler::ReviewRecord;
use super::scoring::{is_passing, score, PASS_THRESHOLD};
use super::tracker::DayProgressMap;
use crate::practice::PracticeSummary;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the aggregate progress blob
pub const USER_PROGRESS_KEY: &str = "userProgress";

/// Storage key of the per-day progress blob
pub const DAY_PROGRESS_KEY: &str = "dayProgress";

/// Days that never require premium
pub const FREE_DAYS: u32 = 3;

/// Codes accepted by `activate_premium` unless configured otherwise
pub const DEFAULT_ACTIVATION_CODES: [&str; 3] = ["CBT2024", "NAILMASTER", "PREMIUM28"];

/// Wall clock in milliseconds since the Unix epoch
pub type Clock = fn() -> i64;

pub fn system_clock() -> i64 {
    Utc::now().timestamp_millis()
}

pub struct ProgressStore<S: KeyValueStore> {
    backend: S,
    progress: UserProgress,
    days: DayProgressMap,
    activation_codes: Vec<String>,
    clock: Clock,
    persist_error: Option<StorageError>,
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Load both blobs from `backend`, using defaults for anything missing or corrupt
    pub fn init(backend: S) -> Self {
        let progress = load_or_default::<UserProgress, S>(&backend, USER_PROGRESS_KEY);
        let days = load_or_default::<DayProgressMap, S>(&backend, DAY_PROGRESS_KEY);

        Self {
            backend,
            progress,
            days,
            activation_codes: DEFAULT_ACTIVATION_CODES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            clock: system_clock,
            persist_error: None,
        }
    }

    /// Replace the activation allow-list (matched case-insensitively)
    pub fn with_activation_codes(mut self, codes: Vec<String>) -> Self {
        self.activation_codes = codes
            .into_iter()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    // ===== Read accessors =====

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn day_progress(&self) -> &DayProgressMap {
        &self.days
    }

    pub fn day(&self, day_number: u32) -> DayProgress {
        self.days.get(day_number)
    }

    pub fn day_phase(&self, day_number: u32) -> DayPhase {
        self.days.phase(day_number)
    }

    /// First three days are free; everything after needs premium
    pub fn is_day_available(&self, day_number: u32) -> bool {
        day_number <= FREE_DAYS || self.progress.is_premium
    }

    pub fn day_status(&self, day_number: u32) -> DayStatus {
        if self.progress.is_day_completed(day_number) {
            DayStatus::Completed
        } else if !self.is_day_available(day_number) {
            DayStatus::Locked
        } else {
            DayStatus::Available
        }
    }

    pub fn weak_patterns(&self) -> Vec<WeakPattern> {
        weak_patterns(&self.progress.errors)
    }

    /// Reviews due now, most overdue first
    pub fn due_reviews(&self) -> Vec<&ReviewRecord> {
        self.progress.reviews.due(self.now())
    }

    // ===== Mutations =====

    /// Move the current-day pointer forward; it never moves back
    pub fn set_current_day(&mut self, day_number: u32) {
        if day_number <= self.progress.current_day {
            log::debug!(
                "Ignoring current day {} (already at {})",
                day_number,
                self.progress.current_day
            );
            return;
        }
        self.progress.current_day = day_number;
        self.persist();
    }

    pub fn complete_day(&mut self, day_number: u32) {
        self.mark_day_completed(day_number);
        self.persist();
    }

    fn mark_day_completed(&mut self, day_number: u32) {
        if !self.progress.completed_days.contains(&day_number) {
            self.progress.completed_days.push(day_number);
            log::info!("Day {} completed", day_number);
        }
        self.progress.current_day = self
            .progress
            .current_day
            .max(day_number.saturating_add(1));
    }

    pub fn complete_signals(&mut self, day_number: u32) {
        self.days.complete_signals(day_number);
        self.persist();
    }

    pub fn complete_patterns(&mut self, day_number: u32) {
        self.days.complete_patterns(day_number);
        self.persist();
    }

    /// Record the ABC trainer quiz result (fraction 0.0-1.0) for a day
    pub fn complete_abc(&mut self, day_number: u32, score: f64) {
        self.days.complete_abc(day_number, score);
        self.persist();
    }

    /// Submit a day's test.
    ///
    /// Wrong answers go to the error log, the ledger and the scheduler.
    /// `correct_pattern_ids`, when given, adds positive outcomes; without it
    /// no pattern is rescheduled as recalled. A pattern listed both as wrong
    /// and as correct in the same submission is scheduled as wrong once.
    /// A score of at least 70 completes the day.
    pub fn complete_test(
        &mut self,
        day_number: u32,
        score: u8,
        errors: &[TestError],
        correct_pattern_ids: Option<&[String]>,
    ) {
        let score = score.min(100);
        let now = self.now();
        let correct_ids = correct_pattern_ids.unwrap_or(&[]);

        self.days.complete_test(day_number, score);
        self.progress.last_test_score = Some(score);

        let mut wrong_patterns: Vec<&str> = Vec::new();
        for error in errors {
            self.progress.pattern_stats.record_outcome(&error.pattern_id, false);
            self.progress.errors.push(ErrorRecord {
                question_id: error.question_id.clone(),
                pattern_id: error.pattern_id.clone(),
                day_number,
                timestamp: now,
            });
            if !wrong_patterns.contains(&error.pattern_id.as_str()) {
                wrong_patterns.push(&error.pattern_id);
            }
        }
        for pattern_id in correct_ids {
            self.progress.pattern_stats.record_outcome(pattern_id, true);
        }

        let mut scheduled: HashSet<&str> = HashSet::new();
        for &pattern_id in &wrong_patterns {
            self.progress.reviews.schedule(pattern_id, false, now);
            scheduled.insert(pattern_id);
        }
        for pattern_id in correct_ids {
            if scheduled.insert(pattern_id.as_str()) {
                self.progress.reviews.schedule(pattern_id, true, now);
            }
        }

        self.progress.total_answered = self
            .progress
            .total_answered
            .saturating_add((errors.len() + correct_ids.len()) as u32);
        self.progress.total_correct = self
            .progress
            .total_correct
            .saturating_add(correct_ids.len() as u32);

        if is_passing(score) {
            self.mark_day_completed(day_number);
        } else {
            log::info!(
                "Day {} test scored {} (< {}), day stays open",
                day_number,
                score,
                PASS_THRESHOLD
            );
        }

        self.persist();
    }

    /// Submit a day's test from the answers given, scoring them here.
    ///
    /// Wrong answers become the error list and right answers the correct
    /// pattern ids, so every pattern answered is rescheduled. Returns the score.
    pub fn complete_day_test(&mut self, day_number: u32, answers: &[AnswerEvent]) -> u8 {
        let score = score(answers);
        let errors: Vec<TestError> = answers
            .iter()
            .filter(|a| !a.is_correct)
            .map(|a| TestError::new(a.question_id.clone(), a.pattern_id.clone()))
            .collect();
        let correct_ids: Vec<String> = answers
            .iter()
            .filter(|a| a.is_correct)
            .map(|a| a.pattern_id.clone())
            .collect();

        self.complete_test(day_number, score, &errors, Some(&correct_ids));
        score
    }

    /// Feed a finished practice session into the ledger and the scheduler.
    ///
    /// Every answer counts toward the ledger and the counters, but each
    /// pattern is rescheduled once per session: as wrong if any of its
    /// answers was wrong, as recalled otherwise. Practice never completes a day.
    pub fn record_practice(&mut self, summary: &PracticeSummary) {
        let now = self.now();
        let mut outcomes: Vec<(&str, bool)> = Vec::new();

        for answer in &summary.answers {
            self.progress
                .pattern_stats
                .record_outcome(&answer.pattern_id, answer.is_correct);

            match outcomes.iter_mut().find(|(id, _)| *id == answer.pattern_id) {
                Some((_, recalled)) => *recalled &= answer.is_correct,
                None => outcomes.push((&answer.pattern_id, answer.is_correct)),
            }

            self.progress.total_answered = self.progress.total_answered.saturating_add(1);
            if answer.is_correct {
                self.progress.total_correct = self.progress.total_correct.saturating_add(1);
            } else {
                self.progress.errors.push(ErrorRecord {
                    question_id: answer.question_id.clone(),
                    pattern_id: answer.pattern_id.clone(),
                    day_number: summary
                        .day_of(&answer.question_id)
                        .unwrap_or(self.progress.current_day),
                    timestamp: now,
                });
            }
        }

        for (pattern_id, recalled) in outcomes {
            self.progress.reviews.schedule(pattern_id, recalled, now);
        }

        self.persist();
    }

    /// Unlock premium if `code` is on the allow-list
    pub fn activate_premium(&mut self, code: &str) -> bool {
        let code = code.trim();
        let normalized = code.to_uppercase();
        let is_valid = !normalized.is_empty()
            && self.activation_codes.iter().any(|c| c.to_uppercase() == normalized);

        if is_valid {
            self.progress.activation_code = Some(code.to_string());
            self.progress.is_premium = true;
            log::info!("Premium activated");
            self.persist();
        } else {
            log::info!("Rejected activation code");
        }

        is_valid
    }

    pub fn set_external_user_id(&mut self, user_id: i64) {
        self.progress.external_user_id = Some(user_id);
        self.persist();
    }

    /// Append an entry to the error log with the current timestamp
    pub fn add_error(&mut self, question_id: &str, pattern_id: &str, day_number: u32) {
        let timestamp = self.now();
        self.progress.errors.push(ErrorRecord {
            question_id: question_id.to_string(),
            pattern_id: pattern_id.to_string(),
            day_number,
            timestamp,
        });
        self.persist();
    }

    /// Empty the error log. Pattern stats and reviews are kept.
    pub fn clear_errors(&mut self) {
        self.progress.errors.clear();
        self.persist();
    }

    // ===== Persistence =====

    /// Write both blobs, reporting failures
    pub fn save(&self) -> Result<(), StorageError> {
        let progress = serde_json::to_string_pretty(&self.progress)?;
        let days = serde_json::to_string_pretty(&self.days)?;
        self.backend.write(USER_PROGRESS_KEY, &progress)?;
        self.backend.write(DAY_PROGRESS_KEY, &days)?;
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            log::warn!("Failed to persist progress: {}", e);
            self.persist_error = Some(e);
        }
    }

    /// Most recent write-through failure, cleared by this call
    pub fn take_persist_error(&mut self) -> Option<StorageError> {
        self.persist_error.take()
    }
}

fn load_or_default<T, S>(backend: &S, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
    S: KeyValueStore,
{
    let content = match backend.read(key) {
        Ok(Some(content)) => content,
        Ok(None) => return T::default(),
        Err(e) => {
            log::warn!("Failed to read {}: {}, starting fresh", key, e);
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Corrupt {} blob ({}), starting fresh", key, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice::PracticeMode;
    use crate::progress::ledger::PatternStat;
    use crate::progress::scheduler::DAY_MS;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    const NOW: i64 = 1_700_000_000_000;

    fn fixed_clock() -> i64 {
        NOW
    }

    fn later_clock() -> i64 {
        NOW + 2 * DAY_MS
    }

    fn create_test_store() -> ProgressStore<MemoryStorage> {
        ProgressStore::init(MemoryStorage::new()).with_clock(fixed_clock)
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fresh_store_defaults() {
        let store = create_test_store();

        assert_eq!(store.progress(), &UserProgress::default());
        assert_eq!(store.progress().current_day, 1);
        assert!(store.day_progress().is_empty());
    }

    #[test]
    fn test_corrupt_blobs_fall_back_to_defaults() {
        let backend = MemoryStorage::new();
        backend.write(USER_PROGRESS_KEY, "{not json").unwrap();
        backend.write(DAY_PROGRESS_KEY, "[1, 2, 3]").unwrap();

        let store = ProgressStore::init(backend);
        assert_eq!(store.progress(), &UserProgress::default());
        assert!(store.day_progress().is_empty());
    }

    #[test]
    fn test_complete_signals_twice_is_idempotent() {
        let mut store = create_test_store();
        store.complete_signals(1);
        let first = store.day(1);

        store.complete_signals(1);
        assert_eq!(store.day(1), first);
        assert_eq!(store.day_phase(1), DayPhase::SignalsDone);
    }

    #[test]
    fn test_pass_threshold_completes_day() {
        let mut store = create_test_store();

        store.complete_test(1, 70, &[], None);
        assert!(store.progress().is_day_completed(1));
        assert_eq!(store.progress().current_day, 2);

        store.complete_test(2, 69, &[], None);
        assert!(!store.progress().is_day_completed(2));
        assert_eq!(store.progress().current_day, 2);
        assert!(store.day(2).test_completed);
        assert_eq!(store.day(2).test_score, Some(69));
        assert_eq!(store.progress().last_test_score, Some(69));
    }

    #[test]
    fn test_complete_day_is_set_like() {
        let mut store = create_test_store();
        store.complete_day(2);
        store.complete_day(2);

        assert_eq!(store.progress().completed_days, vec![2]);
        assert_eq!(store.progress().current_day, 3);
    }

    #[test]
    fn test_current_day_never_decreases() {
        let mut store = create_test_store();
        let mut seen = vec![store.progress().current_day];

        store.complete_day(5);
        seen.push(store.progress().current_day);
        store.complete_test(2, 100, &[], None);
        seen.push(store.progress().current_day);
        store.set_current_day(3);
        seen.push(store.progress().current_day);
        store.set_current_day(8);
        seen.push(store.progress().current_day);
        store.complete_test(1, 10, &[], None);
        seen.push(store.progress().current_day);

        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{:?}", seen);
        assert_eq!(store.progress().current_day, 8);
    }

    #[test]
    fn test_unlock_gate_ignores_completion() {
        let mut store = create_test_store();
        for day in 1..=3 {
            store.complete_day(day);
        }

        assert!(store.is_day_available(3));
        assert!(!store.is_day_available(4));
        assert_eq!(store.day_status(4), DayStatus::Locked);
        assert_eq!(store.day_status(2), DayStatus::Completed);

        assert!(store.activate_premium("premium28"));
        assert!(store.is_day_available(4));
        assert!(store.is_day_available(28));
        assert_eq!(store.day_status(10), DayStatus::Available);
    }

    #[test]
    fn test_activation_codes() {
        let mut store = create_test_store();

        assert!(!store.activate_premium("nope"));
        assert!(!store.activate_premium("   "));
        assert!(!store.progress().is_premium);

        assert!(store.activate_premium(" NailMaster "));
        assert!(store.progress().is_premium);
        assert_eq!(store.progress().activation_code.as_deref(), Some("NailMaster"));
    }

    #[test]
    fn test_configured_activation_codes() {
        let mut store = create_test_store().with_activation_codes(ids(&["spring-2026", " "]));

        assert!(!store.activate_premium("CBT2024"));
        assert!(store.activate_premium("Spring-2026"));
    }

    #[test]
    fn test_complete_test_feeds_ledger_log_and_scheduler() {
        let mut store = create_test_store();
        let errors = vec![
            TestError::new("q1", "p1"),
            TestError::new("q2", "p1"),
            TestError::new("q3", "p2"),
        ];

        store.complete_test(1, 50, &errors, Some(&ids(&["p3", "p2"])));

        let progress = store.progress();
        assert_eq!(progress.errors.len(), 3);
        assert!(progress.errors.iter().all(|e| e.day_number == 1 && e.timestamp == NOW));
        assert_eq!(progress.pattern_stats.get("p1"), PatternStat { correct: 0, wrong: 2 });
        assert_eq!(progress.pattern_stats.get("p2"), PatternStat { correct: 1, wrong: 1 });
        assert_eq!(progress.total_answered, 5);
        assert_eq!(progress.total_correct, 2);

        // p1 and p2 were answered wrong; p3 only right
        assert_eq!(progress.reviews.len(), 3);
        assert_eq!(progress.reviews.get("p1").unwrap().interval, 0.5);
        assert_eq!(progress.reviews.get("p2").unwrap().interval, 0.5);
        assert_eq!(progress.reviews.get("p3").unwrap().interval, 1.0);
    }

    #[test]
    fn test_complete_test_without_correct_ids_skips_positive_scheduling() {
        let mut store = create_test_store();
        store.complete_test(1, 100, &[], None);

        assert!(store.progress().reviews.is_empty());
        assert_eq!(store.progress().total_answered, 0);
    }

    #[test]
    fn test_due_reviews_follow_clock() {
        let mut store = create_test_store();
        store.complete_test(1, 0, &[TestError::new("q1", "p1")], Some(&ids(&["p2"])));
        assert!(store.due_reviews().is_empty());

        let store = store.with_clock(later_clock);
        let due: Vec<&str> = store
            .due_reviews()
            .into_iter()
            .map(|r| r.pattern_id.as_str())
            .collect();
        assert_eq!(due, vec!["p1", "p2"]);
    }

    #[test]
    fn test_weak_patterns_and_clear_errors() {
        let mut store = create_test_store();
        store.complete_test(
            1,
            40,
            &[
                TestError::new("q1", "p1"),
                TestError::new("q2", "p1"),
                TestError::new("q4", "p2"),
            ],
            None,
        );
        store.add_error("q3", "p1", 2);

        let weak = store.weak_patterns();
        assert_eq!(weak[0], WeakPattern { pattern_id: "p1".into(), error_count: 3 });
        assert_eq!(weak[1].pattern_id, "p2");

        store.clear_errors();
        assert!(store.weak_patterns().is_empty());
        assert_eq!(store.progress().pattern_stats.get("p1").wrong, 2);
    }

    #[test]
    fn test_record_practice() {
        let mut store = create_test_store();
        let summary = PracticeSummary::from_answers(PracticeMode::Random, vec![
            (AnswerEvent::new("q1", "p1", true), Some(4)),
            (AnswerEvent::new("q2", "p2", false), None),
        ]);

        store.record_practice(&summary);

        let progress = store.progress();
        assert_eq!(progress.total_answered, 2);
        assert_eq!(progress.total_correct, 1);
        assert_eq!(progress.errors.len(), 1);
        // Unknown day falls back to the current day
        assert_eq!(progress.errors[0].day_number, 1);
        assert_eq!(progress.reviews.get("p1").unwrap().interval, 1.0);
        assert!(progress.completed_days.is_empty());
    }

    #[test]
    fn test_record_practice_schedules_repeated_pattern_once() {
        let mut store = create_test_store();
        let summary = PracticeSummary::from_answers(
            PracticeMode::Weak,
            (1..=4)
                .map(|i| (AnswerEvent::new(format!("d{}-q2", i), "p2", true), Some(i)))
                .collect(),
        );

        store.record_practice(&summary);

        let progress = store.progress();
        let record = progress.reviews.get("p2").unwrap();
        assert_eq!(record.interval, 1.0);
        assert_eq!(record.history, vec![1.0]);
        assert_eq!(progress.pattern_stats.get("p2"), PatternStat { correct: 4, wrong: 0 });
        assert_eq!(progress.total_answered, 4);
    }

    #[test]
    fn test_record_practice_mixed_answers_schedule_as_wrong() {
        let mut store = create_test_store();
        store.complete_test(1, 100, &[], Some(&ids(&["p1"])));
        let summary = PracticeSummary::from_answers(PracticeMode::Exam, vec![
            (AnswerEvent::new("q1", "p1", true), Some(1)),
            (AnswerEvent::new("q2", "p1", false), Some(2)),
            (AnswerEvent::new("q3", "p1", true), Some(3)),
        ]);

        store.record_practice(&summary);

        let progress = store.progress();
        let record = progress.reviews.get("p1").unwrap();
        assert_eq!(record.interval, 1.0);
        assert!((record.ease_factor - 2.3).abs() < 1e-9);
        assert_eq!(record.history, vec![1.0, 1.0]);
        assert_eq!(progress.pattern_stats.get("p1"), PatternStat { correct: 3, wrong: 1 });
        assert_eq!(progress.errors.len(), 1);
        assert_eq!(progress.errors[0].day_number, 2);
    }

    #[test]
    fn test_complete_test_repeated_pattern_schedules_once() {
        let mut store = create_test_store();
        store.complete_test(
            1,
            20,
            &[TestError::new("q1", "p1"), TestError::new("q2", "p1")],
            Some(&ids(&["p1", "p2", "p2"])),
        );

        let reviews = &store.progress().reviews;
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews.get("p1").unwrap().history, vec![0.5]);
        assert_eq!(reviews.get("p2").unwrap().history, vec![1.0]);
    }

    #[test]
    fn test_complete_day_test_scores_answers() {
        let mut store = create_test_store();
        let answers = vec![
            AnswerEvent::new("q1", "p1", true),
            AnswerEvent::new("q2", "p2", true),
            AnswerEvent::new("q3", "p3", false),
        ];

        let score = store.complete_day_test(2, &answers);

        assert_eq!(score, 67);
        assert_eq!(store.day(2).test_score, Some(67));
        assert!(!store.progress().is_day_completed(2));
        assert_eq!(store.progress().errors.len(), 1);
        assert_eq!(store.progress().errors[0].pattern_id, "p3");
        assert_eq!(store.progress().reviews.get("p3").unwrap().interval, 0.5);
        assert_eq!(store.progress().reviews.get("p1").unwrap().interval, 1.0);
        assert_eq!(store.progress().total_answered, 3);
        assert_eq!(store.progress().total_correct, 2);

        let all_right: Vec<AnswerEvent> = answers
            .iter()
            .map(|a| AnswerEvent::new(a.question_id.clone(), a.pattern_id.clone(), true))
            .collect();
        assert_eq!(store.complete_day_test(2, &all_right), 100);
        assert!(store.progress().is_day_completed(2));
        assert_eq!(store.progress().current_day, 3);
    }

    #[test]
    fn test_complete_day_test_empty_answers_score_zero() {
        let mut store = create_test_store();
        assert_eq!(store.complete_day_test(1, &[]), 0);
        assert!(!store.progress().is_day_completed(1));
    }

    #[test]
    fn test_failed_write_is_reported_once() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let mut store = ProgressStore::init(FileStorage::new(blocker)).with_clock(fixed_clock);

        store.complete_signals(1);

        assert!(store.take_persist_error().is_some());
        assert!(store.take_persist_error().is_none());
        assert!(store.day(1).signals_completed);
    }

    #[test]
    fn test_abc_results_do_not_complete_day() {
        let mut store = create_test_store();
        store.complete_abc(1, 0.9);

        assert!(store.day(1).abc_passed);
        assert!(!store.progress().is_day_completed(1));
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileStorage::new(temp_dir.path().to_path_buf());

        {
            let mut store = ProgressStore::init(&backend).with_clock(fixed_clock);
            store.complete_signals(1);
            store.complete_patterns(1);
            store.complete_test(
                1,
                90,
                &[TestError::new("q1", "p1")],
                Some(&ids(&["p2"])),
            );
            store.activate_premium("CBT2024");
            store.set_external_user_id(42);
        }

        let reloaded = ProgressStore::init(&backend);
        assert!(reloaded.progress().is_premium);
        assert_eq!(reloaded.progress().external_user_id, Some(42));
        assert_eq!(reloaded.progress().completed_days, vec![1]);
        assert_eq!(reloaded.day(1).test_score, Some(90));
        assert_eq!(reloaded.progress().reviews.len(), 2);
    }

    #[test]
    fn test_user_progress_round_trip() {
        let mut store = create_test_store();
        store.complete_test(
            3,
            75,
            &[TestError::new("q9", "p9")],
            Some(&ids(&["p1"])),
        );
        store.activate_premium("CBT2024");

        let json = serde_json::to_string(store.progress()).unwrap();
        let back: UserProgress = serde_json::from_str(&json).unwrap();

        assert_eq!(&back, store.progress());
        assert!(!back.errors.is_empty());
        assert!(!back.pattern_stats.is_empty());
        assert!(!back.reviews.is_empty());
    }
}
