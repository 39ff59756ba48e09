use std::io;

use anyhow::{anyhow, bail, Result};

use nailexam_lib::course::{AnswerKey, CourseCatalog, Day, Pattern, Question, Signal};
use nailexam_lib::progress::scoring::is_passing;
use nailexam_lib::progress::AnswerEvent;

use super::quiz;
use crate::app::App;
use crate::render::terminal::{paint, score_label, Color};
use crate::OutputFormat;

/// Locked days can't be studied; the store itself doesn't enforce this
fn ensure_available(app: &App, day: u32) -> Result<()> {
    if day == 0 {
        bail!("Days are numbered from 1");
    }
    if !app.store.is_day_available(day) {
        bail!("Day {} is locked. Activate premium to unlock it.", day);
    }
    Ok(())
}

fn find_day(catalog: &CourseCatalog, day: u32) -> Result<Day> {
    catalog
        .day(day)
        .cloned()
        .ok_or_else(|| anyhow!("Day {} is not in the course ({} days)", day, catalog.len()))
}

fn signal_lines(signal: &Signal) -> Vec<String> {
    let mut lines = Vec::new();
    if !signal.triggers.is_empty() {
        lines.push(format!("  Triggers: {}", signal.triggers.join(", ")));
    }
    if !signal.reaction.is_empty() {
        lines.push(format!("  Reaction: {}", signal.reaction));
    }
    if let Some(trap) = &signal.trap {
        lines.push(format!("  Trap:     {}", trap));
    }
    if let Some(hint) = &signal.visual_hint {
        lines.push(format!("  Hint:     {}", hint));
    }
    lines
}

fn pattern_lines(pattern: &Pattern) -> Vec<String> {
    let mut lines = Vec::new();
    if !pattern.rule.is_empty() {
        lines.push(format!("  Rule: {}", pattern.rule));
    }
    if let Some(hint) = &pattern.visual_hint {
        lines.push(format!("  Hint: {}", hint));
    }
    lines
}

fn print_heading(day: &Day, section: &str, use_color: bool) {
    let emoji = day.emoji.as_deref().map(|e| format!("{} ", e)).unwrap_or_default();
    let heading = format!("{}Day {}: {} ({})", emoji, day.day_number, day.title, section);
    println!("{}", paint(&heading, Color::BOLD, use_color));
    if let Some(goal) = &day.goal {
        println!("{}", goal);
    }
}

pub fn run_signals(app: &mut App, day: u32, format: &OutputFormat, use_color: bool) -> Result<()> {
    ensure_available(app, day)?;
    let lesson = find_day(&app.catalog()?, day)?;

    app.store.complete_signals(day);
    app.ensure_saved()?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "dayNumber": day,
                "signals": lesson.signals,
                "phase": app.store.day_phase(day),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            print_heading(&lesson, "signals", use_color);
            for signal in &lesson.signals {
                println!();
                println!("{}", paint(&signal.title, Color::CYAN, use_color));
                for line in signal_lines(signal) {
                    println!("{}", line);
                }
            }
            println!();
            println!("Signals learned ({}%)", app.store.day_phase(day).percent());
        }
    }
    Ok(())
}

pub fn run_patterns(app: &mut App, day: u32, format: &OutputFormat, use_color: bool) -> Result<()> {
    ensure_available(app, day)?;
    let lesson = find_day(&app.catalog()?, day)?;

    app.store.complete_patterns(day);
    app.ensure_saved()?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "dayNumber": day,
                "patterns": lesson.patterns,
                "phase": app.store.day_phase(day),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            print_heading(&lesson, "patterns", use_color);
            for pattern in &lesson.patterns {
                println!();
                println!("{}", paint(&pattern.title, Color::CYAN, use_color));
                for line in pattern_lines(pattern) {
                    println!("{}", line);
                }
            }
            println!();
            println!("Patterns learned ({}%)", app.store.day_phase(day).percent());
        }
    }
    Ok(())
}

pub fn run_abc(app: &mut App, day: u32, score: f64, format: &OutputFormat) -> Result<()> {
    ensure_available(app, day)?;
    if !(0.0..=1.0).contains(&score) {
        bail!("ABC score must be between 0.0 and 1.0, got {}", score);
    }
    app.store.complete_abc(day, score);
    app.ensure_saved()?;

    let record = app.store.day(day);
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "dayNumber": day,
                "abcScore": record.abc_score,
                "abcPassed": record.abc_passed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Day {}: ABC {:.0}%{}",
                day,
                score * 100.0,
                if record.abc_passed { " (passed)" } else { "" }
            );
        }
    }
    Ok(())
}

/// Answer events for the questions picked during a quiz
fn answer_events(questions: &[Question], choices: &[(usize, AnswerKey)]) -> Vec<AnswerEvent> {
    choices
        .iter()
        .filter_map(|&(index, choice)| {
            let question = questions.get(index)?;
            Some(AnswerEvent::new(
                question.id.clone(),
                question.pattern_id(),
                question.is_correct(choice),
            ))
        })
        .collect()
}

/// Take a day's test on stdin. Only a fully answered test is recorded.
pub fn run_test(app: &mut App, day: u32, format: &OutputFormat, use_color: bool) -> Result<()> {
    ensure_available(app, day)?;
    let lesson = find_day(&app.catalog()?, day)?;
    if lesson.questions.is_empty() {
        bail!("Day {} has no test questions", day);
    }

    let run = quiz::ask(io::stdin().lock(), &lesson.questions, || false, format, use_color)?;
    if run.choices.len() < lesson.questions.len() {
        quiz::prompt(format, "Test stopped, nothing recorded.");
        return Ok(());
    }

    let answers = answer_events(&lesson.questions, &run.choices);
    let score = app.store.complete_day_test(day, &answers);
    app.ensure_saved()?;

    let passed = is_passing(score);
    let wrong: Vec<&str> = answers
        .iter()
        .filter(|a| !a.is_correct)
        .map(|a| a.question_id.as_str())
        .collect();
    let progress = app.store.progress();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "dayNumber": day,
                "score": score,
                "passed": passed,
                "wrongQuestions": wrong,
                "currentDay": progress.current_day,
                "completedDays": progress.completed_days,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!();
            println!("Day {} test: {}", day, score_label(score, passed, use_color));
            if passed {
                println!("Day {} completed. Next: day {}", day, progress.current_day);
            } else {
                println!("Below the pass mark, try again.");
            }
            if !wrong.is_empty() {
                println!("{} error(s) added to review", wrong.len());
            }
        }
    }
    Ok(())
}

pub fn run_set_day(app: &mut App, day: u32, format: &OutputFormat) -> Result<()> {
    ensure_available(app, day)?;
    let before = app.store.progress().current_day;
    app.store.set_current_day(day);
    app.ensure_saved()?;

    let current = app.store.progress().current_day;
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "currentDay": current,
                "changed": current != before,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if current == before && day != before {
                println!("Current day stays at {} (it never moves back)", current);
            } else {
                println!("Current day: {}", current);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nailexam_lib::course::QuestionOptions;

    fn question(id: &str, pattern: Option<&str>, correct: AnswerKey) -> Question {
        Question {
            id: id.to_string(),
            question: format!("{}?", id),
            options: QuestionOptions {
                a: "a".into(),
                b: "b".into(),
                c: "c".into(),
                d: "d".into(),
            },
            correct_answer: correct,
            day_number: Some(1),
            answer_pattern: pattern.map(|p| p.to_string()),
        }
    }

    #[test]
    fn test_answer_events_follow_choices() {
        let questions = vec![
            question("q1", Some("p1"), AnswerKey::A),
            question("q2", None, AnswerKey::C),
        ];

        let events = answer_events(&questions, &[(0, AnswerKey::A), (1, AnswerKey::B), (7, AnswerKey::A)]);

        assert_eq!(
            events,
            vec![
                AnswerEvent::new("q1", "p1", true),
                AnswerEvent::new("q2", "q2", false),
            ]
        );
    }

    #[test]
    fn test_signal_lines_skip_missing_parts() {
        let signal = Signal {
            id: "s1".into(),
            title: "Disinfection".into(),
            triggers: vec!["always".into(), "first".into()],
            reaction: String::new(),
            trap: Some("skipping gloves".into()),
            visual_hint: None,
        };

        assert_eq!(
            signal_lines(&signal),
            vec![
                "  Triggers: always, first".to_string(),
                "  Trap:     skipping gloves".to_string(),
            ]
        );
    }

    #[test]
    fn test_pattern_lines() {
        let pattern = Pattern {
            id: "p1".into(),
            title: "Sterilize".into(),
            rule: "Tools go in the autoclave".into(),
            visual_hint: Some("flame".into()),
        };

        assert_eq!(pattern_lines(&pattern).len(), 2);
    }
}
