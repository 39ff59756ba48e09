use std::io::{self, BufRead, Write};

use anyhow::Result;

use nailexam_lib::course::{AnswerKey, Question};

use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

/// Choices made during one pass over a question list
#[derive(Debug, Default)]
pub struct QuizRun {
    /// Question index and the option picked, in answer order
    pub choices: Vec<(usize, AnswerKey)>,
    pub timed_out: bool,
}

/// Prompts go to stderr in JSON mode so stdout stays parseable
pub fn prompt(format: &OutputFormat, text: &str) {
    match format {
        OutputFormat::Json => eprintln!("{}", text),
        OutputFormat::Plain => println!("{}", text),
    }
}

fn show_question(format: &OutputFormat, number: usize, total: usize, question: &Question) {
    prompt(format, &format!("\n[{}/{}] {}", number, total, question.question));
    for key in AnswerKey::ALL {
        prompt(format, &format!("  {}) {}", key, question.options.get(key)));
    }
}

/// Ask `questions` in order, one answer letter per input line.
///
/// Stops early on end of input, on `q`, or once `is_expired` reports the
/// time is up. An answer read after expiry is dropped.
pub fn ask<R: BufRead>(
    input: R,
    questions: &[Question],
    is_expired: impl Fn() -> bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<QuizRun> {
    let mut run = QuizRun::default();
    let mut lines = input.lines();
    let total = questions.len();

    'questions: for (index, question) in questions.iter().enumerate() {
        if is_expired() {
            run.timed_out = true;
            break;
        }
        show_question(format, index + 1, total, question);

        let choice = loop {
            if let OutputFormat::Plain = format {
                print!("> ");
                io::stdout().flush()?;
            }
            let Some(line) = lines.next() else {
                break 'questions;
            };
            let line = line?;
            if line.trim().eq_ignore_ascii_case("q") {
                break 'questions;
            }
            match AnswerKey::parse(&line) {
                Some(key) => break key,
                None => prompt(format, "Answer with A, B, C or D (q to stop)"),
            }
        };

        if is_expired() {
            run.timed_out = true;
            break;
        }

        if question.is_correct(choice) {
            prompt(format, &paint("Correct", Color::GREEN, use_color));
        } else {
            let expected = question.correct_answer;
            prompt(
                format,
                &paint(
                    &format!("Wrong, answer is {}) {}", expected, question.options.get(expected)),
                    Color::RED,
                    use_color,
                ),
            );
        }
        run.choices.push((index, choice));
    }

    if run.timed_out {
        prompt(format, "Time is up.");
    }
    Ok(run)
}
