use std::io;

use anyhow::{bail, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use nailexam_lib::practice::{select_questions, PracticeMode, PracticeSession};
use nailexam_lib::progress::store::system_clock;

use super::quiz;
use crate::app::App;
use crate::render::terminal::score_label;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    mode: PracticeMode,
    seed: Option<u64>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let catalog = app.catalog()?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let questions = select_questions(&catalog, app.store.progress(), mode, system_clock(), &mut rng);
    if questions.is_empty() {
        bail!("The course has no questions to practice");
    }

    let mut session = PracticeSession::new(mode, questions);
    log::info!(
        "Practice session {} ({}, {} questions)",
        session.id,
        mode,
        session.questions().len()
    );

    let run = quiz::ask(
        io::stdin().lock(),
        session.questions(),
        || session.is_expired(Utc::now()),
        format,
        use_color,
    )?;
    for (index, choice) in run.choices {
        let question_id = session.questions()[index].id.clone();
        session.answer(&question_id, choice);
    }

    let summary = session.finish();
    app.store.record_practice(&summary);
    app.ensure_saved()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Plain => {
            println!();
            println!(
                "{} practice: {} ({}/{} correct)",
                mode,
                score_label(summary.score, summary.passed, use_color),
                summary.correct_count(),
                summary.answers.len()
            );
            if summary.unanswered > 0 {
                println!("{} question(s) left unanswered", summary.unanswered);
            }
        }
    }

    Ok(())
}
