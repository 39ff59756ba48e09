use anyhow::Result;

use nailexam_lib::progress::scheduler::{format_interval, DAY_MS};
use nailexam_lib::progress::store::system_clock;

use crate::app::App;
use crate::OutputFormat;

pub fn run_weak(app: &App, format: &OutputFormat) -> Result<()> {
    let weak = app.store.weak_patterns();
    let stats = &app.store.progress().pattern_stats;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = weak
                .iter()
                .map(|w| {
                    let stat = stats.get(&w.pattern_id);
                    serde_json::json!({
                        "patternId": w.pattern_id,
                        "errorCount": w.error_count,
                        "correct": stat.correct,
                        "wrong": stat.wrong,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if weak.is_empty() {
                println!("No errors recorded.");
                return Ok(());
            }
            for w in &weak {
                let stat = stats.get(&w.pattern_id);
                println!(
                    "{:>4}  {}  ({}/{} correct)",
                    w.error_count,
                    w.pattern_id,
                    stat.correct,
                    stat.attempts()
                );
            }
        }
    }
    Ok(())
}

pub fn run_due(app: &App, format: &OutputFormat) -> Result<()> {
    let due = app.store.due_reviews();
    let now = system_clock();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due for review.");
                return Ok(());
            }
            for record in &due {
                let overdue = (now - record.next_review) as f64 / DAY_MS as f64;
                println!(
                    "{}  interval {}  ease {:.2}  overdue {}",
                    record.pattern_id,
                    format_interval(record.interval),
                    record.ease_factor,
                    format_interval(overdue)
                );
            }
        }
    }
    Ok(())
}

pub fn run_clear_errors(app: &mut App, format: &OutputFormat) -> Result<()> {
    let cleared = app.store.progress().errors.len();
    app.store.clear_errors();
    app.ensure_saved()?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "cleared": cleared });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Cleared {} error(s)", cleared);
        }
    }
    Ok(())
}
