use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{progress_bar, status_label};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let catalog = app.catalog()?;
    let current_day = app.store.progress().current_day;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = catalog
                .days()
                .iter()
                .map(|day| {
                    let n = day.day_number;
                    serde_json::json!({
                        "dayNumber": n,
                        "title": day.title,
                        "status": app.store.day_status(n),
                        "phase": app.store.day_phase(n),
                        "testScore": app.store.day(n).test_score,
                        "isCurrent": n == current_day,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if catalog.is_empty() {
                println!("No days in course.");
                return Ok(());
            }

            for day in catalog.days() {
                let n = day.day_number;
                let marker = if n == current_day { "* " } else { "  " };
                let phase = app.store.day_phase(n);
                let score = app
                    .store
                    .day(n)
                    .test_score
                    .map(|s| format!(" {}%", s))
                    .unwrap_or_default();

                println!(
                    "{}{:>2}. {} {:<8} {}{}",
                    marker,
                    n,
                    progress_bar(phase.percent(), 6),
                    status_label(app.store.day_status(n), use_color),
                    day.title,
                    score
                );
            }
        }
    }

    Ok(())
}
