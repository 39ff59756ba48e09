use anyhow::Result;

use nailexam_lib::progress::DayPhase;

use crate::app::App;
use crate::render::terminal::{paint, progress_bar, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let progress = app.store.progress();
    let current = app.store.day(progress.current_day);
    let phase = app.store.day_phase(progress.current_day);
    let total_days = app.try_catalog().map(|c| c.len());
    let due_count = app.store.due_reviews().len();

    match format {
        OutputFormat::Json => {
            let days: Vec<serde_json::Value> = app
                .store
                .day_progress()
                .iter()
                .map(|(day, record)| {
                    serde_json::json!({
                        "dayNumber": day,
                        "phase": DayPhase::of(record),
                        "testScore": record.test_score,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "currentDay": progress.current_day,
                "currentDayPhase": phase,
                "currentDayProgress": current,
                "days": days,
                "completedDays": progress.completed_days,
                "totalDays": total_days,
                "isPremium": progress.is_premium,
                "lastTestScore": progress.last_test_score,
                "streak": progress.streak,
                "totalCorrect": progress.total_correct,
                "totalAnswered": progress.total_answered,
                "errorCount": progress.errors.len(),
                "dueReviews": due_count,
                "dataDir": app.config.data_dir,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let heading = format!("Day {}", progress.current_day);
            println!("{}", paint(&heading, Color::BOLD, use_color));
            println!("  {} {}%", progress_bar(phase.percent(), 20), phase.percent());
            if let Some(score) = current.test_score {
                println!("  Last test on this day: {}%", score);
            }
            println!();

            match total_days {
                Some(total) => println!("Completed: {}/{} days", progress.completed_days.len(), total),
                None => println!("Completed: {} days", progress.completed_days.len()),
            }
            println!(
                "Access:    {}",
                if progress.is_premium { "premium" } else { "free (days 1-3)" }
            );
            println!("Streak:    {}", progress.streak);
            if progress.total_answered > 0 {
                println!(
                    "Answers:   {}/{} correct",
                    progress.total_correct, progress.total_answered
                );
            }
            println!("Errors:    {}", progress.errors.len());
            println!("Due:       {} pattern reviews", due_count);
        }
    }

    Ok(())
}
