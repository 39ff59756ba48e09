mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nailexam_lib::practice::PracticeMode;

#[derive(Parser)]
#[command(name = "nailexam-cli", about = "28-day nail exam course progress CLI", version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding progress data
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Course catalog JSON
    #[arg(long, global = true)]
    course: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Overall progress summary
    Status,

    /// List course days with their status
    Days,

    /// Show a day's signals and mark them as learned
    Signals {
        day: u32,
    },

    /// Show a day's patterns and mark them as learned
    Patterns {
        day: u32,
    },

    /// Take a day's test, reading one answer letter per line from stdin
    Test {
        day: u32,
    },

    /// Record an ABC trainer quiz score (0.0-1.0)
    Abc {
        day: u32,
        score: f64,
    },

    /// Unlock premium days with an activation code
    Activate {
        code: String,
    },

    /// Move the current day forward
    SetDay {
        day: u32,
    },

    /// Patterns ranked by error count
    Weak,

    /// Pattern reviews that are due now
    Due,

    /// Empty the error log
    ClearErrors,

    /// Run a practice session, reading one answer letter per line from stdin
    Practice {
        /// random, weak, exam or review
        mode: PracticeMode,
        /// Seed for question shuffling
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();

    let options = app::AppOptions {
        config: cli.config,
        data_dir: cli.data_dir,
        course: cli.course,
    };
    let mut app = app::App::new(options)?;

    match cli.command {
        Command::Status => {
            commands::status::run(&app, &cli.format, use_color)?;
        }
        Command::Days => {
            commands::days::run(&app, &cli.format, use_color)?;
        }
        Command::Signals { day } => {
            commands::lesson::run_signals(&mut app, day, &cli.format, use_color)?;
        }
        Command::Patterns { day } => {
            commands::lesson::run_patterns(&mut app, day, &cli.format, use_color)?;
        }
        Command::Test { day } => {
            commands::lesson::run_test(&mut app, day, &cli.format, use_color)?;
        }
        Command::Abc { day, score } => {
            commands::lesson::run_abc(&mut app, day, score, &cli.format)?;
        }
        Command::Activate { code } => {
            commands::activate::run(&mut app, &code, &cli.format, use_color)?;
        }
        Command::SetDay { day } => {
            commands::lesson::run_set_day(&mut app, day, &cli.format)?;
        }
        Command::Weak => {
            commands::review::run_weak(&app, &cli.format)?;
        }
        Command::Due => {
            commands::review::run_due(&app, &cli.format)?;
        }
        Command::ClearErrors => {
            commands::review::run_clear_errors(&mut app, &cli.format)?;
        }
        Command::Practice { mode, seed } => {
            commands::practice::run(&mut app, mode, seed, &cli.format, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
