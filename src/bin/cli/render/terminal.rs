use nailexam_lib::progress::DayStatus;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Fixed-width bar for a 0-100 percentage
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!(
        "[{}{}]",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

pub fn status_label(status: DayStatus, use_color: bool) -> String {
    match status {
        DayStatus::Completed => paint("done", Color::GREEN, use_color),
        DayStatus::Available => paint("open", Color::CYAN, use_color),
        DayStatus::Locked => paint("locked", Color::GRAY, use_color),
    }
}

/// Color a score green when it passes, red otherwise
pub fn score_label(score: u8, passed: bool, use_color: bool) -> String {
    let text = format!("{}%", score);
    if passed {
        paint(&text, Color::GREEN, use_color)
    } else {
        paint(&text, Color::RED, use_color)
    }
}
