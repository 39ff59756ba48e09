//! Practice trainer: random, weak-spot, timed exam and review runs

pub mod modes;
pub mod session;

pub use modes::{select_questions, PracticeMode};
pub use session::{PracticeSession, PracticeSummary};
