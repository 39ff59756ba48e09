//! Progress tracking core for the 28-day nail exam course
//!
//! The UI layer owns a single [`progress::ProgressStore`] and calls into it as
//! the learner moves through a day's signals, patterns and test. Content
//! comes from a read-only [`course::CourseCatalog`].

pub mod config;
pub mod course;
pub mod practice;
pub mod progress;
pub mod storage;

pub use config::AppConfig;
pub use course::CourseCatalog;
pub use progress::ProgressStore;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
