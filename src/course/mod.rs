//! Course content catalog
//!
//! Days, signals, patterns and questions. Read-only input to the progress core.

pub mod catalog;
pub mod models;

pub use catalog::{CatalogError, CourseCatalog};
pub use models::*;
