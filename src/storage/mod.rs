//! Durable local storage for progress blobs

mod file_storage;

pub use file_storage::{FileStorage, KeyValueStore, MemoryStorage, Result, StorageError};
