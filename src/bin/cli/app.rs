use std::path::PathBuf;

use anyhow::{Context, Result};

use nailexam_lib::config::AppConfig;
use nailexam_lib::course::CourseCatalog;
use nailexam_lib::progress::ProgressStore;
use nailexam_lib::storage::FileStorage;

/// Command-line overrides for the config file
pub struct AppOptions {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub course: Option<PathBuf>,
}

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub store: ProgressStore<FileStorage>,
    course_path: PathBuf,
}

impl App {
    pub fn new(options: AppOptions) -> Result<Self> {
        let mut config = match &options.config {
            Some(path) => AppConfig::load(path),
            None => AppConfig::load_default(),
        }
        .context("Failed to load config")?;

        if options.data_dir.is_some() {
            config.data_dir = options.data_dir;
        }
        if options.course.is_some() {
            config.course_path = options.course;
        }

        let data_dir = config
            .resolve_data_dir()
            .context("Failed to get data directory")?;
        let course_path = config
            .resolve_course_path()
            .context("Failed to resolve course path")?;

        let storage = FileStorage::new(data_dir);
        storage
            .init()
            .context("Failed to initialize data directory")?;

        let store = ProgressStore::init(storage)
            .with_activation_codes(config.activation_codes.clone());

        Ok(Self {
            config,
            store,
            course_path,
        })
    }

    /// Load the course catalog; only commands that show content need it
    pub fn catalog(&self) -> Result<CourseCatalog> {
        CourseCatalog::load(&self.course_path)
            .with_context(|| format!("Failed to load course catalog from {:?}", self.course_path))
    }

    /// Catalog if one is available, for commands that can do without
    pub fn try_catalog(&self) -> Option<CourseCatalog> {
        if !self.course_path.exists() {
            return None;
        }
        match self.catalog() {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                log::warn!("{:#}", e);
                None
            }
        }
    }

    /// Surface a failed write-through from the last store mutation
    pub fn ensure_saved(&mut self) -> Result<()> {
        match self.store.take_persist_error() {
            Some(e) => Err(e).context("Failed to save progress"),
            None => Ok(()),
        }
    }
}
