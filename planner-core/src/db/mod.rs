//! SQLite persistence for the client registry and the monthly plans.
//!
//! `Database` only carries its configuration. Each operation opens its own
//! connection, runs, and drops it when done, so the handle is cheap to
//! clone into every request.

mod clients;
mod plans;
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::Connection;

const DB_FILE_NAME: &str = "planner.db";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the database lives and how to seed it on first run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// Copied to `path` when the database file does not exist yet.
    pub template: Option<PathBuf>,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            template: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// `planner.db` in the platform data directory, or the working
    /// directory when no home directory can be resolved.
    pub fn default_location() -> Self {
        let path = directories::ProjectDirs::from("", "", "crew-planner")
            .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME));
        Self::new(path)
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    config: DatabaseConfig,
}

impl Database {
    /// Prepare the database file (parent directory, template copy) and
    /// return a handle. The schema is applied separately by `migrate`.
    pub fn new(config: DatabaseConfig) -> Result<Self> {
        let db = Self { config };
        db.provision()?;
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn provision(&self) -> Result<()> {
        let path = &self.config.path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        if path.exists() {
            return Ok(());
        }

        if let Some(template) = &self.config.template {
            fs::copy(template, path).with_context(|| {
                format!(
                    "Failed to copy database template {} to {}",
                    template.display(),
                    path.display()
                )
            })?;
            tracing::info!(
                "Provisioned database {} from template {}",
                path.display(),
                template.display()
            );
        }
        Ok(())
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(schema::SCHEMA)
            .context("Failed to apply database schema")?;
        tracing::debug!("Schema ready at {}", self.config.path.display());
        Ok(())
    }

    pub(crate) fn connection(&self) -> Result<Connection> {
        let conn = Connection::open(&self.config.path)
            .with_context(|| format!("Failed to open database {}", self.config.path.display()))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}
