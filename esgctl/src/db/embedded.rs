//! Embedded PostgreSQL support for development and evaluation.
//!
//! Runs a bundled PostgreSQL instance so `esgctl` can start with zero
//! external infrastructure. Not intended for production deployments.

use postgresql_embedded::{PostgreSQL, Settings};
use std::path::PathBuf;
use tracing::info;

const DATABASE_NAME: &str = "esgctl";

/// A running embedded PostgreSQL instance.
pub struct EmbeddedDatabase {
    postgresql: PostgreSQL,
    connection_string: String,
}

impl EmbeddedDatabase {
    /// Start an embedded PostgreSQL server and create the application database.
    ///
    /// When `persistent` is false the data directory is temporary and removed
    /// on shutdown.
    pub async fn start(data_dir: Option<PathBuf>, persistent: bool) -> anyhow::Result<Self> {
        let mut settings = Settings::default();
        settings.temporary = !persistent;
        if let Some(dir) = data_dir {
            settings.data_dir = dir;
        }

        let mut postgresql = PostgreSQL::new(settings);
        postgresql.setup().await?;
        postgresql.start().await?;

        if !postgresql.database_exists(DATABASE_NAME).await? {
            postgresql.create_database(DATABASE_NAME).await?;
        }

        let connection_string = postgresql.settings().url(DATABASE_NAME);
        info!("Embedded PostgreSQL listening on port {}", postgresql.settings().port);

        Ok(Self {
            postgresql,
            connection_string,
        })
    }

    /// Connection string for the application database.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Stop the embedded server.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        self.postgresql.stop().await?;
        Ok(())
    }
}
