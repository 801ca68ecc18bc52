use crate::database::Database;
use crate::date_provider::{DateProvider, OverrideDateProvider, SystemDateProvider};
use crate::store::StoreError;
use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

pub const DEFAULT_DB_PATH: &str = "codetrack.db";

/// Database configuration
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// Whether to use in-memory database
    pub is_test_mode: bool,
    /// Custom database file path (ignored if in test mode)
    pub custom_path: Option<String>,
    /// Calendar day the store treats as today
    pub override_date: Option<NaiveDate>,
}

impl DatabaseConfig {
    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::default()
    }

    /// Gets the effective database path
    pub fn get_path(&self) -> &str {
        if self.is_test_mode {
            ":memory:"
        } else {
            self.custom_path.as_deref().unwrap_or(DEFAULT_DB_PATH)
        }
    }

    pub fn date_provider(&self) -> Arc<dyn DateProvider> {
        match self.override_date {
            Some(date) => Arc::new(OverrideDateProvider::new(date)),
            None => Arc::new(SystemDateProvider),
        }
    }
}

#[derive(Debug, Default)]
pub struct DatabaseConfigBuilder {
    config: DatabaseConfig,
}

impl DatabaseConfigBuilder {
    pub fn test_mode(mut self) -> Self {
        self.config.is_test_mode = true;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.custom_path = Some(path.into());
        self
    }

    pub fn override_date(mut self, date: Option<NaiveDate>) -> Self {
        self.config.override_date = date;
        self
    }

    /// Pins today to the given day; an impossible date leaves the clock alone
    pub fn date_ymd(self, year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day);
        self.override_date(date)
    }

    pub fn build(self) -> DatabaseConfig {
        self.config
    }
}

/// Factory for creating Database instances
pub struct DatabaseFactory;

impl DatabaseFactory {
    /// Creates a database with the specified configuration
    pub fn create(config: DatabaseConfig) -> Result<Database, StoreError> {
        let path = config.get_path();
        debug!(
            "Creating database (path={}, override_date={:?})",
            path, config.override_date
        );
        Database::with_date_provider(path, config.date_provider())
    }
}
