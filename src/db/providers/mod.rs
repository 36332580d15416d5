mod postgres;
mod sqlite;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::DatabaseConfig;

pub use postgres::PostgresDbProvider;
pub use sqlite::SqliteDbProvider;

/// A backend lists and tasks can live in. Every backend must accept the
/// `UPDATE ... FROM` form used to move tasks.
#[async_trait]
pub trait DbProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lowercase URL prefixes this backend answers to.
    fn schemes(&self) -> &'static [&'static str];

    fn handles(&self, url: &str) -> bool {
        let url = url.trim().to_ascii_lowercase();
        self.schemes().iter().any(|scheme| url.starts_with(scheme))
    }

    /// Backend-specific adjustments applied before the pool is opened, so
    /// they reach every pooled connection.
    fn tune(&self, _options: &mut ConnectOptions) {}

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut options = connect_options(cfg);
        self.tune(&mut options);
        Ok(Database::connect(options).await?)
    }
}

static PROVIDERS: &[&dyn DbProvider] = &[&PostgresDbProvider, &SqliteDbProvider];

pub fn provider_for_url(url: &str) -> Result<&'static dyn DbProvider> {
    PROVIDERS
        .iter()
        .copied()
        .find(|provider| provider.handles(url))
        .ok_or_else(|| {
            let known: Vec<&str> = PROVIDERS
                .iter()
                .flat_map(|provider| provider.schemes().iter().copied())
                .collect();
            anyhow::anyhow!(
                "unsupported database url '{}', expected one of: {}",
                scheme_only(url),
                known.join(", ")
            )
        })
}

fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .sqlx_logging(false);
    options
}

/// Strips everything after the scheme so credentials never reach a log line.
fn scheme_only(url: &str) -> String {
    match url.trim().split_once(':') {
        Some((scheme, _)) if !scheme.is_empty() => format!("{scheme}:..."),
        _ => "<invalid-url>".to_string(),
    }
}
