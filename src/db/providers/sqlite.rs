use std::time::Duration;

use sea_orm::ConnectOptions;

use super::DbProvider;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SqliteDbProvider;

impl DbProvider for SqliteDbProvider {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["sqlite:"]
    }

    /// Cascading list deletes rely on foreign keys being on for every pooled
    /// connection.
    fn tune(&self, options: &mut ConnectOptions) {
        options.map_sqlx_sqlite_opts(|opts| opts.foreign_keys(true).busy_timeout(BUSY_TIMEOUT));
    }
}
