use super::DbProvider;

pub struct PostgresDbProvider;

impl DbProvider for PostgresDbProvider {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["postgres://", "postgresql://"]
    }
}
