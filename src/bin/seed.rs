use clap::Parser;
use uuid::Uuid;

use tasklist_server::{
    config::AppConfig, db::connection, logging::init_tracing, seed, services::ServiceContext,
};

/// Loads the fixture lists into the configured database.
#[derive(Debug, Parser)]
#[command(name = "seed")]
struct Cli {
    /// User recorded as creator of every seeded row.
    #[arg(long, default_value = "00000000-0000-0000-0000-000000000001")]
    user_id: Uuid,
    /// Keep existing lists and tasks instead of wiping them first.
    #[arg(long)]
    keep_existing: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("seed failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::from_env()?;
    init_tracing(&cfg.logging.rust_log)?;

    let db = connection::connect(cfg.require_database()?).await?;
    let services = ServiceContext::new(&db);

    if !cli.keep_existing {
        let (lists, tasks) = services.list().delete_all().await?;
        tracing::info!(lists, tasks, "cleared existing data");
    }

    let summary = seed::seed(&services, cli.user_id).await?;
    println!("seeded {} lists and {} tasks", summary.lists, summary.tasks);
    Ok(())
}
