use clap::Parser;
use migration::sea_orm::{ConnectOptions, Database};
use migration::MigrationCommand;

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "ParcelPro database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Database connection URL (postgres://... or sqlite://path?mode=rwc)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    if args.database_url.contains(":memory:") {
        // An in-memory database vanishes when this process exits.
        eprintln!("❌ In-memory SQLite is not supported by the migration CLI");
        std::process::exit(2);
    }

    let mut options = ConnectOptions::new(args.database_url);
    options.sqlx_logging(false);

    let db = match Database::connect(options).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let outcome = migration::migrate(&db, args.command).await;

    if let Err(e) = db.close().await {
        tracing::warn!(error = %e, "failed to close database connection");
    }

    if let Err(e) = outcome {
        eprintln!("❌ Migration failed: {e}");
        std::process::exit(1);
    }
}
