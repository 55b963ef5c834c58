//! surveyviz-ui - survey dataset upload and visualization
//!
//! Accepts a semicolon-delimited CSV export of the music-while-working
//! survey, stores it in SQLite, and serves aggregate charts filterable
//! by gender and listening habit.

use anyhow::Result;
use clap::Parser;
use surveyviz_common::config;
use surveyviz_ui::{build_router, AppState};
use tracing::{error, info};

/// Command-line options
#[derive(Debug, Parser)]
#[command(name = "surveyviz-ui", version, about = "Survey dataset upload and visualization")]
struct Args {
    /// Root folder holding the SQLite database
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on
    #[arg(long, env = "SURVEYVIZ_PORT", default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber before anything else
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting surveyviz-ui v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // Root folder: CLI arg > SURVEYVIZ_ROOT > config file > platform default
    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match surveyviz_common::db::init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("surveyviz-ui listening on http://127.0.0.1:{}", args.port);
    info!("Upload form: http://127.0.0.1:{}/  Report: http://127.0.0.1:{}/data", args.port, args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
