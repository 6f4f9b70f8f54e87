//! `taskboardd` — the taskboard server binary.
//!
//! Usage:
//!   taskboardd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/taskboard/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use taskboard_core::Module;

use config::ServerConfig;

/// Taskboard server.
#[derive(Parser, Debug)]
#[command(name = "taskboardd", about = "Task assignment server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides default 0.0.0.0:8080).
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = taskboard_core::ServiceConfig {
        data_dir: Some(data_dir),
        db_path: server_config.storage.db_path.clone().map(Into::into),
        listen: cli.listen.clone(),
    };

    let kv: Arc<dyn taskboard_kv::KVStore> = Arc::new(
        taskboard_kv::RedbStore::open(&core_config.resolve_db_path())
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {e}"))?,
    );

    // Initialize the assign module.
    let assign_module = assign::AssignModule::new(kv);
    info!("Assign module initialized");

    let module_routes = vec![(assign_module.name(), assign_module.routes())];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("taskboardd listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
