//! Registry MCP Server - Main entry point
//!
//! Opens the SQLite registry and serves it over the Model Context Protocol on stdio.

use anyhow::Result;
use registry_mcp_server::repositories::{
    ContactRepository, PersonRepository, PersonnelRepository, SqliteContactRepository,
    SqlitePersonRepository, SqlitePersonnelRepository,
};
use registry_mcp_server::{AsyncSqliteStore, Config, RegistryMcpServer, SqliteStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Configuration comes first so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let fallback_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&fallback_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Registry MCP Server with database: {}",
        config.database_path
    );

    let store = match SqliteStore::new(&config.database_path) {
        Ok(store) => AsyncSqliteStore::new(store),
        Err(e) => {
            error!("Failed to open database {}: {}", config.database_path, e);
            return Err(e.into());
        }
    };

    // Initialize repositories
    let person_repo =
        Arc::new(SqlitePersonRepository::new(store.clone())) as Arc<dyn PersonRepository>;
    let contact_repo =
        Arc::new(SqliteContactRepository::new(store.clone())) as Arc<dyn ContactRepository>;
    let personnel_repo =
        Arc::new(SqlitePersonnelRepository::new(store)) as Arc<dyn PersonnelRepository>;

    let server = RegistryMcpServer::new(
        person_repo,
        contact_repo,
        personnel_repo,
        config.max_match_results,
        config.match_confidence_threshold,
    );

    info!(
        "Person matching: max {} results, min confidence {}",
        config.max_match_results, config.match_confidence_threshold
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    registry_mcp_server::server::run_server(server).await?;

    info!("Registry MCP Server shutdown complete");
    Ok(())
}
