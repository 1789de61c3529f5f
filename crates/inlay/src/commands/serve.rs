//! Dev server command.

use std::path::PathBuf;

use anyhow::Result;
use inlay_server::{ConfigServer, ConfigServerConfig};

use crate::config::ProjectConfig;

/// Run the serve command.
pub async fn run(config: &ProjectConfig, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting configurator server on port {}", port);

    let server_config = ConfigServerConfig {
        components_dir: PathBuf::from(&config.components.dir),
        overlays_dir: PathBuf::from(&config.overlays.dir),
        assets_dir: PathBuf::from(&config.server.assets_dir),
        host: config.server.host.clone(),
        port,
        open,
    };

    ConfigServer::new(server_config).start().await?;

    Ok(())
}
