//! Project configuration (inlay.toml).

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Configuration file structure (inlay.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub components: ComponentsConfig,
    #[serde(default)]
    pub overlays: OverlaysConfig,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize)]
pub struct ComponentsConfig {
    #[serde(default = "default_components_dir")]
    pub dir: String,
}

#[derive(Debug, Deserialize)]
pub struct OverlaysConfig {
    #[serde(default = "default_overlays_dir")]
    pub dir: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            dir: default_components_dir(),
        }
    }
}

impl Default for OverlaysConfig {
    fn default() -> Self {
        Self {
            dir: default_overlays_dir(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            assets_dir: default_assets_dir(),
        }
    }
}

fn default_components_dir() -> String {
    "src/components".to_string()
}
fn default_overlays_dir() -> String {
    "docs/overlays".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_assets_dir() -> String {
    "docs/assets".to_string()
}

/// Load configuration from inlay.toml if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<ProjectConfig> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ProjectConfig::default())
}
