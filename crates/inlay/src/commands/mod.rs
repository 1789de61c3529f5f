//! CLI subcommands.

pub mod inspect;
pub mod list;
pub mod serve;
pub mod synth;

use inlay_engine::Configurator;
use inlay_overlay::RegistryOverlay;
use inlay_schema::{FileAnalyzer, SchemaSource};

use crate::config::ProjectConfig;

/// Build a configurator for a component using the project's directories.
pub fn build_configurator(config: &ProjectConfig, component: &str) -> Configurator {
    let source = SchemaSource::with_analyzer(Box::new(FileAnalyzer::new(&config.components.dir)));

    let mut configurator = Configurator::new(component, source);

    let overlay_path = std::path::Path::new(&config.overlays.dir)
        .join(format!("{}.toml", component.to_lowercase()));
    if let Ok(source) = std::fs::read_to_string(&overlay_path) {
        match RegistryOverlay::from_toml(&source) {
            Ok(overlay) => configurator = configurator.with_overlay(overlay),
            Err(e) => tracing::warn!("Skipping malformed overlay {}: {}", overlay_path.display(), e),
        }
    }

    configurator
}
