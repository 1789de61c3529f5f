//! List command.

use anyhow::Result;
use inlay_schema::{fallback_names, ComponentRegistry};

use crate::config::ProjectConfig;

/// Run the list command.
pub fn run(config: &ProjectConfig) -> Result<()> {
    let mut names: Vec<String> = fallback_names().iter().map(|n| n.to_string()).collect();

    let mut registry = ComponentRegistry::new();
    match registry.scan(std::path::Path::new(&config.components.dir)) {
        Ok(count) => {
            tracing::info!("Analyzed {} component sources", count);
            for name in registry.names() {
                if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                    names.push(name.to_string());
                }
            }
        }
        Err(e) => {
            tracing::debug!("No analyzable sources: {}", e);
        }
    }

    names.sort_unstable();

    for name in names {
        println!("{}", name);
    }

    Ok(())
}
