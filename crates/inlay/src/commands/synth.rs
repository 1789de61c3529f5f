//! Synth command.

use anyhow::Result;
use inlay_engine::ConfiguratorPhase;
use inlay_schema::PropValue;

use crate::config::ProjectConfig;

/// Run the synth command.
pub fn run(
    config: &ProjectConfig,
    component: &str,
    assignments: &[String],
    content: Option<String>,
    grouped: bool,
) -> Result<()> {
    let mut configurator = super::build_configurator(config, component);

    if configurator.mount() == ConfiguratorPhase::Loading {
        anyhow::bail!("Schema unavailable for {}", component);
    }

    for assignment in assignments {
        let Some((name, raw)) = assignment.split_once('=') else {
            anyhow::bail!("Expected NAME=VALUE, got {:?}", assignment);
        };
        configurator.apply_edit(name, parse_value(raw));
    }

    if let Some(content) = content {
        configurator.set_content_slot(Some(content));
    }

    configurator.set_grouped(grouped);

    println!("{}", configurator.snippet());

    Ok(())
}

/// Interpret a command-line value: booleans and numbers by shape, anything
/// else as a string.
fn parse_value(raw: &str) -> PropValue {
    match raw {
        "true" => return PropValue::Bool(true),
        "false" => return PropValue::Bool(false),
        _ => {}
    }

    if let Ok(n) = raw.parse::<f64>() {
        return PropValue::Number(n);
    }

    PropValue::String(raw.to_string())
}
