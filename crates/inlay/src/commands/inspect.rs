//! Inspect command.

use anyhow::Result;
use inlay_engine::ConfiguratorPhase;
use inlay_overlay::ControlKind;
use inlay_schema::PropValue;

use crate::config::ProjectConfig;

/// Run the inspect command.
pub fn run(config: &ProjectConfig, component: &str) -> Result<()> {
    let mut configurator = super::build_configurator(config, component);

    if configurator.mount() == ConfiguratorPhase::Loading {
        println!("Schema unavailable for {}", component);
        return Ok(());
    }

    let Some(schema) = configurator.schema() else {
        println!("Schema unavailable for {}", component);
        return Ok(());
    };
    println!("{}", schema.display_name);
    if let Some(description) = &schema.description {
        println!("  {}", description);
    }
    println!();

    for attr in configurator.visible_attributes() {
        let required = if attr.required { " (required)" } else { "" };
        println!("  {}{}", attr.label, required);
        println!("    control: {}", kind_name(attr.control.kind));
        if !attr.control.options.is_empty() {
            let options: Vec<&str> = attr
                .control
                .options
                .iter()
                .map(|o| o.label.as_str())
                .collect();
            println!("    options: {}", options.join(", "));
        }
        if let Some(default) = &attr.default_value {
            println!("    default: {}", display_value(default));
        }
    }

    if !configurator.stale_entries().is_empty() {
        println!();
        println!("  stale overlay entries: {}", configurator.stale_entries().join(", "));
    }

    println!();
    println!("{}", configurator.snippet());

    Ok(())
}

fn kind_name(kind: ControlKind) -> &'static str {
    match kind {
        ControlKind::RadioTabGroup => "radio tab group",
        ControlKind::Toggle => "toggle",
        ControlKind::ColorSelect => "color select",
        ControlKind::TextField => "text field",
    }
}

fn display_value(value: &PropValue) -> String {
    match value {
        PropValue::String(s) => format!("{:?}", s),
        PropValue::Bool(b) => b.to_string(),
        PropValue::Number(n) => n.to_string(),
        PropValue::List(items) => format!("{:?}", items),
        PropValue::Json(json) => json.to_string(),
    }
}
