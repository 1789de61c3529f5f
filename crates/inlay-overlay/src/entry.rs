//! Hand-authored per-component overlays.
//!
//! An overlay is checked in alongside a component's documentation page and
//! layered over the schema-derived defaults. It is never validated at build
//! time; stale entries surface as runtime warnings only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use inlay_schema::{ComponentSchema, PropValue};

use crate::resolver::ControlKind;

/// Override layer for a single attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayEntry {
    /// Display label, overriding the attribute name
    #[serde(default)]
    pub label: Option<String>,

    /// Forced control kind; always wins over inference
    #[serde(default)]
    pub control_kind: Option<ControlKind>,

    /// Explicit option list for choice-style controls
    #[serde(default)]
    pub explicit_options: Option<Vec<String>>,

    /// Default value overriding the schema's
    #[serde(default)]
    pub default_value_override: Option<PropValue>,

    /// Hide the attribute from the configurator entirely
    #[serde(default)]
    pub hidden: bool,

    /// Widget-specific extra configuration, passed through opaquely
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
}

impl OverlayEntry {
    /// Entry that forces a control kind.
    pub fn control(kind: ControlKind) -> Self {
        Self {
            control_kind: Some(kind),
            ..Self::default()
        }
    }

    /// Entry that hides the attribute.
    pub fn hide() -> Self {
        Self {
            hidden: true,
            ..Self::default()
        }
    }

    /// Set the explicit option list.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the default value override.
    pub fn with_default(mut self, value: impl Into<PropValue>) -> Self {
        self.default_value_override = Some(value.into());
        self
    }
}

/// A component's full overlay: entry map plus optional display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryOverlay {
    /// Component this overlay belongs to
    pub component: String,

    /// Display order and visible set. When present, only the listed
    /// attributes render, in this order; when absent, declaration order.
    #[serde(default)]
    pub order: Option<Vec<String>>,

    /// Per-attribute entries, keyed by attribute name
    #[serde(default)]
    pub entries: BTreeMap<String, OverlayEntry>,
}

impl RegistryOverlay {
    /// Create an empty overlay for a component.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            order: None,
            entries: BTreeMap::new(),
        }
    }

    /// Add an entry (builder style).
    pub fn entry(mut self, name: impl Into<String>, entry: OverlayEntry) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    /// Set the display order (builder style).
    pub fn with_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    /// Look up the entry for an attribute.
    pub fn get(&self, name: &str) -> Option<&OverlayEntry> {
        self.entries.get(name)
    }

    /// Parse an overlay from its checked-in TOML form.
    pub fn from_toml(source: &str) -> Result<Self, OverlayError> {
        toml::from_str(source).map_err(|e| OverlayError::InvalidToml(e.to_string()))
    }

    /// Entry keys that do not reference an attribute in the schema.
    ///
    /// Stale entries are a warning, never fatal; callers log them and skip
    /// them when rendering.
    pub fn stale_entries(&self, schema: &ComponentSchema) -> Vec<&str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|name| schema.attribute(name).is_none())
            .collect()
    }
}

/// Errors that can occur when loading an overlay.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Invalid overlay TOML: {0}")]
    InvalidToml(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use inlay_schema::fallback_schema;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_constructs_overlay() {
        let overlay = RegistryOverlay::new("Button")
            .with_order(["variant", "size"])
            .entry(
                "size",
                OverlayEntry::control(ControlKind::RadioTabGroup)
                    .with_options(["small", "medium", "large"]),
            );

        assert_eq!(overlay.component, "Button");
        assert_eq!(
            overlay.get("size").unwrap().explicit_options,
            Some(vec![
                "small".to_string(),
                "medium".to_string(),
                "large".to_string()
            ])
        );
    }

    #[test]
    fn parses_from_toml() {
        let source = r#"
component = "Button"
order = ["variant", "disabled"]

[entries.variant]
label = "Style"
control_kind = "radio_tab_group"
explicit_options = ["primary", "ghost"]

[entries.disabled]
hidden = true
"#;

        let overlay = RegistryOverlay::from_toml(source).unwrap();

        assert_eq!(overlay.component, "Button");
        assert_eq!(
            overlay.get("variant").unwrap().control_kind,
            Some(ControlKind::RadioTabGroup)
        );
        assert!(overlay.get("disabled").unwrap().hidden);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            RegistryOverlay::from_toml("component = [unclosed"),
            Err(OverlayError::InvalidToml(_))
        ));
    }

    #[test]
    fn detects_stale_entries() {
        let schema = fallback_schema("Button").unwrap();
        let overlay = RegistryOverlay::new("Button")
            .entry("variant", OverlayEntry::default())
            .entry("legacyProp", OverlayEntry::default());

        assert_eq!(overlay.stale_entries(&schema), vec!["legacyProp"]);
    }
}
