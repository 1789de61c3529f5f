//! The runtime join of schema, overlay, and live state.

use serde::Serialize;

use inlay_overlay::{resolve_control, RegistryOverlay, ResolvedControl};
use inlay_schema::{ComponentSchema, PropValue};

use crate::state::ConfigurationState;

/// One attribute as the renderer sees it: schema joined with its overlay
/// entry and current value. Recomputed whenever schema or overlay changes;
/// read-only to consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAttribute {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub control: ResolvedControl,
    pub default_value: Option<PropValue>,
    pub current_value: Option<PropValue>,
    pub hidden: bool,
}

/// Result of resolving a component's attributes.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Attributes in display order
    pub attributes: Vec<ResolvedAttribute>,

    /// Overlay entry names that referenced no schema attribute
    pub stale_entries: Vec<String>,
}

/// Join a schema with its overlay and the live state.
///
/// Display order is the overlay's `order` when present (which also defines
/// the visible set), else declaration order. Stale overlay entries are
/// warned about and excluded; they never prevent other attributes from
/// rendering.
pub fn resolve_attributes(
    schema: &ComponentSchema,
    overlay: Option<&RegistryOverlay>,
    state: &ConfigurationState,
) -> Resolution {
    let stale_entries: Vec<String> = overlay
        .map(|o| {
            o.stale_entries(schema)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    for name in &stale_entries {
        tracing::warn!(
            "Overlay for {} references unknown attribute {:?}; ignoring",
            schema.display_name,
            name
        );
    }

    let ordered: Vec<&str> = match overlay.and_then(|o| o.order.as_ref()) {
        Some(order) => order
            .iter()
            .map(String::as_str)
            .filter(|name| schema.attribute(name).is_some())
            .collect(),
        None => schema.attributes.iter().map(|a| a.name.as_str()).collect(),
    };

    let attributes = ordered
        .into_iter()
        .filter_map(|name| schema.attribute(name))
        .map(|attr| {
            let entry = overlay.and_then(|o| o.get(&attr.name));

            let default_value = entry
                .and_then(|e| e.default_value_override.clone())
                .or_else(|| attr.default_value.clone());

            ResolvedAttribute {
                name: attr.name.clone(),
                label: entry
                    .and_then(|e| e.label.clone())
                    .unwrap_or_else(|| attr.name.clone()),
                required: attr.required,
                control: resolve_control(attr, entry),
                default_value,
                current_value: state.get(&attr.name).cloned(),
                hidden: entry.is_some_and(|e| e.hidden),
            }
        })
        .collect();

    Resolution {
        attributes,
        stale_entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inlay_overlay::{ControlKind, OverlayEntry};
    use inlay_schema::fallback_schema;
    use pretty_assertions::assert_eq;

    #[test]
    fn declaration_order_without_overlay() {
        let schema = fallback_schema("Button").unwrap();
        let resolution = resolve_attributes(&schema, None, &ConfigurationState::new());

        let names: Vec<_> = resolution.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["variant", "size", "disabled", "loading"]);
        assert!(resolution.stale_entries.is_empty());
    }

    #[test]
    fn overlay_order_defines_visible_set() {
        let schema = fallback_schema("Button").unwrap();
        let overlay = RegistryOverlay::new("Button").with_order(["disabled", "variant"]);

        let resolution = resolve_attributes(&schema, Some(&overlay), &ConfigurationState::new());

        let names: Vec<_> = resolution.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["disabled", "variant"]);
    }

    #[test]
    fn overlay_overrides_label_default_and_control() {
        let schema = fallback_schema("Button").unwrap();
        let overlay = RegistryOverlay::new("Button").entry(
            "variant",
            OverlayEntry::control(ControlKind::TextField)
                .with_label("Style")
                .with_default("ghost"),
        );

        let resolution = resolve_attributes(&schema, Some(&overlay), &ConfigurationState::new());
        let variant = resolution
            .attributes
            .iter()
            .find(|a| a.name == "variant")
            .unwrap();

        assert_eq!(variant.label, "Style");
        assert_eq!(variant.control.kind, ControlKind::TextField);
        assert_eq!(variant.default_value.as_ref().unwrap().as_str(), Some("ghost"));
    }

    #[test]
    fn stale_entries_are_collected_and_skipped() {
        let schema = fallback_schema("Button").unwrap();
        let overlay = RegistryOverlay::new("Button")
            .entry("legacyProp", OverlayEntry::hide())
            .entry("variant", OverlayEntry::default().with_label("Style"));

        let resolution = resolve_attributes(&schema, Some(&overlay), &ConfigurationState::new());

        assert_eq!(resolution.stale_entries, vec!["legacyProp".to_string()]);
        // Other attributes render unaffected
        assert_eq!(resolution.attributes.len(), schema.attributes.len());
        assert!(resolution.attributes.iter().all(|a| a.name != "legacyProp"));
    }

    #[test]
    fn current_values_come_from_state() {
        let schema = fallback_schema("Button").unwrap();
        let mut state = ConfigurationState::new();
        state.set("disabled", PropValue::Bool(true));

        let resolution = resolve_attributes(&schema, None, &state);
        let disabled = resolution
            .attributes
            .iter()
            .find(|a| a.name == "disabled")
            .unwrap();

        assert_eq!(disabled.current_value.as_ref().unwrap().as_bool(), Some(true));
    }

    #[test]
    fn hidden_flag_carries_through() {
        let schema = fallback_schema("Button").unwrap();
        let overlay = RegistryOverlay::new("Button").entry("loading", OverlayEntry::hide());

        let resolution = resolve_attributes(&schema, Some(&overlay), &ConfigurationState::new());
        let loading = resolution
            .attributes
            .iter()
            .find(|a| a.name == "loading")
            .unwrap();

        assert!(loading.hidden);
    }
}
