//! Closed per-component exception tables.
//!
//! The general pipeline stays free of per-component knowledge; everything
//! component-specific lives here, consulted at fixed extension points by the
//! orchestrator (seeding, clamping, grouping) and the synthesizer
//! (always-emit, suppression, content-bearing allow-list). Unknown
//! components get no exceptions.

use std::collections::HashMap;
use std::sync::LazyLock;

use inlay_schema::PropValue;

use crate::state::ConfigurationState;

/// Grouped-rendering configuration for a component whose attribute set
/// describes a collection of same-shaped items.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Container tag wrapping the items
    pub container: String,

    /// Attribute that carries each item's own label
    pub item_label_attr: String,

    /// Representative item labels for the docs example
    pub item_labels: Vec<String>,

    /// Boolean attribute that drives the group's initial selection state
    pub selected_flag: String,
}

/// Exceptions for one component.
#[derive(Default)]
pub struct ComponentExceptions {
    /// Values forced into the state at seed time, after defaults
    pub seed: Vec<(&'static str, PropValue)>,

    /// Content-slot placeholder seeded for content-bearing components
    pub content_placeholder: Option<&'static str>,

    /// Treated as content-bearing even if the schema does not say so
    pub content_bearing: bool,

    /// Attributes emitted in snippets even at their default value
    pub always_emit: &'static [&'static str],

    /// Attributes never emitted in snippets (redundant with the content slot)
    pub suppress: &'static [&'static str],

    /// Ad-hoc dependent-value clamp, run after every edit
    pub clamp: Option<fn(&mut ConfigurationState)>,

    /// Grouped-rendering configuration, if the component supports it
    pub group: Option<GroupConfig>,
}

impl std::fmt::Debug for ComponentExceptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentExceptions")
            .field("seed", &self.seed)
            .field("content_placeholder", &self.content_placeholder)
            .field("always_emit", &self.always_emit)
            .field("suppress", &self.suppress)
            .field("has_clamp", &self.clamp.is_some())
            .field("group", &self.group)
            .finish()
    }
}

/// Keep ProgressBar's value within its max.
fn clamp_progress(state: &mut ConfigurationState) {
    let max = state.get("max").and_then(PropValue::as_number).unwrap_or(100.0);
    if let Some(value) = state.get("value").and_then(PropValue::as_number) {
        if value > max {
            state.set("value", PropValue::Number(max));
        }
    }
}

static EXCEPTIONS: LazyLock<HashMap<&'static str, ComponentExceptions>> = LazyLock::new(|| {
    let mut table = HashMap::new();

    table.insert(
        "button",
        ComponentExceptions {
            content_placeholder: Some("Click me"),
            content_bearing: true,
            ..Default::default()
        },
    );

    table.insert(
        "badge",
        ComponentExceptions {
            content_placeholder: Some("New"),
            content_bearing: true,
            // The label prop mirrors the badge content; emitting both would
            // be redundant in the example.
            suppress: &["label"],
            ..Default::default()
        },
    );

    table.insert(
        "alert",
        ComponentExceptions {
            content_placeholder: Some("Something happened."),
            content_bearing: true,
            // kind is the category discriminator; examples read better with
            // it spelled out even at the default.
            always_emit: &["kind"],
            ..Default::default()
        },
    );

    table.insert(
        "textinput",
        ComponentExceptions {
            // The raw default is an empty string; seed something readable.
            seed: vec![("placeholder", PropValue::String("Type here…".to_string()))],
            ..Default::default()
        },
    );

    table.insert(
        "select",
        ComponentExceptions {
            // Representative initial collection for the list-typed attribute.
            seed: vec![(
                "options",
                PropValue::List(vec![
                    "Apple".to_string(),
                    "Banana".to_string(),
                    "Cherry".to_string(),
                ]),
            )],
            ..Default::default()
        },
    );

    table.insert(
        "progressbar",
        ComponentExceptions {
            clamp: Some(clamp_progress),
            ..Default::default()
        },
    );

    table.insert(
        "checkbox",
        ComponentExceptions {
            group: Some(GroupConfig {
                container: "CheckboxGroup".to_string(),
                item_label_attr: "label".to_string(),
                item_labels: vec![
                    "Email".to_string(),
                    "SMS".to_string(),
                    "Push".to_string(),
                ],
                selected_flag: "defaultChecked".to_string(),
            }),
            ..Default::default()
        },
    );

    table
});

/// Look up the exceptions for a component (case-insensitive).
pub fn exceptions_for(component: &str) -> Option<&'static ComponentExceptions> {
    EXCEPTIONS.get(component.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_components_get_no_exceptions() {
        assert!(exceptions_for("Tooltip").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(exceptions_for("Alert").is_some());
        assert!(exceptions_for("alert").is_some());
    }

    #[test]
    fn progress_clamp_caps_value_at_max() {
        let mut state = ConfigurationState::new();
        state.set("max", PropValue::Number(50.0));
        state.set("value", PropValue::Number(120.0));

        clamp_progress(&mut state);

        assert_eq!(state.get("value").unwrap().as_number(), Some(50.0));
    }

    #[test]
    fn checkbox_declares_group_config() {
        let group = exceptions_for("Checkbox").unwrap().group.as_ref().unwrap();

        assert_eq!(group.container, "CheckboxGroup");
        assert_eq!(group.selected_flag, "defaultChecked");
        assert_eq!(group.item_labels.len(), 3);
    }
}
