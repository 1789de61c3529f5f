//! Live configuration state for one component instance.

use std::collections::BTreeMap;

use serde::Serialize;

use inlay_schema::PropValue;

/// The live mapping from attribute name to current value, plus the optional
/// content slot for components whose primary content is not an attribute.
///
/// Created empty when a configurator mounts, seeded from defaults, mutated
/// one key at a time by edits, and discarded on unmount. Never shared
/// between components.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigurationState {
    values: BTreeMap<String, PropValue>,
    content_slot: Option<String>,
}

impl ConfigurationState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of an attribute.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name)
    }

    /// Replace exactly one attribute's value, leaving all others untouched.
    pub fn set(&mut self, name: impl Into<String>, value: PropValue) {
        self.values.insert(name.into(), value);
    }

    /// Remove an attribute's value.
    pub fn unset(&mut self, name: &str) -> Option<PropValue> {
        self.values.remove(name)
    }

    /// The content slot value, if any.
    pub fn content_slot(&self) -> Option<&str> {
        self.content_slot.as_deref()
    }

    /// Set or clear the content slot.
    pub fn set_content_slot(&mut self, content: Option<String>) {
        self.content_slot = content;
    }

    /// All current values, in attribute-name order.
    pub fn values(&self) -> &BTreeMap<String, PropValue> {
        &self.values
    }

    /// Whether any value or content has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.content_slot.is_none()
    }
}
