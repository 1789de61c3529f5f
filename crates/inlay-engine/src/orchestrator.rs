//! The configurator orchestrator.
//!
//! Loads a schema, seeds initial state, answers edits, and republishes the
//! synthesized snippet and live configuration to consumers over a broadcast
//! hub. Two phases only: `Loading` and `Ready`. Failed resolution is not an
//! error state; it is `Loading` persisting until a remount.

use std::collections::BTreeMap;

use tokio::sync::broadcast;

use inlay_overlay::RegistryOverlay;
use inlay_schema::{ComponentSchema, PropValue, SchemaSource};

use crate::exceptions::exceptions_for;
use crate::resolve::{resolve_attributes, Resolution, ResolvedAttribute};
use crate::state::ConfigurationState;
use crate::synthesize::{synthesize, synthesize_grouped};

/// Source-language tag handed to the code display panel.
pub const SNIPPET_LANGUAGE: &str = "tsx";

/// Lifecycle phase of a configurator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguratorPhase {
    /// Schema not yet resolved; no controls render
    Loading,
    /// Schema resolved, state seeded, controls live
    Ready,
}

/// Snapshot published to the preview renderer and code display panel after
/// every mount and edit.
#[derive(Debug, Clone)]
pub struct ConfiguratorUpdate {
    /// Component display name
    pub component: String,

    /// Current attribute values
    pub values: BTreeMap<String, PropValue>,

    /// Current content slot
    pub content_slot: Option<String>,

    /// Synthesized example snippet
    pub snippet: String,

    /// Source-language tag for syntax highlighting
    pub language: &'static str,
}

/// Hub broadcasting configurator updates to all subscribed consumers.
#[derive(Debug, Clone)]
pub struct UpdateHub {
    sender: broadcast::Sender<ConfiguratorUpdate>,
}

impl UpdateHub {
    /// Create a new hub.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send an update to all subscribers.
    pub fn send(&self, update: ConfiguratorUpdate) {
        // Ignore send errors (no receivers)
        let _ = self.sender.send(update);
    }

    /// Subscribe to updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ConfiguratorUpdate> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for UpdateHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateful coordinator for one component's configurator.
pub struct Configurator {
    component: String,
    source: SchemaSource,
    overlay: Option<RegistryOverlay>,
    schema: Option<ComponentSchema>,
    resolution: Resolution,
    state: ConfigurationState,
    grouped: bool,
    hub: UpdateHub,
}

impl Configurator {
    /// Create a configurator for a component. Call [`mount`](Self::mount) to
    /// resolve the schema and seed state.
    pub fn new(component: impl Into<String>, source: SchemaSource) -> Self {
        Self {
            component: component.into(),
            source,
            overlay: None,
            schema: None,
            resolution: Resolution::default(),
            state: ConfigurationState::new(),
            grouped: false,
            hub: UpdateHub::new(),
        }
    }

    /// Attach an overlay before mounting.
    pub fn with_overlay(mut self, overlay: RegistryOverlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Resolve the schema and, on success, seed state and go `Ready`.
    ///
    /// On failure the configurator stays in `Loading` indefinitely; there is
    /// no retry loop. Remounting is the only way to re-trigger resolution.
    pub fn mount(&mut self) -> ConfiguratorPhase {
        let Some(schema) = self.source.resolve(&self.component) else {
            tracing::debug!("Schema unavailable for {}; staying in Loading", self.component);
            return ConfiguratorPhase::Loading;
        };

        self.state = ConfigurationState::new();
        self.seed(&schema);
        self.resolution = resolve_attributes(&schema, self.overlay.as_ref(), &self.state);
        self.schema = Some(schema);
        self.publish();

        ConfiguratorPhase::Ready
    }

    /// Discard all state and mount a different component.
    pub fn remount(&mut self, component: impl Into<String>) -> ConfiguratorPhase {
        self.component = component.into();
        self.schema = None;
        self.resolution = Resolution::default();
        self.state = ConfigurationState::new();
        self.grouped = false;
        self.mount()
    }

    /// Seed state: defaults of non-hidden attributes first, then the
    /// component's closed seed exceptions.
    fn seed(&mut self, schema: &ComponentSchema) {
        let initial = resolve_attributes(schema, self.overlay.as_ref(), &self.state);
        for attr in &initial.attributes {
            if attr.hidden {
                continue;
            }
            if let Some(default) = &attr.default_value {
                self.state.set(attr.name.clone(), default.clone());
            }
        }

        let exceptions = exceptions_for(&self.component);

        if let Some(exceptions) = exceptions {
            for (name, value) in &exceptions.seed {
                self.state.set(*name, value.clone());
            }
        }

        let content_bearing =
            schema.content_bearing || exceptions.is_some_and(|e| e.content_bearing);
        if content_bearing {
            let placeholder = exceptions
                .and_then(|e| e.content_placeholder)
                .unwrap_or(schema.display_name.as_str());
            self.state.set_content_slot(Some(placeholder.to_string()));
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ConfiguratorPhase {
        if self.schema.is_some() {
            ConfiguratorPhase::Ready
        } else {
            ConfiguratorPhase::Loading
        }
    }

    /// The resolved schema, once `Ready`.
    pub fn schema(&self) -> Option<&ComponentSchema> {
        self.schema.as_ref()
    }

    /// All resolved attributes in display order (hidden ones included).
    pub fn attributes(&self) -> &[ResolvedAttribute] {
        &self.resolution.attributes
    }

    /// Resolved attributes that should render a control.
    pub fn visible_attributes(&self) -> impl Iterator<Item = &ResolvedAttribute> {
        self.resolution.attributes.iter().filter(|a| !a.hidden)
    }

    /// Stale overlay entry names found at resolution time.
    pub fn stale_entries(&self) -> &[String] {
        &self.resolution.stale_entries
    }

    /// Current configuration state.
    pub fn state(&self) -> &ConfigurationState {
        &self.state
    }

    /// Replace one attribute's value and republish derived output.
    ///
    /// Edits never re-run control resolution; only the edited attribute's
    /// current value and the snippet are recomputed.
    pub fn apply_edit(&mut self, name: &str, value: PropValue) {
        if self.schema.is_none() {
            tracing::debug!("Edit for {} ignored while loading", name);
            return;
        }

        self.state.set(name.to_string(), value);

        if let Some(exceptions) = exceptions_for(&self.component) {
            if let Some(clamp) = exceptions.clamp {
                clamp(&mut self.state);
            }
        }

        self.refresh_current_values();
        self.publish();
    }

    /// Set or clear the content slot and republish.
    pub fn set_content_slot(&mut self, content: Option<String>) {
        if self.schema.is_none() {
            return;
        }
        self.state.set_content_slot(content);
        self.publish();
    }

    /// Replace the overlay and re-run resolution.
    pub fn set_overlay(&mut self, overlay: Option<RegistryOverlay>) {
        self.overlay = overlay;
        if let Some(schema) = &self.schema {
            self.resolution = resolve_attributes(schema, self.overlay.as_ref(), &self.state);
            self.publish();
        }
    }

    /// Toggle grouped rendering.
    ///
    /// On entering grouped mode the designated selection flag is seeded from
    /// its resolved default if it has no value yet; the individual attribute
    /// defaults play no further part in the group's selection state.
    pub fn set_grouped(&mut self, grouped: bool) {
        self.grouped = grouped;

        if grouped {
            let flag = exceptions_for(&self.component)
                .and_then(|e| e.group.as_ref())
                .map(|g| g.selected_flag.clone());
            if let Some(flag) = flag {
                if self.state.get(&flag).is_none() {
                    let default = self
                        .resolution
                        .attributes
                        .iter()
                        .find(|a| a.name == flag)
                        .and_then(|a| a.default_value.clone())
                        .unwrap_or(PropValue::Bool(false));
                    self.state.set(flag, default);
                    self.refresh_current_values();
                }
            }
        }

        if self.schema.is_some() {
            self.publish();
        }
    }

    /// Whether grouped rendering is active.
    pub fn grouped(&self) -> bool {
        self.grouped
    }

    /// Synthesize the snippet for the current configuration.
    ///
    /// Empty while `Loading`.
    pub fn snippet(&self) -> String {
        let Some(schema) = &self.schema else {
            return String::new();
        };

        let group = self
            .grouped
            .then(|| exceptions_for(&self.component).and_then(|e| e.group.as_ref()))
            .flatten();

        match group {
            Some(group) => {
                synthesize_grouped(&schema.display_name, &self.resolution.attributes, group)
            }
            None => synthesize(
                &schema.display_name,
                &self.resolution.attributes,
                self.state.content_slot(),
                schema.content_bearing,
            ),
        }
    }

    /// Subscribe to published updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ConfiguratorUpdate> {
        self.hub.subscribe()
    }

    /// Mirror the live state into the resolved attributes' current values.
    fn refresh_current_values(&mut self) {
        for attr in &mut self.resolution.attributes {
            attr.current_value = self.state.get(&attr.name).cloned();
        }
    }

    fn publish(&self) {
        let Some(schema) = &self.schema else {
            return;
        };
        self.hub.send(ConfiguratorUpdate {
            component: schema.display_name.clone(),
            values: self.state.values().clone(),
            content_slot: self.state.content_slot().map(str::to_string),
            snippet: self.snippet(),
            language: SNIPPET_LANGUAGE,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inlay_overlay::OverlayEntry;
    use pretty_assertions::assert_eq;

    fn mounted(component: &str) -> Configurator {
        let mut configurator = Configurator::new(component, SchemaSource::fallback_only());
        assert_eq!(configurator.mount(), ConfiguratorPhase::Ready);
        configurator
    }

    #[test]
    fn unknown_component_stays_loading() {
        let mut configurator =
            Configurator::new("NoSuchComponent", SchemaSource::fallback_only());

        assert_eq!(configurator.mount(), ConfiguratorPhase::Loading);
        assert_eq!(configurator.phase(), ConfiguratorPhase::Loading);
        assert!(configurator.attributes().is_empty());
        assert_eq!(configurator.snippet(), "");
    }

    #[test]
    fn mount_seeds_defaults_and_content_placeholder() {
        let configurator = mounted("Button");

        let state = configurator.state();
        assert_eq!(state.get("variant").unwrap().as_str(), Some("primary"));
        assert_eq!(state.get("disabled").unwrap().as_bool(), Some(false));
        assert_eq!(state.content_slot(), Some("Click me"));

        // Everything at its default: the snippet is minimal
        assert_eq!(configurator.snippet(), "<Button>Click me</Button>");
    }

    #[test]
    fn seed_exception_forces_readable_value() {
        let configurator = mounted("TextInput");

        assert_eq!(
            configurator.state().get("placeholder").unwrap().as_str(),
            Some("Type here…")
        );
    }

    #[test]
    fn seed_exception_provides_representative_collection() {
        let configurator = mounted("Select");

        let snippet = configurator.snippet();
        assert!(snippet.contains(r#"options={["Apple","Banana","Cherry"]}"#));
    }

    #[test]
    fn edit_replaces_one_key_and_recomputes_snippet() {
        let mut configurator = mounted("Button");

        configurator.apply_edit("disabled", PropValue::Bool(true));

        assert_eq!(
            configurator.state().get("disabled").unwrap().as_bool(),
            Some(true)
        );
        // Untouched keys keep their values
        assert_eq!(
            configurator.state().get("variant").unwrap().as_str(),
            Some("primary")
        );
        assert_eq!(configurator.snippet(), "<Button disabled>Click me</Button>");
    }

    #[test]
    fn edits_while_loading_are_ignored() {
        let mut configurator =
            Configurator::new("NoSuchComponent", SchemaSource::fallback_only());
        configurator.mount();

        configurator.apply_edit("variant", PropValue::String("ghost".to_string()));

        assert!(configurator.state().is_empty());
    }

    #[test]
    fn clamp_hook_caps_dependent_attribute() {
        let mut configurator = mounted("ProgressBar");

        configurator.apply_edit("max", PropValue::Number(50.0));
        configurator.apply_edit("value", PropValue::Number(120.0));

        assert_eq!(configurator.state().get("value").unwrap().as_number(), Some(50.0));
        assert!(configurator.snippet().contains("value={50}"));
    }

    #[test]
    fn required_attribute_always_in_snippet() {
        let configurator = mounted("Alert");

        // kind equals its default and is still present
        assert!(configurator.snippet().contains(r#"kind="info""#));
    }

    #[test]
    fn stale_overlay_warns_but_renders_everything_else() {
        let overlay = RegistryOverlay::new("Button")
            .entry("legacyProp", OverlayEntry::hide())
            .entry("variant", OverlayEntry::default().with_label("Style"));

        let mut configurator =
            Configurator::new("Button", SchemaSource::fallback_only()).with_overlay(overlay);
        configurator.mount();

        assert_eq!(configurator.stale_entries(), ["legacyProp".to_string()]);
        assert!(configurator.visible_attributes().count() > 0);
        assert!(configurator
            .visible_attributes()
            .all(|a| a.name != "legacyProp"));
    }

    #[test]
    fn hidden_attributes_are_not_seeded() {
        let overlay = RegistryOverlay::new("Button").entry("loading", OverlayEntry::hide());

        let mut configurator =
            Configurator::new("Button", SchemaSource::fallback_only()).with_overlay(overlay);
        configurator.mount();

        assert!(configurator.state().get("loading").is_none());
    }

    #[test]
    fn grouped_mode_switches_template() {
        let mut configurator = mounted("Checkbox");

        configurator.set_grouped(true);

        let snippet = configurator.snippet();
        assert!(snippet.starts_with("<CheckboxGroup>"));
        assert!(snippet.contains(r#"<Checkbox label="Email""#));
        assert!(snippet.ends_with("</CheckboxGroup>"));

        configurator.set_grouped(false);
        assert!(configurator.snippet().starts_with("<Checkbox"));
    }

    #[test]
    fn subscribers_receive_updates_on_edit() {
        let mut configurator = mounted("Button");
        let mut rx = configurator.subscribe();

        configurator.apply_edit("variant", PropValue::String("ghost".to_string()));

        let update = rx.try_recv().expect("update after edit");
        assert_eq!(update.component, "Button");
        assert_eq!(update.language, "tsx");
        assert!(update.snippet.contains(r#"variant="ghost""#));
    }

    #[test]
    fn remount_discards_state() {
        let mut configurator = mounted("Button");
        configurator.apply_edit("disabled", PropValue::Bool(true));

        configurator.remount("Alert");

        assert_eq!(configurator.phase(), ConfiguratorPhase::Ready);
        assert!(configurator.state().get("disabled").is_none());
        assert!(configurator.snippet().starts_with("<Alert"));
    }
}
