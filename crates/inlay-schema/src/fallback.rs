//! Static fallback schema table.
//!
//! A process-wide, read-only mapping from component name to schema, embedded
//! at build time. Loaded once on first use and never mutated or torn down.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::model::ComponentSchema;

static FALLBACK_TABLE: LazyLock<HashMap<String, ComponentSchema>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("fallback.json")).unwrap_or_else(|e| {
        // An unparseable embedded table is a packaging defect, but the
        // resolution path must stay non-fatal: degrade to an empty table.
        tracing::warn!("Embedded fallback table is malformed: {}", e);
        HashMap::new()
    })
});

/// Look up a component schema in the static fallback table (case-insensitive).
pub fn fallback_schema(name: &str) -> Option<ComponentSchema> {
    FALLBACK_TABLE.get(&name.to_lowercase()).cloned()
}

/// Names of all components present in the fallback table.
pub fn fallback_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = FALLBACK_TABLE
        .values()
        .map(|s| s.display_name.as_str())
        .collect();
    names.sort_unstable();
    names
}
