//! Control resolution.
//!
//! Maps an attribute schema plus its optional overlay entry to the control
//! that edits it. The rule order is fixed and exhaustive: the first matching
//! rule wins, and the final rule is an unconditional fallback, so resolution
//! is total and never errors.

use serde::{Deserialize, Serialize};

use inlay_schema::{AttributeSchema, PrimitiveKind, TypeDescriptor};

use crate::entry::OverlayEntry;
use crate::palette::palette_options;

/// Category of interactive input used to edit one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Tab-style exclusive choice
    RadioTabGroup,
    /// On/off switch
    Toggle,
    /// Searchable option list seeded from the theme palette
    ColorSelect,
    /// Free-text field (also the last-resort fallback)
    TextField,
}

/// One selectable option of a choice-style control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlOption {
    pub id: String,
    pub value: String,
    pub label: String,
}

impl ControlOption {
    /// Option whose id, value, and label are all the same text.
    pub fn uniform(text: &str) -> Self {
        Self {
            id: text.to_string(),
            value: text.to_string(),
            label: text.to_string(),
        }
    }
}

/// A resolved control: kind plus the data its widget needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedControl {
    pub kind: ControlKind,

    /// Options for choice-style controls; empty otherwise
    #[serde(default)]
    pub options: Vec<ControlOption>,

    /// Placeholder text for the last-resort free-text fallback
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl ResolvedControl {
    fn bare(kind: ControlKind) -> Self {
        Self {
            kind,
            options: Vec::new(),
            placeholder: None,
        }
    }
}

/// Resolve the control for an attribute.
///
/// Precedence, highest first:
/// 1. An overlay-forced kind (with its explicit options) wins outright.
/// 2. A union of string literals becomes a tab group over the literals.
/// 3. A boolean becomes a toggle.
/// 4. A colour-named attribute becomes a palette-backed select.
/// 5. A plain string becomes a free-text field.
/// 6. Everything else becomes a free-text field with a type placeholder.
pub fn resolve_control(attr: &AttributeSchema, overlay: Option<&OverlayEntry>) -> ResolvedControl {
    // Rule 1: overlay wins outright
    if let Some(entry) = overlay {
        if let Some(kind) = entry.control_kind {
            let options = entry
                .explicit_options
                .as_ref()
                .map(|opts| opts.iter().map(|o| ControlOption::uniform(o)).collect())
                .unwrap_or_else(|| inferred_options(attr));
            return ResolvedControl {
                kind,
                options,
                placeholder: None,
            };
        }
    }

    // Rule 2: literal unions become tab groups
    if let TypeDescriptor::EnumOfLiterals(values) = &attr.ty {
        return ResolvedControl {
            kind: ControlKind::RadioTabGroup,
            options: values.iter().map(|v| ControlOption::uniform(v)).collect(),
            placeholder: None,
        };
    }

    // Rule 3: booleans become toggles
    if attr.ty == TypeDescriptor::Primitive(PrimitiveKind::Boolean) {
        return ResolvedControl::bare(ControlKind::Toggle);
    }

    // Rule 4: colour-named attributes get the palette select
    if is_color_named(&attr.name) {
        return ResolvedControl {
            kind: ControlKind::ColorSelect,
            options: palette_options(),
            placeholder: None,
        };
    }

    // Rule 5: plain strings become free text
    if attr.ty == TypeDescriptor::Primitive(PrimitiveKind::String) {
        return ResolvedControl::bare(ControlKind::TextField);
    }

    // Rule 6: unconditional fallback
    ResolvedControl {
        kind: ControlKind::TextField,
        options: Vec::new(),
        placeholder: Some(attr.ty.label()),
    }
}

/// Case-insensitive colour-naming heuristic.
fn is_color_named(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("color") || lower.contains("colour")
}

/// Options inferable from the declared type, for overlay-forced kinds that
/// name no explicit options.
fn inferred_options(attr: &AttributeSchema) -> Vec<ControlOption> {
    match &attr.ty {
        TypeDescriptor::EnumOfLiterals(values) => {
            values.iter().map(|v| ControlOption::uniform(v)).collect()
        }
        _ => Vec::new(),
    }
}
