//! Example snippet synthesis.
//!
//! Produces the minimal idiomatic source snippet reproducing the current
//! configuration: one tag invocation, attributes in display order, defaults
//! suppressed. A pure function of its inputs; identical inputs always yield
//! identical text.

use inlay_schema::PropValue;

use crate::exceptions::{exceptions_for, GroupConfig};
use crate::resolve::ResolvedAttribute;

/// Synthesize the example snippet for one component.
///
/// Inclusion, per attribute in display order: required by the schema, listed
/// in the component's always-emit exceptions, or different from the resolved
/// default. A `false` boolean is never emitted; a `true` one becomes a bare
/// flag. The content slot is emitted as the tag body for content-bearing
/// components, never as an attribute.
///
/// String values are interpolated without quote-escaping; the snippet is
/// documentation text, and this mirrors the behavior of the system the
/// snippet documents.
pub fn synthesize(
    component: &str,
    attributes: &[ResolvedAttribute],
    content_slot: Option<&str>,
    schema_content_bearing: bool,
) -> String {
    let exceptions = exceptions_for(component);
    let always_emit = exceptions.map(|e| e.always_emit).unwrap_or_default();
    let suppress = exceptions.map(|e| e.suppress).unwrap_or_default();
    let content_bearing =
        schema_content_bearing || exceptions.is_some_and(|e| e.content_bearing);

    let mut parts = vec![format!("<{}", component)];

    for attr in attributes {
        if suppress.contains(&attr.name.as_str()) {
            continue;
        }
        if let Some(rendered) = render_attribute(attr, always_emit) {
            parts.push(rendered);
        }
    }

    let open_tag = parts.join(" ");

    match content_slot {
        Some(body) if content_bearing && !body.is_empty() => {
            format!("{}>{}</{}>", open_tag, body, component)
        }
        _ => format!("{} />", open_tag),
    }
}

/// Synthesize the grouped-mode snippet: a container tag embedding one item
/// per representative label, with the shared options applied to every item.
///
/// The designated selection flag is not a shared option; when set, it marks
/// the first item as initially selected.
pub fn synthesize_grouped(
    component: &str,
    attributes: &[ResolvedAttribute],
    group: &GroupConfig,
) -> String {
    let exceptions = exceptions_for(component);
    let always_emit = exceptions.map(|e| e.always_emit).unwrap_or_default();
    let suppress = exceptions.map(|e| e.suppress).unwrap_or_default();

    let shared: Vec<String> = attributes
        .iter()
        .filter(|attr| {
            attr.name != group.item_label_attr
                && attr.name != group.selected_flag
                && !suppress.contains(&attr.name.as_str())
        })
        .filter_map(|attr| render_attribute(attr, always_emit))
        .collect();

    let selected = attributes
        .iter()
        .find(|attr| attr.name == group.selected_flag)
        .and_then(|attr| attr.current_value.as_ref().or(attr.default_value.as_ref()))
        .and_then(PropValue::as_bool)
        .unwrap_or(false);

    let mut lines = vec![format!("<{}>", group.container)];
    for (index, label) in group.item_labels.iter().enumerate() {
        let mut item = vec![format!("<{}", component)];
        item.push(format!(r#"{}="{}""#, group.item_label_attr, label));
        if selected && index == 0 {
            item.push(group.selected_flag.clone());
        }
        item.extend(shared.iter().cloned());
        lines.push(format!("  {} />", item.join(" ")));
    }
    lines.push(format!("</{}>", group.container));

    lines.join("\n")
}

/// Render one attribute if the inclusion rule admits it.
fn render_attribute(attr: &ResolvedAttribute, always_emit: &[&str]) -> Option<String> {
    let value = attr.current_value.as_ref().or(attr.default_value.as_ref())?;

    // A false boolean is never emitted, required or not; a true one is a
    // bare flag.
    if let PropValue::Bool(b) = value {
        return b.then(|| attr.name.clone());
    }

    let forced = attr.required || always_emit.contains(&attr.name.as_str());

    let differs = match value {
        PropValue::Bool(b) => *b,
        PropValue::String(s) => {
            !s.is_empty()
                && attr
                    .default_value
                    .as_ref()
                    .and_then(PropValue::as_str)
                    .is_none_or(|d| d != s)
        }
        PropValue::Number(_) => attr.current_value.is_some(),
        PropValue::List(_) | PropValue::Json(_) => attr.default_value.as_ref() != Some(value),
    };

    if !(forced || differs) {
        return None;
    }

    Some(match value {
        PropValue::Bool(_) => attr.name.clone(),
        PropValue::String(s) => format!(r#"{}="{}""#, attr.name, s),
        PropValue::Number(n) => format!("{}={{{}}}", attr.name, format_number(*n)),
        PropValue::List(items) => format!(
            "{}={{{}}}",
            attr.name,
            serde_json::to_string(items).unwrap_or_default()
        ),
        PropValue::Json(json) => format!(
            "{}={{{}}}",
            attr.name,
            serde_json::to_string(json).unwrap_or_default()
        ),
    })
}

/// Numeric literal syntax: whole numbers without a trailing fraction.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
