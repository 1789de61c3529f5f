//! On-demand schema analyzer for component source files.
//!
//! Extracts a `ComponentSchema` from TSX/JSX source using regex patterns:
//! the props interface supplies names, types, and required-ness; the
//! destructuring pattern supplies default values.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::{AttributeSchema, ComponentSchema, PropValue, TypeDescriptor};

/// Errors that can occur during analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("No props declaration found in source")]
    MissingProps,

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Failed to read component source: {0}")]
    Io(#[from] std::io::Error),
}

static COMPONENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:export\s+)?(?:function|const)\s+([A-Z][a-zA-Z0-9]*)")
        .expect("Invalid component name regex")
});

static PROPS_INTERFACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"interface\s+\w*Props\s*\{([^}]+)\}").expect("Invalid props interface regex")
});

static PROP_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: name?: type; with optional trailing inline comment
    Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_]*)(\?)?\s*:\s*([^;]+?);?\s*(?://\s*(.*))?$")
        .expect("Invalid prop line regex")
});

static DOC_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/\*\*\s*(.*?)\s*\*/$").expect("Invalid doc line regex"));

static DESTRUCTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*([^}]+)\s*\}\s*(?::\s*\w+)?\s*\)").expect("Invalid destructure regex")
});

/// Names that are never surfaced as ordinary attributes.
const RESERVED: &[&str] = &["className", "style", "ref", "key"];

/// Analyze component source and produce its schema.
///
/// The `children` prop is redirected to the content-slot path: it flips the
/// schema's `content_bearing` flag and never appears as an attribute.
pub fn analyze_source(name_hint: &str, source: &str) -> Result<ComponentSchema, AnalyzerError> {
    let interface_body = PROPS_INTERFACE_RE
        .captures(source)
        .map(|c| c.get(1).unwrap().as_str())
        .ok_or(AnalyzerError::MissingProps)?;

    let defaults = extract_defaults(source);

    let mut attributes = Vec::new();
    let mut content_bearing = false;
    let mut pending_doc: Option<String> = None;

    for line in interface_body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = DOC_LINE_RE.captures(line) {
            let doc = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if !doc.is_empty() {
                pending_doc = Some(doc.to_string());
            }
            continue;
        }

        if line.starts_with("//") || line.starts_with('*') || line.starts_with("/*") {
            continue;
        }

        let Some(caps) = PROP_LINE_RE.captures(line) else {
            pending_doc = None;
            continue;
        };

        let name = caps.get(1).unwrap().as_str();
        let optional = caps.get(2).is_some();
        let type_text = caps.get(3).unwrap().as_str().trim();
        let inline_comment = caps.get(4).map(|m| m.as_str().trim().to_string());

        let description = pending_doc.take().or(inline_comment);

        if name == "children" {
            content_bearing = true;
            continue;
        }
        if RESERVED.contains(&name) {
            continue;
        }

        attributes.push(AttributeSchema {
            name: name.to_string(),
            ty: TypeDescriptor::parse(type_text),
            required: !optional,
            default_value: defaults
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone()),
            description,
        });
    }

    if attributes.is_empty() && !content_bearing {
        return Err(AnalyzerError::MissingProps);
    }

    let display_name = COMPONENT_NAME_RE
        .captures(source)
        .map(|c| c.get(1).unwrap().as_str().to_string())
        .unwrap_or_else(|| name_hint.to_string());

    Ok(ComponentSchema {
        display_name,
        description: extract_component_doc(source),
        attributes,
        content_bearing,
    })
}

/// Extract default values from the component's destructuring pattern,
/// e.g. `function Button({ variant = 'primary', disabled = false })`.
fn extract_defaults(source: &str) -> Vec<(String, PropValue)> {
    let mut defaults = Vec::new();

    let Some(caps) = DESTRUCTURE_RE.captures(source) else {
        return defaults;
    };

    let body = caps.get(1).unwrap().as_str();
    for part in body.split(',') {
        let Some((name, literal)) = part.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || name.starts_with("...") {
            continue;
        }
        if let Some(value) = parse_literal(literal.trim()) {
            defaults.push((name.to_string(), value));
        }
    }

    defaults
}

/// Parse a simple source literal into a `PropValue`.
///
/// Handles quoted strings, booleans, and numbers. Anything else (arrays,
/// objects, expressions) is skipped rather than guessed at.
fn parse_literal(literal: &str) -> Option<PropValue> {
    match literal {
        "true" => return Some(PropValue::Bool(true)),
        "false" => return Some(PropValue::Bool(false)),
        _ => {}
    }

    let bytes = literal.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return Some(PropValue::String(literal[1..literal.len() - 1].to_string()));
        }
    }

    literal.parse::<f64>().ok().map(PropValue::Number)
}

/// Extract the leading doc comment above the component declaration, if any.
fn extract_component_doc(source: &str) -> Option<String> {
    static COMPONENT_DOC_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"/\*\*\s*\n\s*\*\s*(.+?)\s*\n[\s\S]*?\*/\s*\n\s*(?:export\s+)?(?:function|const)\s+[A-Z]")
            .expect("Invalid component doc regex")
    });

    COMPONENT_DOC_RE
        .captures(source)
        .map(|c| c.get(1).unwrap().as_str().to_string())
}
