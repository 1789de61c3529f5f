//! Core data model for component attribute schemas.

use serde::{Deserialize, Deserializer, Serialize};

/// Primitive attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
}

/// Declared type of an attribute.
///
/// Parsed from the type text that appears in a component's props declaration.
/// Anything that is not a recognized primitive or a clean union of string
/// literals degrades to `Opaque`, which is only ever used as a fallback label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    EnumOfLiterals(Vec<String>),
    Opaque(String),
}

impl TypeDescriptor {
    /// Parse a declared type string.
    ///
    /// Unions of quoted string literals (`'sm' | 'md' | 'lg'`) become
    /// `EnumOfLiterals`. A union with any unquoted member (other than
    /// `undefined`/`null`, which optional props commonly carry) is not a
    /// clean literal union and degrades to `Opaque` rather than erroring.
    pub fn parse(decl: &str) -> Self {
        let decl = decl.trim();

        match decl {
            "string" => return Self::Primitive(PrimitiveKind::String),
            "number" => return Self::Primitive(PrimitiveKind::Number),
            "boolean" => return Self::Primitive(PrimitiveKind::Boolean),
            _ => {}
        }

        if decl.contains('|') {
            let mut literals = Vec::new();
            for token in decl.split('|') {
                let token = token.trim();
                if token == "undefined" || token == "null" {
                    continue;
                }
                match strip_quotes(token) {
                    Some(lit) if !lit.is_empty() => literals.push(lit.to_string()),
                    _ => return Self::Opaque(decl.to_string()),
                }
            }
            if !literals.is_empty() {
                return Self::EnumOfLiterals(literals);
            }
        }

        Self::Opaque(decl.to_string())
    }

    /// Short human-readable label, used for fallback placeholders.
    pub fn label(&self) -> String {
        match self {
            Self::Primitive(PrimitiveKind::String) => "string".to_string(),
            Self::Primitive(PrimitiveKind::Number) => "number".to_string(),
            Self::Primitive(PrimitiveKind::Boolean) => "boolean".to_string(),
            Self::EnumOfLiterals(values) => values.join(" | "),
            Self::Opaque(name) => name.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for TypeDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decl = String::deserialize(deserializer)?;
        Ok(Self::parse(&decl))
    }
}

/// Strip a matching pair of single or double quotes.
fn strip_quotes(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return Some(&token[1..token.len() - 1]);
        }
    }
    None
}

/// The live value of one attribute.
///
/// A tagged union rather than an untyped value, so downstream formatting is
/// an exhaustive match. The untagged serde representation lets the static
/// fallback table spell defaults as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<String>),
    Json(serde_json::Value),
}

impl PropValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as bool if it's a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number if it's a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

/// Schema of one configurable attribute. Immutable once obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    /// Attribute name as declared on the component
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,

    /// Whether the attribute is required
    #[serde(default)]
    pub required: bool,

    /// Default value, if the declaration supplies one
    #[serde(default)]
    pub default_value: Option<PropValue>,

    /// Free-text description from the declaration
    #[serde(default)]
    pub description: Option<String>,
}

/// Schema of one component: its attributes plus display metadata.
///
/// Obtained fresh per configurator mount and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSchema {
    /// Component display name (e.g., "Button")
    pub display_name: String,

    /// Component description
    #[serde(default)]
    pub description: Option<String>,

    /// Configurable attributes, in declaration order
    pub attributes: Vec<AttributeSchema>,

    /// Whether the component carries a content slot (children). The content
    /// slot is never surfaced as an ordinary attribute.
    #[serde(default)]
    pub content_bearing: bool,
}

impl ComponentSchema {
    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primitives() {
        assert_eq!(
            TypeDescriptor::parse("string"),
            TypeDescriptor::Primitive(PrimitiveKind::String)
        );
        assert_eq!(
            TypeDescriptor::parse("number"),
            TypeDescriptor::Primitive(PrimitiveKind::Number)
        );
        assert_eq!(
            TypeDescriptor::parse("boolean"),
            TypeDescriptor::Primitive(PrimitiveKind::Boolean)
        );
    }

    #[test]
    fn parses_literal_union() {
        assert_eq!(
            TypeDescriptor::parse("'sm' | 'md' | 'lg'"),
            TypeDescriptor::EnumOfLiterals(vec![
                "sm".to_string(),
                "md".to_string(),
                "lg".to_string()
            ])
        );
    }

    #[test]
    fn ignores_undefined_in_union() {
        assert_eq!(
            TypeDescriptor::parse("'info' | 'error' | undefined"),
            TypeDescriptor::EnumOfLiterals(vec!["info".to_string(), "error".to_string()])
        );
    }

    #[test]
    fn malformed_union_degrades_to_opaque() {
        assert_eq!(
            TypeDescriptor::parse("'sm' | number"),
            TypeDescriptor::Opaque("'sm' | number".to_string())
        );
        assert_eq!(
            TypeDescriptor::parse("string | string[]"),
            TypeDescriptor::Opaque("string | string[]".to_string())
        );
    }

    #[test]
    fn unknown_type_is_opaque() {
        assert_eq!(
            TypeDescriptor::parse("ReactNode"),
            TypeDescriptor::Opaque("ReactNode".to_string())
        );
    }

    #[test]
    fn prop_value_deserializes_untagged() {
        assert_eq!(
            serde_json::from_str::<PropValue>("true").unwrap(),
            PropValue::Bool(true)
        );
        assert_eq!(
            serde_json::from_str::<PropValue>("3").unwrap(),
            PropValue::Number(3.0)
        );
        assert_eq!(
            serde_json::from_str::<PropValue>(r#""info""#).unwrap(),
            PropValue::String("info".to_string())
        );
        assert_eq!(
            serde_json::from_str::<PropValue>(r#"["a", "b"]"#).unwrap(),
            PropValue::List(vec!["a".to_string(), "b".to_string()])
        );
    }
}
