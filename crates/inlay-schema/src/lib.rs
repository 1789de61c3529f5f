//! Component attribute schemas for the inlay configurator.
//!
//! This crate supplies, for a named component, a declaration of its
//! configurable attributes: an on-demand source analyzer, a static fallback
//! table, and the try/fallback resolution combinator over both.

pub mod analyzer;
pub mod fallback;
pub mod model;
pub mod registry;
pub mod source;

pub use analyzer::{analyze_source, AnalyzerError};
pub use fallback::{fallback_names, fallback_schema};
pub use model::{AttributeSchema, ComponentSchema, PrimitiveKind, PropValue, TypeDescriptor};
pub use registry::{CachedComponent, ComponentRegistry, RegistryError};
pub use source::{FileAnalyzer, SchemaAnalyzer, SchemaSource};
