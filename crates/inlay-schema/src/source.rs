//! Schema resolution: on-demand analyzer with static fallback.
//!
//! Resolution is an explicit two-step try/fallback combinator. Any analyzer
//! failure (absent component, IO error, unanalyzable source) is absorbed and
//! triggers the static table; it never bubbles to the caller.

use std::path::PathBuf;

use walkdir::WalkDir;

use crate::analyzer::{analyze_source, AnalyzerError};
use crate::fallback::fallback_schema;
use crate::model::ComponentSchema;

/// An on-demand schema provider keyed by component name.
pub trait SchemaAnalyzer: Send + Sync {
    /// Analyze the named component, producing its schema.
    fn analyze(&self, component: &str) -> Result<ComponentSchema, AnalyzerError>;
}

/// Analyzer that reads component source files from a directory.
///
/// Lookup is by file stem, case-insensitive, over `.tsx`/`.jsx` files.
#[derive(Debug, Clone)]
pub struct FileAnalyzer {
    components_dir: PathBuf,
}

impl FileAnalyzer {
    /// Create an analyzer over the given components directory.
    pub fn new(components_dir: impl Into<PathBuf>) -> Self {
        Self {
            components_dir: components_dir.into(),
        }
    }
}

impl SchemaAnalyzer for FileAnalyzer {
    fn analyze(&self, component: &str) -> Result<ComponentSchema, AnalyzerError> {
        let wanted = component.to_lowercase();

        for entry in WalkDir::new(&self.components_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "tsx" && ext != "jsx" {
                continue;
            }

            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if stem.to_lowercase() != wanted {
                continue;
            }

            let source = std::fs::read_to_string(path)?;
            return analyze_source(component, &source);
        }

        Err(AnalyzerError::ComponentNotFound(component.to_string()))
    }
}

/// Resolves component schemas: analyzer first, static table second.
pub struct SchemaSource {
    analyzer: Option<Box<dyn SchemaAnalyzer>>,
}

impl SchemaSource {
    /// A source backed only by the static fallback table.
    pub fn fallback_only() -> Self {
        Self { analyzer: None }
    }

    /// A source that consults the given analyzer before the fallback table.
    pub fn with_analyzer(analyzer: Box<dyn SchemaAnalyzer>) -> Self {
        Self {
            analyzer: Some(analyzer),
        }
    }

    /// Resolve the schema for a component.
    ///
    /// Returns `None` only when both the analyzer and the static table come
    /// up empty; the caller is expected to keep rendering a loading state
    /// and may re-trigger resolution by remounting.
    pub fn resolve(&self, component: &str) -> Option<ComponentSchema> {
        if let Some(analyzer) = &self.analyzer {
            match analyzer.analyze(component) {
                Ok(schema) => return Some(schema),
                Err(e) => {
                    tracing::debug!("Analyzer failed for {}: {}; using fallback", component, e);
                }
            }
        }

        fallback_schema(component)
    }
}

impl std::fmt::Debug for SchemaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaSource")
            .field("has_analyzer", &self.analyzer.is_some())
            .finish()
    }
}
