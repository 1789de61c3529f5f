//! Component source registry.
//!
//! Scans a components directory, analyzes source files into schemas, and
//! provides lookup by component name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::analyzer::analyze_source;
use crate::model::ComponentSchema;

/// A registry of analyzed component schemas.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    /// Cached components by name (lowercase)
    components: HashMap<String, CachedComponent>,
}

/// A cached component with its source and analyzed schema.
#[derive(Debug, Clone)]
pub struct CachedComponent {
    /// Original component name
    pub name: String,

    /// Source file path
    pub source_path: PathBuf,

    /// Analyzed schema
    pub schema: ComponentSchema,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a directory for component files and populate the registry.
    pub fn scan(&mut self, components_dir: &Path) -> Result<usize, RegistryError> {
        if !components_dir.exists() {
            return Err(RegistryError::DirectoryNotFound(
                components_dir.display().to_string(),
            ));
        }

        let mut count = 0;

        for entry in WalkDir::new(components_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            // Only process .tsx and .jsx files
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "tsx" && ext != "jsx" {
                continue;
            }

            // Skip test files, stories, and index files
            let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if filename.contains(".test.")
                || filename.contains(".spec.")
                || filename.contains(".stories.")
                || filename == "index.tsx"
                || filename == "index.jsx"
            {
                continue;
            }

            let source = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(_) => continue,
            };

            let name_hint = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown");

            // Skip files the analyzer cannot make sense of
            let schema = match analyze_source(name_hint, &source) {
                Ok(s) => s,
                Err(_) => continue,
            };

            let name = schema.display_name.clone();

            // Store by lowercase name for case-insensitive lookup
            self.components.insert(
                name.to_lowercase(),
                CachedComponent {
                    name,
                    source_path: path.to_path_buf(),
                    schema,
                },
            );
            count += 1;
        }

        Ok(count)
    }

    /// Look up a component by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&CachedComponent> {
        self.components.get(&name.to_lowercase())
    }

    /// Check if a component exists.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(&name.to_lowercase())
    }

    /// Get all registered component names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.values().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Errors that can occur with the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Components directory not found: {0}")]
    DirectoryNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const BADGE: &str = r#"
interface BadgeProps {
  tone?: 'neutral' | 'positive' | 'critical';
  children?: ReactNode;
}

export function Badge({ tone = 'neutral' }: BadgeProps) {
  return <span />;
}
"#;

    #[test]
    fn scans_components_directory() {
        let temp = tempdir().unwrap();
        let comp_dir = temp.path().join("components");
        fs::create_dir_all(&comp_dir).unwrap();
        fs::write(comp_dir.join("badge.tsx"), BADGE).unwrap();

        let mut registry = ComponentRegistry::new();
        let count = registry.scan(&comp_dir).unwrap();

        assert_eq!(count, 1);
        assert!(registry.contains("Badge"));
        assert!(registry.contains("badge"));
    }

    #[test]
    fn skips_test_and_story_files() {
        let temp = tempdir().unwrap();
        let comp_dir = temp.path().join("components");
        fs::create_dir_all(&comp_dir).unwrap();

        fs::write(comp_dir.join("badge.test.tsx"), BADGE).unwrap();
        fs::write(comp_dir.join("badge.stories.tsx"), BADGE).unwrap();
        fs::write(comp_dir.join("index.tsx"), BADGE).unwrap();

        let mut registry = ComponentRegistry::new();
        let count = registry.scan(&comp_dir).unwrap();

        assert_eq!(count, 0);
    }

    #[test]
    fn rescan_picks_up_source_changes() {
        let temp = tempdir().unwrap();
        let comp_dir = temp.path().join("components");
        fs::create_dir_all(&comp_dir).unwrap();
        let path = comp_dir.join("badge.tsx");
        fs::write(&path, BADGE).unwrap();

        let mut registry = ComponentRegistry::new();
        registry.scan(&comp_dir).unwrap();

        fs::write(&path, BADGE.replace("'critical'", "'critical' | 'warning'")).unwrap();
        registry.scan(&comp_dir).unwrap();

        let cached = registry.get("badge").unwrap();
        let tone = cached.schema.attribute("tone").unwrap();
        assert!(tone.ty.label().contains("warning"));
    }

    #[test]
    fn errors_on_missing_directory() {
        let mut registry = ComponentRegistry::new();
        let result = registry.scan(Path::new("/nonexistent/components"));

        assert!(matches!(result, Err(RegistryError::DirectoryNotFound(_))));
    }
}
