//! Schema document loading.
//!
//! Every regular file in the schema directory is parsed as a schema document
//! and the partial registries are merged into one [`TypeRegistry`].

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::SchemaError;
use crate::registry::TypeRegistry;

/// Loads and merges the schema documents of one directory.
#[derive(Debug, Clone)]
pub struct SchemaRegistryLoader {
    location: PathBuf,
}

impl SchemaRegistryLoader {
    /// Creates a loader for `location`.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Loads every document in the directory into a unified registry.
    ///
    /// # Errors
    ///
    /// - `SchemaError::Configuration` if the directory is missing, is not a
    ///   directory or holds no files.
    /// - `SchemaError::Io` if a document cannot be read.
    /// - `SchemaError::Parse` on syntax errors.
    /// - `SchemaError::Conflict` on incompatible definitions.
    pub fn load(&self) -> Result<TypeRegistry, SchemaError> {
        let files = self.schema_files()?;
        debug!(location = %self.location.display(), files = files.len(), "Loading schema documents");

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            let source = fs::read_to_string(&path).map_err(|source| SchemaError::Io {
                path: path.clone(),
                source,
            })?;
            documents.push((path.display().to_string(), source));
        }

        let registry = Self::from_sources(documents)?;
        info!(
            location = %self.location.display(),
            types = registry.len(),
            "Schema registry loaded"
        );
        Ok(registry)
    }

    /// Parses and merges in-memory documents given as `(origin, source)`.
    ///
    /// # Errors
    ///
    /// `SchemaError::Configuration` if no document is given, otherwise as
    /// [`load`](Self::load).
    pub fn from_sources<I, O, S>(documents: I) -> Result<TypeRegistry, SchemaError>
    where
        I: IntoIterator<Item = (O, S)>,
        O: AsRef<str>,
        S: AsRef<str>,
    {
        let mut merged: Option<TypeRegistry> = None;
        for (origin, source) in documents {
            let partial = TypeRegistry::parse(origin.as_ref(), source.as_ref())?;
            debug!(origin = origin.as_ref(), types = partial.len(), "Parsed schema document");
            merged = Some(match merged {
                Some(registry) => registry.merge(partial)?,
                None => partial,
            });
        }

        merged
            .ok_or_else(|| SchemaError::Configuration("no schema documents found".into()))?
            .apply_extensions()
    }

    fn schema_files(&self) -> Result<Vec<PathBuf>, SchemaError> {
        if !self.location.is_dir() {
            return Err(SchemaError::Configuration(format!(
                "schema location {} is not a readable directory",
                self.location.display()
            )));
        }

        let entries = fs::read_dir(&self.location).map_err(|e| {
            SchemaError::Configuration(format!(
                "cannot list schema location {}: {e}",
                self.location.display()
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SchemaError::Io {
                path: self.location.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(SchemaError::Configuration(format!(
                "schema location {} contains no schema documents",
                self.location.display()
            )));
        }

        // Merge does not depend on order; sorting keeps error reports stable.
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sources_merges_documents() {
        let registry = SchemaRegistryLoader::from_sources([
            ("query.graphqls", "type Query { widget: Widget }"),
            ("widget.graphqls", "type Widget { id: ID }"),
        ])
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Widget"));
    }

    #[test]
    fn test_from_sources_requires_documents() {
        let documents: Vec<(&str, &str)> = Vec::new();
        let err = SchemaRegistryLoader::from_sources(documents).unwrap_err();
        assert!(matches!(err, SchemaError::Configuration(_)));
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = SchemaRegistryLoader::from_sources([
            ("good.graphqls", "type Query { a: Int }"),
            ("bad.graphqls", "type Widget {"),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::Parse { ref origin, .. } if origin == "bad.graphqls"));
    }

    #[test]
    fn test_missing_directory() {
        let loader = SchemaRegistryLoader::new("/definitely/not/here");
        assert!(matches!(loader.load(), Err(SchemaError::Configuration(_))));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let loader = SchemaRegistryLoader::new(dir.path());
        assert!(matches!(loader.load(), Err(SchemaError::Configuration(_))));
    }

    #[test]
    fn test_loads_every_file_and_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("query.graphqls"), "type Query { widget: Widget }").unwrap();
        fs::write(dir.path().join("widget.txt"), "type Widget { id: ID }").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("ignored.graphqls"), "type Ignored { a: Int }")
            .unwrap();

        let registry = SchemaRegistryLoader::new(dir.path()).load().unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.contains("Ignored"));
    }
}
