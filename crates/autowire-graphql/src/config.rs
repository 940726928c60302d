//! GraphQL wiring configuration.
//!
//! Configuration is read once at startup from the `[graphql]` section and is
//! immutable afterwards.
//!
//! # Example Configuration
//!
//! ```toml
//! [graphql]
//! schema_location = "graphql"
//! strategy = "type-builders"
//! data_fetcher_suffix = "DataFetcher"
//! type_builder_suffix = "TypeBuilder"
//! max_depth = 15
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Which wiring strategy resolves components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WiringMode {
    /// Bind operation-type fields to `<field><suffix>` components.
    #[default]
    OperationFields,
    /// Delegate object types to type builders, falling back to field wiring.
    TypeBuilders,
}

/// Suffixes appended to derived component names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Suffix for field resolver lookups.
    /// Default: "DataFetcher"
    #[serde(
        default = "default_data_fetcher_suffix",
        alias = "dataFetcherSuffix",
        alias = "dataFetcherBeanSuffix",
        alias = "data_fetcher_bean_suffix"
    )]
    pub data_fetcher_suffix: String,

    /// Suffix for type builder lookups.
    /// Default: "TypeBuilder"
    #[serde(default = "default_type_builder_suffix", alias = "typeBuilderSuffix")]
    pub type_builder_suffix: String,
}

fn default_data_fetcher_suffix() -> String {
    "DataFetcher".to_string()
}

fn default_type_builder_suffix() -> String {
    "TypeBuilder".to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            data_fetcher_suffix: default_data_fetcher_suffix(),
            type_builder_suffix: default_type_builder_suffix(),
        }
    }
}

/// Limits applied to the execution engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum query depth allowed.
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    pub max_complexity: usize,

    /// Whether to enable introspection queries.
    pub introspection_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_complexity: default_max_complexity(),
            introspection_enabled: default_introspection(),
        }
    }
}

/// GraphQL wiring configuration (`[graphql]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLConfig {
    /// Directory holding the schema documents.
    /// Default: "graphql"
    #[serde(default = "default_schema_location", alias = "schemaLocation")]
    pub schema_location: PathBuf,

    /// Wiring strategy.
    /// Default: operation-fields
    #[serde(default)]
    pub strategy: WiringMode,

    /// Component name suffixes.
    #[serde(flatten)]
    pub naming: NamingConfig,

    /// Maximum query depth allowed.
    /// Default: 15
    #[serde(default = "default_max_depth", alias = "maxDepth")]
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    /// Default: 500
    #[serde(default = "default_max_complexity", alias = "maxComplexity")]
    pub max_complexity: usize,

    /// Enable GraphQL introspection queries.
    /// Default: true
    #[serde(default = "default_introspection")]
    pub introspection: bool,
}

fn default_schema_location() -> PathBuf {
    PathBuf::from("graphql")
}

fn default_max_depth() -> usize {
    15
}

fn default_max_complexity() -> usize {
    500
}

fn default_introspection() -> bool {
    true
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            schema_location: default_schema_location(),
            strategy: WiringMode::default(),
            naming: NamingConfig::default(),
            max_depth: default_max_depth(),
            max_complexity: default_max_complexity(),
            introspection: default_introspection(),
        }
    }
}

impl GraphQLConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Configuration` if a value is unusable.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.schema_location.as_os_str().is_empty() {
            return Err(SchemaError::Configuration(
                "graphql.schema_location must not be empty".into(),
            ));
        }
        if self.naming.data_fetcher_suffix.is_empty() {
            return Err(SchemaError::Configuration(
                "graphql.data_fetcher_suffix must not be empty".into(),
            ));
        }
        if self.naming.type_builder_suffix.is_empty() {
            return Err(SchemaError::Configuration(
                "graphql.type_builder_suffix must not be empty".into(),
            ));
        }
        if self.max_depth == 0 {
            return Err(SchemaError::Configuration("graphql.max_depth must be > 0".into()));
        }
        if self.max_complexity == 0 {
            return Err(SchemaError::Configuration(
                "graphql.max_complexity must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Converts this config to the engine limits used by the assembler.
    #[must_use]
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_depth: self.max_depth,
            max_complexity: self.max_complexity,
            introspection_enabled: self.introspection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GraphQLConfig::default();
        assert_eq!(config.schema_location, PathBuf::from("graphql"));
        assert_eq!(config.strategy, WiringMode::OperationFields);
        assert_eq!(config.naming.data_fetcher_suffix, "DataFetcher");
        assert_eq!(config.naming.type_builder_suffix, "TypeBuilder");
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.max_complexity, 500);
        assert!(config.introspection);
    }

    #[test]
    fn test_valid_config() {
        assert!(GraphQLConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let mut config = GraphQLConfig::default();
        config.naming.data_fetcher_suffix.clear();
        assert!(matches!(config.validate(), Err(SchemaError::Configuration(_))));
    }

    #[test]
    fn test_invalid_max_depth() {
        let mut config = GraphQLConfig::default();
        config.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            schema_location = "schemas"
            strategy = "type-builders"
            data_fetcher_suffix = "Fetcher"
            max_depth = 20
            introspection = false
        "#;

        let config: GraphQLConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.schema_location, PathBuf::from("schemas"));
        assert_eq!(config.strategy, WiringMode::TypeBuilders);
        assert_eq!(config.naming.data_fetcher_suffix, "Fetcher");
        assert_eq!(config.naming.type_builder_suffix, "TypeBuilder");
        assert_eq!(config.max_depth, 20);
        assert!(!config.introspection);
    }

    #[test]
    fn test_deserialize_bean_suffix_alias() {
        let toml = r#"
            dataFetcherBeanSuffix = "Resolver"
            typeBuilderSuffix = "Wiring"
        "#;

        let config: GraphQLConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.naming.data_fetcher_suffix, "Resolver");
        assert_eq!(config.naming.type_builder_suffix, "Wiring");
    }
}
