//! Application configuration.
//!
//! Loaded from `autowire.toml` (or the `--config` path) with environment
//! overrides such as `AUTOWIRE__GRAPHQL__STRATEGY=type-builders`.

use std::path::{Path, PathBuf};

use autowire_graphql::GraphQLConfig;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "autowire.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub graphql: GraphQLConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.graphql.validate().map_err(|e| e.to_string())?;
        if self.logging.level.trim().is_empty() {
            return Err("logging.level must not be empty".into());
        }
        Ok(())
    }
}

/// Loads configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] when it
/// exists.
///
/// An explicitly given file must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, String> {
    let mut builder = Config::builder();
    match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("config file {} not found", p.display()));
            }
            builder = builder.add_source(File::from(p.to_path_buf()));
        }
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                builder = builder.add_source(File::from(default_path));
            }
        }
    }
    // Environment variable overrides, e.g., AUTOWIRE__GRAPHQL__MAX_DEPTH=20
    builder = builder.add_source(
        Environment::with_prefix("AUTOWIRE")
            .try_parsing(true)
            .separator("__"),
    );
    let cfg = builder
        .build()
        .map_err(|e| format!("config build error: {e}"))?;
    let merged: AppConfig = cfg
        .try_deserialize()
        .map_err(|e| format!("config deserialize error: {e}"))?;
    merged.validate()?;
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use autowire_graphql::WiringMode;

    use super::*;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[graphql]
schema_location = "schemas"
strategy = "type-builders"
data_fetcher_suffix = "Fetcher"
max_depth = 8

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.graphql.schema_location, PathBuf::from("schemas"));
        assert_eq!(cfg.graphql.strategy, WiringMode::TypeBuilders);
        assert_eq!(cfg.graphql.naming.data_fetcher_suffix, "Fetcher");
        assert_eq!(cfg.graphql.naming.type_builder_suffix, "TypeBuilder");
        assert_eq!(cfg.graphql.max_depth, 8);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[graphql]\nmax_complexity = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.contains("max_complexity"));
    }
}
