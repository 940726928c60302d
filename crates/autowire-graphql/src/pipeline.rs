//! One-shot schema construction.
//!
//! Runs the startup sequence driven by a [`GraphQLConfig`]:
//! validate the configuration, load the schema directory, resolve the wiring
//! against a component registry and assemble the executor.

use std::path::Path;

use tracing::{info, instrument};

use crate::assembler::{GraphQLExecutor, SchemaAssembler};
use crate::components::ComponentRegistry;
use crate::config::GraphQLConfig;
use crate::error::SchemaError;
use crate::loader::SchemaRegistryLoader;
use crate::registry::TypeRegistry;
use crate::wiring::{WiringReport, WiringResolver};

/// Everything produced by a successful pipeline run.
#[derive(Clone)]
pub struct AssembledSchema {
    pub executor: GraphQLExecutor,
    pub registry: TypeRegistry,
    pub report: WiringReport,
}

/// Builds a [`GraphQLExecutor`] from configuration and components.
pub struct SchemaPipeline<'c> {
    config: GraphQLConfig,
    components: &'c dyn ComponentRegistry,
}

impl<'c> SchemaPipeline<'c> {
    #[must_use]
    pub fn new(config: GraphQLConfig, components: &'c dyn ComponentRegistry) -> Self {
        Self { config, components }
    }

    /// Loads the configured schema directory and builds the executor.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`SchemaError`]; component lookup failures
    /// are not fatal and only show up in the report.
    #[instrument(skip_all, fields(location = %self.config.schema_location.display()))]
    pub fn run(&self) -> Result<AssembledSchema, SchemaError> {
        self.config.validate()?;
        let registry = SchemaRegistryLoader::new(&self.config.schema_location).load()?;
        self.assemble(registry)
    }

    /// Builds the executor from in-memory documents, ignoring the configured
    /// schema location.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run).
    pub fn run_sources<I, O, S>(&self, documents: I) -> Result<AssembledSchema, SchemaError>
    where
        I: IntoIterator<Item = (O, S)>,
        O: AsRef<str>,
        S: AsRef<str>,
    {
        self.config.validate()?;
        let registry = SchemaRegistryLoader::from_sources(documents)?;
        self.assemble(registry)
    }

    fn assemble(&self, registry: TypeRegistry) -> Result<AssembledSchema, SchemaError> {
        let resolver = WiringResolver::new(
            self.components,
            self.config.naming.clone(),
            self.config.strategy,
        );
        let (wiring, report) = resolver.resolve(&registry);
        let executor =
            SchemaAssembler::new(self.config.to_engine_config()).assemble(&registry, &wiring)?;

        info!(
            types = registry.len(),
            wired_types = wiring.len(),
            "GraphQL schema ready"
        );
        Ok(AssembledSchema {
            executor,
            registry,
            report,
        })
    }
}

/// Convenience for [`SchemaPipeline::run`] with a schema directory override.
///
/// # Errors
///
/// As [`SchemaPipeline::run`].
pub fn build_executor(
    mut config: GraphQLConfig,
    schema_location: Option<&Path>,
    components: &dyn ComponentRegistry,
) -> Result<AssembledSchema, SchemaError> {
    if let Some(location) = schema_location {
        config.schema_location = location.to_path_buf();
    }
    SchemaPipeline::new(config, components).run()
}
