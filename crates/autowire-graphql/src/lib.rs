//! # autowire-graphql
//!
//! Convention-based wiring of GraphQL schemas to resolver components.
//!
//! Schema documents are loaded from a directory and merged into one type
//! registry. Resolver components are then looked up by names derived from
//! the schema shape and bound into an executable `async-graphql` schema:
//!
//! - field `foo` of an operation type → `fooDataFetcher`
//! - object type `Widget` → `widgetTypeBuilder`
//! - field `owner: Owner!` → `ownerNonNullDataFetcher`
//!
//! Components that cannot be found leave their field unbound; such fields
//! resolve to the same-named property of their parent value.
//!
//! ## Configuration
//!
//! ```toml
//! [graphql]
//! schema_location = "graphql"
//! strategy = "operation-fields"
//! data_fetcher_suffix = "DataFetcher"
//! type_builder_suffix = "TypeBuilder"
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`error`] - Error types
//! - [`registry`] - Type registry and document merging
//! - [`loader`] - Schema directory loading
//! - [`components`] - Resolver components and their registry
//! - [`naming`] - Component name derivation
//! - [`wiring`] - Wiring strategies and the resolver walk
//! - [`assembler`] - Executable schema assembly
//! - [`pipeline`] - Load, resolve and assemble in one call

pub mod assembler;
pub mod components;
pub mod config;
pub mod error;
pub mod loader;
pub mod naming;
pub mod pipeline;
pub mod registry;
pub mod wiring;

// Re-export main types
pub use assembler::{GraphQLExecutor, SchemaAssembler};
pub use components::{Component, ComponentMap, ComponentRegistry, DataFetcher, TypeBuilder};
pub use config::{EngineConfig, GraphQLConfig, NamingConfig, WiringMode};
pub use error::{ComponentKind, LookupError, SchemaError};
pub use loader::SchemaRegistryLoader;
pub use pipeline::{AssembledSchema, SchemaPipeline, build_executor};
pub use registry::{FieldType, TypeDefinition, TypeRegistry};
pub use wiring::{
    RuntimeWiring, TypeWiring, WiringEvent, WiringOutcome, WiringReport, WiringResolver,
    WiringStrategy,
};

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
