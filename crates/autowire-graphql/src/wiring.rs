//! Convention-based wiring resolution.
//!
//! [`WiringResolver`] walks a [`TypeRegistry`] and asks a
//! [`ComponentRegistry`] for components under names derived from the schema
//! shape. The result is a [`RuntimeWiring`] (type → field → fetcher) plus a
//! [`WiringReport`] recording every lookup outcome.
//!
//! Two strategies are available:
//!
//! - [`OperationFieldStrategy`]: every field of the operation types is bound
//!   to `fieldName + dataFetcherSuffix`.
//! - [`TypeBuilderStrategy`]: every object type is first offered to a type
//!   builder named `lowerFirst(typeName) + typeBuilderSuffix`; types without
//!   one get automatic field wiring keyed on the referenced type.
//!
//! Missing or broken components never abort the walk: the affected field is
//! left unbound and falls back to default property resolution.

use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use indexmap::IndexMap;
use tracing::{debug, error, info, trace, warn};

use crate::components::{ComponentRegistry, DataFetcher};
use crate::config::{NamingConfig, WiringMode};
use crate::naming;
use crate::registry::{FieldDefinition, TypeDefinition, TypeRegistry};

/// Field bindings for one type.
#[derive(Clone)]
pub struct TypeWiring {
    type_name: String,
    fetchers: IndexMap<String, Arc<dyn DataFetcher>>,
    default_fetcher: Option<Arc<dyn DataFetcher>>,
    builder: Option<String>,
}

impl TypeWiring {
    /// Creates empty wiring for `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fetchers: IndexMap::new(),
            default_fetcher: None,
            builder: None,
        }
    }

    /// Name of the wired type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Binds a resolver closure to `field`.
    #[must_use]
    pub fn data_fetcher<F>(self, field: impl Into<String>, fetcher: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
    {
        self.fetcher(field, Arc::new(fetcher))
    }

    /// Binds a shared fetcher to `field`.
    #[must_use]
    pub fn fetcher(mut self, field: impl Into<String>, fetcher: Arc<dyn DataFetcher>) -> Self {
        self.bind(field, fetcher);
        self
    }

    /// Binds a shared fetcher to `field` in place.
    pub fn bind(&mut self, field: impl Into<String>, fetcher: Arc<dyn DataFetcher>) {
        self.fetchers.insert(field.into(), fetcher);
    }

    /// Sets the fetcher used for every field without an explicit binding.
    #[must_use]
    pub fn default_data_fetcher<F>(mut self, fetcher: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
    {
        self.default_fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Returns the fetcher bound to `field`, if any.
    #[must_use]
    pub fn field_fetcher(&self, field: &str) -> Option<&Arc<dyn DataFetcher>> {
        self.fetchers.get(field)
    }

    /// Returns the type-wide default fetcher, if any.
    #[must_use]
    pub fn default_fetcher(&self) -> Option<&Arc<dyn DataFetcher>> {
        self.default_fetcher.as_ref()
    }

    /// Returns the fetcher used for `field`: its own binding, else the
    /// type default.
    #[must_use]
    pub fn resolve_fetcher(&self, field: &str) -> Option<&Arc<dyn DataFetcher>> {
        self.field_fetcher(field).or(self.default_fetcher.as_ref())
    }

    /// Names of the explicitly bound fields.
    pub fn bound_fields(&self) -> impl Iterator<Item = &str> {
        self.fetchers.keys().map(String::as_str)
    }

    /// Returns `true` if no field is bound and no default is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty() && self.default_fetcher.is_none()
    }

    /// Name of the type builder that produced this wiring.
    #[must_use]
    pub fn builder(&self) -> Option<&str> {
        self.builder.as_deref()
    }
}

impl fmt::Debug for TypeWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeWiring")
            .field("type_name", &self.type_name)
            .field("fields", &self.fetchers.keys().collect::<Vec<_>>())
            .field("default_fetcher", &self.default_fetcher.is_some())
            .field("builder", &self.builder)
            .finish()
    }
}

/// Wiring for every type, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct RuntimeWiring {
    types: IndexMap<String, TypeWiring>,
}

impl RuntimeWiring {
    /// Creates empty wiring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the wiring of a type.
    pub fn insert(&mut self, wiring: TypeWiring) {
        self.types.insert(wiring.type_name.clone(), wiring);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_type(mut self, wiring: TypeWiring) -> Self {
        self.insert(wiring);
        self
    }

    /// Returns the wiring of a type.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&TypeWiring> {
        self.types.get(type_name)
    }

    /// Iterates over all wired types.
    pub fn types(&self) -> impl Iterator<Item = &TypeWiring> {
        self.types.values()
    }

    /// Number of wired types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type is wired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Result of one wiring decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringOutcome {
    /// A data fetcher was bound to the field.
    Bound,
    /// The type was handed to a type builder.
    Delegated,
    /// No component is registered under the derived name.
    NotFound,
    /// The component exists but could not be used.
    Failed(String),
    /// The field references a leaf or nested-wrapped type; no lookup made.
    Skipped,
}

/// One entry of a [`WiringReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiringEvent {
    pub type_name: String,
    /// `None` for type-level decisions.
    pub field: Option<String>,
    /// Derived component name; `None` when no lookup was made.
    pub component: Option<String>,
    pub outcome: WiringOutcome,
}

/// Ordered record of every wiring decision.
#[derive(Debug, Clone, Default)]
pub struct WiringReport {
    events: Vec<WiringEvent>,
}

impl WiringReport {
    fn record(
        &mut self,
        type_name: &str,
        field: Option<&str>,
        component: Option<&str>,
        outcome: WiringOutcome,
    ) {
        self.events.push(WiringEvent {
            type_name: type_name.to_string(),
            field: field.map(str::to_string),
            component: component.map(str::to_string),
            outcome,
        });
    }

    /// All recorded events in walk order.
    #[must_use]
    pub fn events(&self) -> &[WiringEvent] {
        &self.events
    }

    /// Component names that were looked up, in walk order.
    pub fn lookups(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| e.component.as_deref())
    }

    /// Events with the given outcome.
    pub fn with_outcome<'a>(
        &'a self,
        outcome: &'a WiringOutcome,
    ) -> impl Iterator<Item = &'a WiringEvent> + 'a {
        self.events.iter().filter(move |e| e.outcome == *outcome)
    }

    /// Outcome recorded for a field, if it was visited.
    #[must_use]
    pub fn field_outcome(&self, type_name: &str, field: &str) -> Option<&WiringOutcome> {
        self.events
            .iter()
            .find(|e| e.type_name == type_name && e.field.as_deref() == Some(field))
            .map(|e| &e.outcome)
    }

    /// Outcome of the type-level decision for a type, if one was made.
    #[must_use]
    pub fn type_outcome(&self, type_name: &str) -> Option<&WiringOutcome> {
        self.events
            .iter()
            .find(|e| e.type_name == type_name && e.field.is_none())
            .map(|e| &e.outcome)
    }

    /// Number of components that could not be used for reasons other than
    /// being absent.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.outcome, WiringOutcome::Failed(_)))
            .count()
    }
}

/// Log level for lookup failures other than "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSeverity {
    Warn,
    Error,
}

/// State shared with a strategy while it wires one registry.
pub struct WiringContext<'a> {
    pub registry: &'a TypeRegistry,
    pub components: &'a dyn ComponentRegistry,
    pub naming: &'a NamingConfig,
    report: &'a mut WiringReport,
}

impl WiringContext<'_> {
    /// Looks up a data fetcher for `field` and records the outcome.
    ///
    /// Returns `None` when the component is absent or unusable; the caller
    /// leaves the field unbound.
    pub fn lookup_fetcher(
        &mut self,
        type_name: &str,
        field: &str,
        component: &str,
        severity: FailureSeverity,
    ) -> Option<Arc<dyn DataFetcher>> {
        match self.components.data_fetcher(component) {
            Ok(fetcher) => {
                debug!(type_name, field, component, "Bound data fetcher");
                self.report
                    .record(type_name, Some(field), Some(component), WiringOutcome::Bound);
                Some(fetcher)
            }
            Err(e) if e.is_not_found() => {
                warn!(type_name, field, component, "No data fetcher registered; field left unbound");
                self.report
                    .record(type_name, Some(field), Some(component), WiringOutcome::NotFound);
                None
            }
            Err(e) => {
                match severity {
                    FailureSeverity::Warn => {
                        warn!(type_name, field, component, error = %e, "Data fetcher unavailable; field left unbound");
                    }
                    FailureSeverity::Error => {
                        error!(type_name, field, component, error = %e, "Data fetcher unavailable; field left unbound");
                    }
                }
                self.report.record(
                    type_name,
                    Some(field),
                    Some(component),
                    WiringOutcome::Failed(e.to_string()),
                );
                None
            }
        }
    }

    /// Records a field that is not looked up.
    pub fn skip_field(&mut self, type_name: &str, field: &str) {
        trace!(type_name, field, "Field references no wireable type; skipped");
        self.report
            .record(type_name, Some(field), None, WiringOutcome::Skipped);
    }

    fn record_type(&mut self, type_name: &str, component: &str, outcome: WiringOutcome) {
        self.report.record(type_name, None, Some(component), outcome);
    }
}

/// Decides which types are wired and how.
pub trait WiringStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Types this strategy wires, in walk order.
    fn target_types<'r>(&self, registry: &'r TypeRegistry) -> Vec<&'r TypeDefinition>;

    /// Produces the wiring of one target type.
    fn wire_type(&self, ty: &TypeDefinition, ctx: &mut WiringContext<'_>) -> TypeWiring;
}

/// Returns the strategy selected by configuration.
#[must_use]
pub fn strategy_for(mode: WiringMode) -> Box<dyn WiringStrategy> {
    match mode {
        WiringMode::OperationFields => Box::new(OperationFieldStrategy),
        WiringMode::TypeBuilders => Box::new(TypeBuilderStrategy),
    }
}

/// Binds each field of the operation types to `fieldName + suffix`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationFieldStrategy;

impl WiringStrategy for OperationFieldStrategy {
    fn name(&self) -> &'static str {
        "operation-fields"
    }

    fn target_types<'r>(&self, registry: &'r TypeRegistry) -> Vec<&'r TypeDefinition> {
        let mut targets: Vec<&TypeDefinition> = Vec::new();
        for (kind, type_name) in registry.operation_types() {
            match registry.get(type_name) {
                Some(ty) if ty.is_object() => {
                    if !targets.iter().any(|t| t.name == ty.name) {
                        targets.push(ty);
                    }
                }
                Some(_) => warn!(operation = %kind, type_name, "Operation type is not an object type"),
                None => warn!(operation = %kind, type_name, "Operation type is not defined"),
            }
        }
        targets
    }

    fn wire_type(&self, ty: &TypeDefinition, ctx: &mut WiringContext<'_>) -> TypeWiring {
        let mut wiring = TypeWiring::new(&ty.name);
        for field in ty.fields() {
            let component = naming::operation_fetcher_name(&field.name, ctx.naming);
            if let Some(fetcher) =
                ctx.lookup_fetcher(&ty.name, &field.name, &component, FailureSeverity::Warn)
            {
                wiring.bind(&field.name, fetcher);
            }
        }
        wiring
    }
}

/// Offers each object type to a type builder, falling back to automatic
/// field wiring keyed on the referenced type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeBuilderStrategy;

impl TypeBuilderStrategy {
    fn wire_fields(ty: &TypeDefinition, ctx: &mut WiringContext<'_>) -> TypeWiring {
        let mut wiring = TypeWiring::new(&ty.name);
        for field in ty.fields() {
            match Self::field_component(field, ctx) {
                Some(component) => {
                    if let Some(fetcher) =
                        ctx.lookup_fetcher(&ty.name, &field.name, &component, FailureSeverity::Error)
                    {
                        wiring.bind(&field.name, fetcher);
                    }
                }
                None => ctx.skip_field(&ty.name, &field.name),
            }
        }
        wiring
    }

    /// Derived fetcher name, or `None` if the field references a leaf type
    /// or a type nested in more than one wrapper.
    fn field_component(field: &FieldDefinition, ctx: &WiringContext<'_>) -> Option<String> {
        let (type_name, wrapper) = naming::unwrap_one(&field.ty)?;
        if !ctx.registry.is_composite(type_name) {
            return None;
        }
        Some(naming::field_fetcher_name(type_name, wrapper, ctx.naming))
    }
}

impl WiringStrategy for TypeBuilderStrategy {
    fn name(&self) -> &'static str {
        "type-builders"
    }

    fn target_types<'r>(&self, registry: &'r TypeRegistry) -> Vec<&'r TypeDefinition> {
        registry.object_types().collect()
    }

    fn wire_type(&self, ty: &TypeDefinition, ctx: &mut WiringContext<'_>) -> TypeWiring {
        let component = naming::type_builder_name(&ty.name, ctx.naming);
        match ctx.components.type_builder(&component) {
            Ok(builder) => {
                debug!(type_name = %ty.name, component = %component, "Delegating type wiring to type builder");
                ctx.record_type(&ty.name, &component, WiringOutcome::Delegated);
                let mut wiring = builder.wiring(TypeWiring::new(&ty.name));
                wiring.type_name = ty.name.clone();
                wiring.builder = Some(component);
                wiring
            }
            Err(e) if e.is_not_found() => {
                warn!(type_name = %ty.name, component = %component, "No type builder registered; wiring fields automatically");
                ctx.record_type(&ty.name, &component, WiringOutcome::NotFound);
                Self::wire_fields(ty, ctx)
            }
            Err(e) => {
                error!(type_name = %ty.name, component = %component, error = %e, "Type builder unavailable; wiring fields automatically");
                ctx.record_type(&ty.name, &component, WiringOutcome::Failed(e.to_string()));
                Self::wire_fields(ty, ctx)
            }
        }
    }
}

/// Walks a registry with a [`WiringStrategy`] and resolves components.
pub struct WiringResolver<'c> {
    components: &'c dyn ComponentRegistry,
    naming: NamingConfig,
    strategy: Box<dyn WiringStrategy>,
}

impl<'c> WiringResolver<'c> {
    /// Creates a resolver using the strategy selected by `mode`.
    #[must_use]
    pub fn new(components: &'c dyn ComponentRegistry, naming: NamingConfig, mode: WiringMode) -> Self {
        Self::with_strategy(components, naming, strategy_for(mode))
    }

    /// Creates a resolver with an explicit strategy.
    #[must_use]
    pub fn with_strategy(
        components: &'c dyn ComponentRegistry,
        naming: NamingConfig,
        strategy: Box<dyn WiringStrategy>,
    ) -> Self {
        Self {
            components,
            naming,
            strategy,
        }
    }

    /// Resolves the wiring of `registry`.
    ///
    /// Never fails: unresolvable components are recorded in the report and
    /// the affected fields stay unbound.
    pub fn resolve(&self, registry: &TypeRegistry) -> (RuntimeWiring, WiringReport) {
        debug!(strategy = self.strategy.name(), types = registry.len(), "Resolving runtime wiring");

        let mut report = WiringReport::default();
        let mut wiring = RuntimeWiring::new();
        let mut ctx = WiringContext {
            registry,
            components: self.components,
            naming: &self.naming,
            report: &mut report,
        };

        for ty in self.strategy.target_types(registry) {
            let type_wiring = self.strategy.wire_type(ty, &mut ctx);
            trace!(type_name = %ty.name, bound = type_wiring.fetchers.len(), "Type wired");
            wiring.insert(type_wiring);
        }

        info!(
            strategy = self.strategy.name(),
            bound = report.with_outcome(&WiringOutcome::Bound).count(),
            delegated = report.with_outcome(&WiringOutcome::Delegated).count(),
            missing = report.with_outcome(&WiringOutcome::NotFound).count(),
            failed = report.failure_count(),
            "Runtime wiring resolved"
        );
        (wiring, report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_graphql::Value;

    use super::*;
    use crate::components::{Component, ComponentMap, TypeBuilder};
    use crate::error::LookupError;

    fn constant(_ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async { Ok(Some(Value::Null)) })
    }

    fn registry(source: &str) -> TypeRegistry {
        TypeRegistry::parse("test.graphqls", source).unwrap()
    }

    /// Records every looked-up name before delegating.
    struct Recording {
        inner: ComponentMap,
        seen: Mutex<Vec<String>>,
    }

    impl Recording {
        fn new(inner: ComponentMap) -> Self {
            Self {
                inner,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl ComponentRegistry for Recording {
        fn lookup(&self, name: &str) -> Result<Component, LookupError> {
            self.seen.lock().unwrap().push(name.to_string());
            self.inner.lookup(name)
        }
    }

    struct IdOnly;

    impl TypeBuilder for IdOnly {
        fn wiring(&self, wiring: TypeWiring) -> TypeWiring {
            wiring.data_fetcher("id", constant)
        }
    }

    #[test]
    fn test_operation_fields_bind_by_field_name() {
        let registry = registry("type Query { foo: String bar: Int } type Widget { id: ID }");
        let components = ComponentMap::new().with_data_fetcher("fooDataFetcher", constant);

        let resolver = WiringResolver::new(&components, NamingConfig::default(), WiringMode::OperationFields);
        let (wiring, report) = resolver.resolve(&registry);

        let query = wiring.get("Query").unwrap();
        assert!(query.field_fetcher("foo").is_some());
        assert!(query.field_fetcher("bar").is_none());
        assert!(wiring.get("Widget").is_none());
        assert_eq!(report.field_outcome("Query", "foo"), Some(&WiringOutcome::Bound));
        assert_eq!(report.field_outcome("Query", "bar"), Some(&WiringOutcome::NotFound));
    }

    #[test]
    fn test_operation_fields_cover_mutation_type() {
        let registry = registry(
            "schema { query: Root mutation: Change }
             type Root { a: Int } type Change { b: Int }",
        );
        let components = Recording::new(ComponentMap::new());
        let resolver = WiringResolver::new(&components, NamingConfig::default(), WiringMode::OperationFields);
        resolver.resolve(&registry);
        assert_eq!(components.seen(), ["aDataFetcher", "bDataFetcher"]);
    }

    #[test]
    fn test_operation_fields_tolerate_failing_component() {
        let registry = registry("type Query { foo: String }");
        let mut components = ComponentMap::new();
        components.register_factory("fooDataFetcher", || Err("boom".into()));

        let resolver = WiringResolver::new(&components, NamingConfig::default(), WiringMode::OperationFields);
        let (wiring, report) = resolver.resolve(&registry);

        assert!(wiring.get("Query").unwrap().is_empty());
        assert!(matches!(
            report.field_outcome("Query", "foo"),
            Some(WiringOutcome::Failed(reason)) if reason.contains("boom")
        ));
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn test_type_builder_takes_over_type() {
        let registry = registry(
            "type Query { widget: Widget } type Widget { id: ID owner: Owner } type Owner { id: ID }",
        );
        let components = Recording::new(
            ComponentMap::new()
                .with_type_builder("widgetTypeBuilder", IdOnly)
                .with_data_fetcher("ownerDataFetcher", constant),
        );

        let resolver = WiringResolver::new(&components, NamingConfig::default(), WiringMode::TypeBuilders);
        let (wiring, report) = resolver.resolve(&registry);

        let widget = wiring.get("Widget").unwrap();
        assert_eq!(widget.builder(), Some("widgetTypeBuilder"));
        assert_eq!(widget.bound_fields().collect::<Vec<_>>(), ["id"]);
        assert_eq!(report.type_outcome("Widget"), Some(&WiringOutcome::Delegated));
        assert!(report.field_outcome("Widget", "owner").is_none());
        // Widget.owner would have been `ownerDataFetcher`; it must not be asked for.
        assert_eq!(
            components.seen(),
            ["queryTypeBuilder", "widgetDataFetcher", "widgetTypeBuilder", "ownerTypeBuilder"]
        );
    }

    #[test]
    fn test_fallback_uses_wrapper_marker() {
        let registry = registry(
            "type Query { widget: Widget } type Widget { owner: Owner! previous: [Owner] name: String } type Owner { id: ID }",
        );
        let components = Recording::new(
            ComponentMap::new().with_data_fetcher("ownerNonNullDataFetcher", constant),
        );

        let resolver = WiringResolver::new(&components, NamingConfig::default(), WiringMode::TypeBuilders);
        let (wiring, report) = resolver.resolve(&registry);

        let widget = wiring.get("Widget").unwrap();
        assert!(widget.field_fetcher("owner").is_some());
        assert!(widget.field_fetcher("previous").is_none());
        assert_eq!(report.field_outcome("Widget", "previous"), Some(&WiringOutcome::NotFound));
        assert_eq!(report.field_outcome("Widget", "name"), Some(&WiringOutcome::Skipped));
        let seen = components.seen();
        assert!(seen.contains(&"ownerListDataFetcher".to_string()));
        assert!(!seen.iter().any(|n| n.starts_with("string")));
    }

    #[test]
    fn test_fallback_covers_interfaces_and_unions() {
        let registry = registry(
            "type Query { node: Node things: [Thing] }
             interface Node { id: ID }
             type Widget implements Node { id: ID }
             union Thing = Widget",
        );
        let components = Recording::new(
            ComponentMap::new().with_data_fetcher("nodeDataFetcher", constant),
        );

        let resolver = WiringResolver::new(&components, NamingConfig::default(), WiringMode::TypeBuilders);
        let (wiring, report) = resolver.resolve(&registry);

        assert!(wiring.get("Query").unwrap().field_fetcher("node").is_some());
        assert_eq!(report.field_outcome("Query", "node"), Some(&WiringOutcome::Bound));
        assert_eq!(report.field_outcome("Query", "things"), Some(&WiringOutcome::NotFound));
        assert_eq!(
            components.seen(),
            ["queryTypeBuilder", "nodeDataFetcher", "thingListDataFetcher", "widgetTypeBuilder"]
        );
    }

    #[test]
    fn test_scalar_fields_never_looked_up() {
        let registry = registry(
            "scalar Date enum Size { S M } type Query { widget: Widget } type Widget { name: String! at: Date size: Size }",
        );
        let components = Recording::new(
            ComponentMap::new()
                .with_data_fetcher("stringNonNullDataFetcher", constant)
                .with_data_fetcher("dateDataFetcher", constant)
                .with_data_fetcher("sizeDataFetcher", constant),
        );

        let resolver = WiringResolver::new(&components, NamingConfig::default(), WiringMode::TypeBuilders);
        let (wiring, _) = resolver.resolve(&registry);

        assert!(wiring.get("Widget").unwrap().is_empty());
        assert_eq!(
            components.seen(),
            ["queryTypeBuilder", "widgetDataFetcher", "widgetTypeBuilder"]
        );
    }

    #[test]
    fn test_nested_wrappers_are_skipped() {
        let registry = registry("type Query { owners: [Owner!]! } type Owner { id: ID }");
        let components = Recording::new(ComponentMap::new());

        let resolver = WiringResolver::new(&components, NamingConfig::default(), WiringMode::TypeBuilders);
        let (_, report) = resolver.resolve(&registry);

        assert_eq!(report.field_outcome("Query", "owners"), Some(&WiringOutcome::Skipped));
        assert_eq!(components.seen(), ["queryTypeBuilder", "ownerTypeBuilder"]);
    }

    #[test]
    fn test_broken_type_builder_falls_back_to_fields() {
        let registry = registry("type Query { widget: Widget } type Widget { id: ID }");
        let components = ComponentMap::new()
            .with_data_fetcher("queryTypeBuilder", constant)
            .with_data_fetcher("widgetDataFetcher", constant);

        let resolver = WiringResolver::new(&components, NamingConfig::default(), WiringMode::TypeBuilders);
        let (wiring, report) = resolver.resolve(&registry);

        assert!(matches!(report.type_outcome("Query"), Some(WiringOutcome::Failed(_))));
        assert!(wiring.get("Query").unwrap().field_fetcher("widget").is_some());
        assert!(wiring.get("Query").unwrap().builder().is_none());
    }

    #[test]
    fn test_strategy_for_mode() {
        assert_eq!(strategy_for(WiringMode::OperationFields).name(), "operation-fields");
        assert_eq!(strategy_for(WiringMode::TypeBuilders).name(), "type-builders");
    }
}
