//! Executable schema assembly.
//!
//! [`SchemaAssembler`] translates a [`TypeRegistry`] and its
//! [`RuntimeWiring`] into an `async_graphql::dynamic::Schema` and wraps it in
//! a [`GraphQLExecutor`]. Fields without a bound fetcher resolve by reading
//! the same-named property of their parent value.
//!
//! Subscription root fields are adapted into event streams: a bound fetcher
//! yields a single event, while property resolution over a list value yields
//! one event per element unless the field itself is declared as a list.

use async_graphql::dynamic::{
    DynamicRequestExt, Enum, EnumItem, Field, FieldFuture, FieldValue, InputObject,
    InputValue as DynInputValue, Interface, InterfaceField, Object, ResolverContext, Scalar,
    Schema, SchemaBuilder, Subscription, SubscriptionField, SubscriptionFieldFuture, TypeRef,
    Union,
};
use async_graphql::{Request, Response, Value};
use futures_util::stream::{self, BoxStream};
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::error::SchemaError;
use crate::registry::{
    BUILTIN_SCALARS, FieldDefinition, FieldType, InputValue, OperationKind, TypeDefinition,
    TypeKind, TypeRegistry,
};
use crate::wiring::{RuntimeWiring, TypeWiring};

/// Key read from parent objects to pick the concrete type of an abstract
/// field value.
pub const TYPENAME_KEY: &str = "__typename";

/// Shared, immutable query-execution entry point.
///
/// Cloning is cheap; every clone executes against the same schema.
#[derive(Clone)]
pub struct GraphQLExecutor {
    schema: Schema,
}

impl GraphQLExecutor {
    /// Returns the underlying dynamic schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the schema in SDL form.
    #[must_use]
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    /// Executes a request.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let request: Request = request.into();
        self.schema.execute(request).await
    }

    /// Executes a request with a JSON root value.
    ///
    /// Unbound operation fields resolve to the root value's properties.
    pub async fn execute_with_root(
        &self,
        request: impl Into<Request>,
        root: serde_json::Value,
    ) -> Response {
        let request: Request = request.into();
        let request = request.root_value(FieldValue::value(json_to_graphql_value(root)));
        self.schema.execute(request).await
    }

    /// Executes a subscription, yielding one response per event.
    ///
    /// Queries and mutations sent here produce a single response.
    pub fn subscribe(&self, request: impl Into<Request>) -> BoxStream<'static, Response> {
        let request: Request = request.into();
        self.schema.execute_stream(request)
    }

    /// Executes a subscription with a JSON root value.
    pub fn subscribe_with_root(
        &self,
        request: impl Into<Request>,
        root: serde_json::Value,
    ) -> BoxStream<'static, Response> {
        let request: Request = request.into();
        let request = request.root_value(FieldValue::value(json_to_graphql_value(root)));
        self.schema.execute_stream(request)
    }
}

/// Builds the executable schema from a registry and its wiring.
#[derive(Debug, Clone, Default)]
pub struct SchemaAssembler {
    config: EngineConfig,
}

impl SchemaAssembler {
    /// Creates an assembler applying the given engine limits.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Assembles the executable schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Build` if the registry has no query type or the
    /// engine rejects the schema.
    pub fn assemble(
        &self,
        registry: &TypeRegistry,
        wiring: &RuntimeWiring,
    ) -> Result<GraphQLExecutor, SchemaError> {
        let query = registry
            .operation_type(OperationKind::Query)
            .ok_or_else(|| SchemaError::Build("schema declares no query type".into()))?;
        let mutation = registry.operation_type(OperationKind::Mutation);
        let subscription = registry.operation_type(OperationKind::Subscription);

        for type_wiring in wiring.types() {
            if !registry.contains(type_wiring.type_name()) {
                warn!(type_name = %type_wiring.type_name(), "Wiring provided for a type missing from the schema; ignored");
            }
        }

        debug!(
            query,
            mutation = ?mutation,
            subscription = ?subscription,
            types = registry.len(),
            "Assembling executable schema"
        );

        let mut builder = Schema::build(query, mutation, subscription);
        for ty in registry.types() {
            let type_wiring = wiring.get(&ty.name);
            builder = if subscription == Some(ty.name.as_str()) {
                self.register_subscription(builder, registry, ty, type_wiring)
            } else {
                self.register_type(builder, registry, ty, type_wiring)
            };
        }

        let mut builder = builder
            .limit_depth(self.config.max_depth)
            .limit_complexity(self.config.max_complexity);
        if !self.config.introspection_enabled {
            builder = builder.disable_introspection();
        }

        let schema = builder
            .finish()
            .map_err(|e| SchemaError::Build(e.to_string()))?;

        debug!("Executable schema assembled");
        Ok(GraphQLExecutor { schema })
    }

    fn register_type(
        &self,
        builder: SchemaBuilder,
        registry: &TypeRegistry,
        ty: &TypeDefinition,
        wiring: Option<&TypeWiring>,
    ) -> SchemaBuilder {
        match &ty.kind {
            TypeKind::Scalar => {
                if BUILTIN_SCALARS.contains(&ty.name.as_str()) {
                    trace!(type_name = %ty.name, "Built-in scalar redeclared; skipped");
                    return builder;
                }
                let mut scalar = Scalar::new(&ty.name);
                if let Some(description) = &ty.description {
                    scalar = scalar.description(description);
                }
                builder.register(scalar)
            }
            TypeKind::Object { implements, fields } => {
                let mut object = Object::new(&ty.name);
                if let Some(description) = &ty.description {
                    object = object.description(description);
                }
                for interface in implements {
                    object = object.implement(interface);
                }
                for field in fields {
                    object = object.field(build_field(registry, field, wiring));
                }
                builder.register(object)
            }
            TypeKind::Interface { implements, fields } => {
                let mut interface = Interface::new(&ty.name);
                if let Some(description) = &ty.description {
                    interface = interface.description(description);
                }
                for parent in implements {
                    interface = interface.implement(parent);
                }
                for field in fields {
                    let mut interface_field = InterfaceField::new(&field.name, type_ref(&field.ty));
                    if let Some(description) = &field.description {
                        interface_field = interface_field.description(description);
                    }
                    for argument in &field.arguments {
                        interface_field = interface_field.argument(input_value(argument));
                    }
                    interface = interface.field(interface_field);
                }
                builder.register(interface)
            }
            TypeKind::Union { members } => {
                let mut union = Union::new(&ty.name);
                if let Some(description) = &ty.description {
                    union = union.description(description);
                }
                for member in members {
                    union = union.possible_type(member);
                }
                builder.register(union)
            }
            TypeKind::Enum { values } => {
                let mut enum_type = Enum::new(&ty.name);
                if let Some(description) = &ty.description {
                    enum_type = enum_type.description(description);
                }
                for value in values {
                    let mut item = EnumItem::new(&value.name);
                    if let Some(description) = &value.description {
                        item = item.description(description);
                    }
                    enum_type = enum_type.item(item);
                }
                builder.register(enum_type)
            }
            TypeKind::InputObject { fields } => {
                let mut input = InputObject::new(&ty.name);
                if let Some(description) = &ty.description {
                    input = input.description(description);
                }
                for field in fields {
                    input = input.field(input_value(field));
                }
                builder.register(input)
            }
        }
    }

    /// Registers the subscription root. Any other kind falls through to the
    /// engine, which rejects it at `finish`.
    fn register_subscription(
        &self,
        builder: SchemaBuilder,
        registry: &TypeRegistry,
        ty: &TypeDefinition,
        wiring: Option<&TypeWiring>,
    ) -> SchemaBuilder {
        let TypeKind::Object { fields, .. } = &ty.kind else {
            warn!(type_name = %ty.name, "Subscription root is not an object type");
            return self.register_type(builder, registry, ty, wiring);
        };
        let mut subscription = Subscription::new(&ty.name);
        if let Some(description) = &ty.description {
            subscription = subscription.description(description);
        }
        for field in fields {
            subscription = subscription.field(subscription_field(registry, field, wiring));
        }
        builder.register(subscription)
    }
}

fn subscription_field(
    registry: &TypeRegistry,
    field: &FieldDefinition,
    wiring: Option<&TypeWiring>,
) -> SubscriptionField {
    let fetcher = wiring.and_then(|w| w.resolve_fetcher(&field.name)).cloned();
    let abstract_type = is_abstract_field(registry, field);
    let list_field = field.ty.is_list();
    let key = field.name.clone();

    let mut built = SubscriptionField::new(&field.name, type_ref(&field.ty), move |ctx| {
        if let Some(fetcher) = &fetcher {
            let pending = fetcher.fetch(ctx);
            return SubscriptionFieldFuture::new(async move {
                let event = match pending {
                    FieldFuture::Value(value) => value,
                    FieldFuture::Future(future) => future.await?,
                };
                Ok::<_, async_graphql::Error>(stream::iter(event.map(Ok::<_, async_graphql::Error>)))
            });
        }

        let events: Vec<FieldValue<'_>> = match parent_property(&ctx, &key) {
            Some(Value::List(items)) if !list_field => items
                .into_iter()
                .filter(|item| !matches!(item, Value::Null))
                .map(|item| to_field_value(item, abstract_type))
                .collect(),
            Some(value) => vec![to_field_value(value, abstract_type)],
            None => Vec::new(),
        };
        trace!(field = %key, events = events.len(), "Subscription resolved from parent value");
        SubscriptionFieldFuture::new(async move {
            Ok::<_, async_graphql::Error>(stream::iter(
                events.into_iter().map(Ok::<_, async_graphql::Error>),
            ))
        })
    });
    if let Some(description) = &field.description {
        built = built.description(description);
    }
    for argument in &field.arguments {
        built = built.argument(input_value(argument));
    }
    built
}

fn build_field(registry: &TypeRegistry, field: &FieldDefinition, wiring: Option<&TypeWiring>) -> Field {
    let fetcher = wiring.and_then(|w| w.resolve_fetcher(&field.name)).cloned();
    let mut built = match fetcher {
        Some(fetcher) => Field::new(&field.name, type_ref(&field.ty), move |ctx| fetcher.fetch(ctx)),
        None => property_field(field, is_abstract_field(registry, field)),
    };
    if let Some(description) = &field.description {
        built = built.description(description);
    }
    for argument in &field.arguments {
        built = built.argument(input_value(argument));
    }
    built
}

/// Default resolution: the same-named property of the parent object, or
/// null.
fn property_field(field: &FieldDefinition, abstract_type: bool) -> Field {
    let key = field.name.clone();
    Field::new(&field.name, type_ref(&field.ty), move |ctx| {
        let value = parent_property(&ctx, &key);
        FieldFuture::new(async move { Ok(value.map(|v| to_field_value(v, abstract_type))) })
    })
}

/// The non-null property `key` of the parent object.
fn parent_property(ctx: &ResolverContext<'_>, key: &str) -> Option<Value> {
    match ctx.parent_value.as_value() {
        Some(Value::Object(obj)) => obj.get(key).cloned().filter(|v| !matches!(v, Value::Null)),
        _ => None,
    }
}

fn is_abstract_field(registry: &TypeRegistry, field: &FieldDefinition) -> bool {
    registry
        .get(field.ty.innermost_name())
        .is_some_and(TypeDefinition::is_abstract)
}

fn to_field_value<'a>(value: Value, abstract_type: bool) -> FieldValue<'a> {
    if !abstract_type {
        return FieldValue::value(value);
    }
    if let Value::List(items) = value {
        return FieldValue::list(items.into_iter().map(|item| to_field_value(item, true)));
    }
    let concrete = match &value {
        Value::Object(obj) => match obj.get(TYPENAME_KEY) {
            Some(Value::String(name)) => Some(name.clone()),
            _ => None,
        },
        _ => None,
    };
    match concrete {
        Some(name) => FieldValue::value(value).with_type(name),
        None => FieldValue::value(value),
    }
}

fn type_ref(ty: &FieldType) -> TypeRef {
    match ty {
        FieldType::Named(name) => TypeRef::named(name),
        FieldType::NonNull(inner) => TypeRef::NonNull(Box::new(type_ref(inner))),
        FieldType::List(inner) => TypeRef::List(Box::new(type_ref(inner))),
    }
}

fn input_value(input: &InputValue) -> DynInputValue {
    let mut value = DynInputValue::new(&input.name, type_ref(&input.ty));
    if let Some(description) = &input.description {
        value = value.description(description);
    }
    if let Some(default) = &input.default_value {
        value = value.default_value(default.clone());
    }
    value
}

/// Convert a serde_json::Value to async_graphql::Value.
pub(crate) fn json_to_graphql_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                async_graphql::Number::from_f64(f).map_or(Value::Null, Value::Number)
            } else {
                Value::Null
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::List(arr.into_iter().map(json_to_graphql_value).collect())
        }
        serde_json::Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (async_graphql::Name::new(k), json_to_graphql_value(v)))
                .collect(),
        ),
    }
}
