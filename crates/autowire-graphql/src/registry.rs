//! Unified type registry built from schema documents.
//!
//! A [`TypeRegistry`] is the merged view of every parsed schema document:
//! type definitions keyed by name, the designated operation types and the
//! `extend type` definitions that still have to be folded in. Registries are
//! produced per document by [`TypeRegistry::parse`] and combined with
//! [`TypeRegistry::merge`], which is insensitive to the order documents are
//! merged in.

use std::fmt;

use async_graphql_parser::types::{
    BaseType, FieldDefinition as ParsedField, InputValueDefinition, SchemaDefinition,
    ServiceDocument, Type, TypeDefinition as ParsedType, TypeKind as ParsedKind,
    TypeSystemDefinition,
};
use async_graphql_value::ConstValue;
use indexmap::IndexMap;
use tracing::trace;

use crate::error::SchemaError;

/// Built-in scalar names provided by every GraphQL engine.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Declared type of a field, argument or input field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A reference to a type by name.
    Named(String),
    /// A non-null wrapper.
    NonNull(Box<FieldType>),
    /// A list wrapper.
    List(Box<FieldType>),
}

impl FieldType {
    /// Creates a named reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps a type in a non-null wrapper.
    #[must_use]
    pub fn non_null(inner: FieldType) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Wraps a type in a list wrapper.
    #[must_use]
    pub fn list(inner: FieldType) -> Self {
        Self::List(Box::new(inner))
    }

    /// Returns the innermost named type, unwrapping every wrapper.
    #[must_use]
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::NonNull(inner) | Self::List(inner) => inner.innermost_name(),
        }
    }

    /// Returns `true` for a list, nullable or not.
    #[must_use]
    pub fn is_list(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::NonNull(inner) => inner.is_list(),
            Self::Named(_) => false,
        }
    }
}

impl From<&Type> for FieldType {
    fn from(ty: &Type) -> Self {
        let base = match &ty.base {
            BaseType::Named(name) => FieldType::Named(name.to_string()),
            BaseType::List(inner) => FieldType::list(FieldType::from(inner.as_ref())),
        };
        if ty.nullable {
            base
        } else {
            FieldType::non_null(base)
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
            Self::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

/// An argument or input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: FieldType,
    pub default_value: Option<ConstValue>,
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub ty: FieldType,
}

/// A value of an enum type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
}

/// Kind-specific part of a type definition.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Scalar,
    Object {
        implements: Vec<String>,
        fields: Vec<FieldDefinition>,
    },
    Interface {
        implements: Vec<String>,
        fields: Vec<FieldDefinition>,
    },
    Union {
        members: Vec<String>,
    },
    Enum {
        values: Vec<EnumValue>,
    },
    InputObject {
        fields: Vec<InputValue>,
    },
}

impl TypeKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Object { .. } => "type",
            Self::Interface { .. } => "interface",
            Self::Union { .. } => "union",
            Self::Enum { .. } => "enum",
            Self::InputObject { .. } => "input",
        }
    }
}

/// A named type declared in a schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeKind,
}

impl TypeDefinition {
    /// Returns the fields of object and interface types; empty otherwise.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        match &self.kind {
            TypeKind::Object { fields, .. } | TypeKind::Interface { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Returns `true` for object types.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.kind, TypeKind::Object { .. })
    }

    /// Returns `true` for types whose values are selected into (object,
    /// interface, union).
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Object { .. } | TypeKind::Interface { .. } | TypeKind::Union { .. }
        )
    }

    /// Returns `true` for interfaces and unions.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Interface { .. } | TypeKind::Union { .. })
    }
}

/// Root operation of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [Self::Query, Self::Mutation, Self::Subscription];

    /// Conventional root type name used when no `schema` block is declared.
    #[must_use]
    pub fn default_type_name(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

/// Operation types declared by `schema { ... }` blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationTypes {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl OperationTypes {
    fn slot(&mut self, kind: OperationKind) -> &mut Option<String> {
        match kind {
            OperationKind::Query => &mut self.query,
            OperationKind::Mutation => &mut self.mutation,
            OperationKind::Subscription => &mut self.subscription,
        }
    }

    /// Returns the type bound to an operation.
    #[must_use]
    pub fn get(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => self.query.as_deref(),
            OperationKind::Mutation => self.mutation.as_deref(),
            OperationKind::Subscription => self.subscription.as_deref(),
        }
    }

    fn merge(&mut self, other: OperationTypes) -> Result<(), SchemaError> {
        for kind in OperationKind::ALL {
            let Some(incoming) = other.get(kind).map(str::to_string) else {
                continue;
            };
            match self.get(kind) {
                Some(existing) if existing != incoming => {
                    return Err(SchemaError::conflict(
                        "schema",
                        format!("{kind} operation bound to both `{existing}` and `{incoming}`"),
                    ));
                }
                Some(_) => {}
                None => *self.slot(kind) = Some(incoming),
            }
        }
        Ok(())
    }
}

impl From<&SchemaDefinition> for OperationTypes {
    fn from(def: &SchemaDefinition) -> Self {
        Self {
            query: def.query.as_ref().map(|n| n.node.to_string()),
            mutation: def.mutation.as_ref().map(|n| n.node.to_string()),
            subscription: def.subscription.as_ref().map(|n| n.node.to_string()),
        }
    }
}

/// Merged collection of every type declared across schema documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDefinition>,
    schema: Option<OperationTypes>,
    extensions: Vec<PendingExtension>,
}

/// An `extend type` waiting for its base definition, tagged with the
/// document it came from.
#[derive(Debug, Clone, PartialEq)]
struct PendingExtension {
    origin: String,
    definition: TypeDefinition,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single schema document into a partial registry.
    ///
    /// `origin` names the document in error messages.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` on syntax errors and
    /// `SchemaError::Conflict` if the document declares a name twice.
    pub fn parse(origin: &str, source: &str) -> Result<Self, SchemaError> {
        let document = async_graphql_parser::parse_schema(source)
            .map_err(|e| SchemaError::parse(origin, e))?;
        Self::from_document(origin, &document)
    }

    fn from_document(origin: &str, document: &ServiceDocument) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for definition in &document.definitions {
            match definition {
                TypeSystemDefinition::Schema(schema) => {
                    let mut operations = registry.schema.take().unwrap_or_default();
                    operations.merge(OperationTypes::from(&schema.node))?;
                    registry.schema = Some(operations);
                }
                TypeSystemDefinition::Type(ty) => {
                    let converted = convert_type(&ty.node);
                    if ty.node.extend {
                        registry.extensions.push(PendingExtension {
                            origin: origin.to_string(),
                            definition: converted,
                        });
                    } else {
                        registry.insert(converted)?;
                    }
                }
                // Directive definitions are not carried into the executable schema.
                TypeSystemDefinition::Directive(_) => {}
            }
        }
        Ok(registry)
    }

    /// Inserts a type definition.
    ///
    /// A structurally identical redefinition is accepted; any other
    /// redefinition is a conflict.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Conflict` on incompatible redefinition.
    pub fn insert(&mut self, definition: TypeDefinition) -> Result<(), SchemaError> {
        if let Some(existing) = self.types.get(&definition.name) {
            if *existing == definition {
                trace!(type_name = %definition.name, "Identical type definition merged");
                return Ok(());
            }
            return Err(SchemaError::conflict(
                &definition.name,
                describe_difference(existing, &definition),
            ));
        }
        self.types.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Merges another registry into this one.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Conflict` if both declare the same type with
    /// different definitions or bind an operation to different types.
    pub fn merge(mut self, other: TypeRegistry) -> Result<Self, SchemaError> {
        for (_, definition) in other.types {
            self.insert(definition)?;
        }
        if let Some(operations) = other.schema {
            let mut merged = self.schema.take().unwrap_or_default();
            merged.merge(operations)?;
            self.schema = Some(merged);
        }
        self.extensions.extend(other.extensions);
        Ok(self)
    }

    /// Folds pending `extend type` definitions into their base types.
    ///
    /// Must run after every document has been merged. Extensions of one type
    /// apply ordered by document origin, so the resulting field order does
    /// not depend on the order documents were merged in.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Conflict` if an extension targets an unknown type,
    /// a type of another kind, or redeclares an existing field or member.
    pub fn apply_extensions(mut self) -> Result<Self, SchemaError> {
        let mut pending = std::mem::take(&mut self.extensions);
        // Stable: extensions from one document keep their source order.
        pending.sort_by(|a, b| {
            (a.definition.name.as_str(), a.origin.as_str())
                .cmp(&(b.definition.name.as_str(), b.origin.as_str()))
        });
        for PendingExtension { origin, definition } in pending {
            let Some(base) = self.types.get_mut(&definition.name) else {
                return Err(SchemaError::conflict(
                    &definition.name,
                    "extension of a type that is never defined",
                ));
            };
            trace!(type_name = %definition.name, %origin, "Applying type extension");
            extend_type(base, definition)?;
        }
        Ok(self)
    }

    /// Returns a type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Returns `true` if a type with this name is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Iterates over all type definitions.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    /// Iterates over object type definitions.
    pub fn object_types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values().filter(|t| t.is_object())
    }

    /// Number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the explicitly declared operation types, if any document has
    /// a `schema` block.
    #[must_use]
    pub fn schema_definition(&self) -> Option<&OperationTypes> {
        self.schema.as_ref()
    }

    /// Returns the type name designated for an operation.
    ///
    /// An explicit `schema` block wins; without one the conventional root
    /// name is used when such a type exists.
    #[must_use]
    pub fn operation_type(&self, kind: OperationKind) -> Option<&str> {
        match &self.schema {
            Some(operations) => operations.get(kind),
            None => self
                .types
                .get_key_value(kind.default_type_name())
                .map(|(name, _)| name.as_str()),
        }
    }

    /// Returns the designated operation types in query, mutation,
    /// subscription order.
    #[must_use]
    pub fn operation_types(&self) -> Vec<(OperationKind, &str)> {
        OperationKind::ALL
            .into_iter()
            .filter_map(|kind| self.operation_type(kind).map(|name| (kind, name)))
            .collect()
    }

    /// Returns `true` if `name` is an object, interface or union type.
    #[must_use]
    pub fn is_composite(&self, name: &str) -> bool {
        self.types.get(name).is_some_and(TypeDefinition::is_composite)
    }

    /// Number of `extend type` definitions not yet applied.
    #[must_use]
    pub fn pending_extensions(&self) -> usize {
        self.extensions.len()
    }
}

fn convert_type(ty: &ParsedType) -> TypeDefinition {
    let kind = match &ty.kind {
        ParsedKind::Scalar => TypeKind::Scalar,
        ParsedKind::Object(object) => TypeKind::Object {
            implements: object.implements.iter().map(|n| n.node.to_string()).collect(),
            fields: object.fields.iter().map(|f| convert_field(&f.node)).collect(),
        },
        ParsedKind::Interface(interface) => TypeKind::Interface {
            implements: interface
                .implements
                .iter()
                .map(|n| n.node.to_string())
                .collect(),
            fields: interface.fields.iter().map(|f| convert_field(&f.node)).collect(),
        },
        ParsedKind::Union(union) => TypeKind::Union {
            members: union.members.iter().map(|n| n.node.to_string()).collect(),
        },
        ParsedKind::Enum(enum_type) => TypeKind::Enum {
            values: enum_type
                .values
                .iter()
                .map(|v| EnumValue {
                    name: v.node.value.node.to_string(),
                    description: v.node.description.as_ref().map(|d| d.node.clone()),
                })
                .collect(),
        },
        ParsedKind::InputObject(input) => TypeKind::InputObject {
            fields: input.fields.iter().map(|f| convert_input(&f.node)).collect(),
        },
    };

    TypeDefinition {
        name: ty.name.node.to_string(),
        description: ty.description.as_ref().map(|d| d.node.clone()),
        kind,
    }
}

fn convert_field(field: &ParsedField) -> FieldDefinition {
    FieldDefinition {
        name: field.name.node.to_string(),
        description: field.description.as_ref().map(|d| d.node.clone()),
        arguments: field.arguments.iter().map(|a| convert_input(&a.node)).collect(),
        ty: FieldType::from(&field.ty.node),
    }
}

fn convert_input(input: &InputValueDefinition) -> InputValue {
    InputValue {
        name: input.name.node.to_string(),
        description: input.description.as_ref().map(|d| d.node.clone()),
        ty: FieldType::from(&input.ty.node),
        default_value: input.default_value.as_ref().map(|v| v.node.clone()),
    }
}

fn describe_difference(existing: &TypeDefinition, incoming: &TypeDefinition) -> String {
    if existing.kind.label() != incoming.kind.label() {
        return format!(
            "declared as both `{}` and `{}`",
            existing.kind.label(),
            incoming.kind.label()
        );
    }
    let existing_fields: Vec<&str> = existing.fields().iter().map(|f| f.name.as_str()).collect();
    let incoming_fields: Vec<&str> = incoming.fields().iter().map(|f| f.name.as_str()).collect();
    if existing_fields != incoming_fields {
        return format!(
            "field sets differ ({} vs {})",
            existing_fields.join(", "),
            incoming_fields.join(", ")
        );
    }
    "definitions differ".to_string()
}

fn extend_type(base: &mut TypeDefinition, extension: TypeDefinition) -> Result<(), SchemaError> {
    let name = base.name.clone();
    let (base_label, extension_label) = (base.kind.label(), extension.kind.label());

    match (&mut base.kind, extension.kind) {
        (
            TypeKind::Object { implements, fields },
            TypeKind::Object {
                implements: more_implements,
                fields: more_fields,
            },
        )
        | (
            TypeKind::Interface { implements, fields },
            TypeKind::Interface {
                implements: more_implements,
                fields: more_fields,
            },
        ) => {
            append_unique(&name, "field", fields, more_fields, |f| &f.name)?;
            append_unique(&name, "interface", implements, more_implements, |i| i)?;
        }
        (TypeKind::Union { members }, TypeKind::Union { members: more }) => {
            append_unique(&name, "member", members, more, |m| m)?;
        }
        (TypeKind::Enum { values }, TypeKind::Enum { values: more }) => {
            append_unique(&name, "value", values, more, |v| &v.name)?;
        }
        (TypeKind::InputObject { fields }, TypeKind::InputObject { fields: more }) => {
            append_unique(&name, "field", fields, more, |f| &f.name)?;
        }
        (TypeKind::Scalar, TypeKind::Scalar) => {}
        _ => {
            return Err(SchemaError::conflict(
                &name,
                format!("`{extension_label}` extension applied to a `{base_label}`"),
            ));
        }
    }
    Ok(())
}

fn append_unique<T>(
    type_name: &str,
    what: &str,
    target: &mut Vec<T>,
    additions: Vec<T>,
    key: impl Fn(&T) -> &String,
) -> Result<(), SchemaError> {
    for item in additions {
        if target.iter().any(|existing| key(existing) == key(&item)) {
            return Err(SchemaError::conflict(
                type_name,
                format!("extension redeclares {what} `{}`", key(&item)),
            ));
        }
        target.push(item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> TypeRegistry {
        TypeRegistry::parse("test.graphqls", source).unwrap()
    }

    #[test]
    fn test_field_type_conversion() {
        let registry = parse(
            "type Widget { a: Owner b: Owner! c: [Owner] d: [Owner!]! }
             type Owner { id: ID }",
        );
        let widget = registry.get("Widget").unwrap();
        let types: Vec<String> = widget.fields().iter().map(|f| f.ty.to_string()).collect();
        assert_eq!(types, ["Owner", "Owner!", "[Owner]", "[Owner!]!"]);
        assert_eq!(
            widget.field("b").unwrap().ty,
            FieldType::non_null(FieldType::named("Owner"))
        );
        assert_eq!(widget.field("d").unwrap().ty.innermost_name(), "Owner");
    }

    #[test]
    fn test_parse_all_kinds() {
        let registry = parse(
            r#"
            "A date" scalar Date
            interface Node { id: ID! }
            type Widget implements Node { id: ID! size(unit: Unit = CM): Int }
            union Thing = Widget
            enum Unit { CM INCH }
            input WidgetInput { size: Int = 3 }
            "#,
        );
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.get("Date").unwrap().description.as_deref(), Some("A date"));
        assert!(registry.get("Node").unwrap().is_abstract());
        assert!(registry.is_composite("Thing"));
        assert!(!registry.is_composite("Unit"));
        assert!(!registry.is_composite("Date"));

        let size = registry.get("Widget").unwrap().field("size").unwrap();
        assert_eq!(size.arguments.len(), 1);
        assert!(size.arguments[0].default_value.is_some());
    }

    #[test]
    fn test_duplicate_in_single_document_conflicts() {
        let err = TypeRegistry::parse("a", "type A { x: Int } type A { y: Int }").unwrap_err();
        assert!(matches!(err, SchemaError::Conflict { ref name, .. } if name == "A"));
    }

    #[test]
    fn test_identical_definitions_merge() {
        let a = parse("type Widget { id: ID }");
        let b = parse("type Widget { id: ID }");
        let merged = a.merge(b).unwrap();
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_kind_mismatch_conflicts() {
        let a = parse("type Widget { id: ID }");
        let b = parse("input Widget { id: ID }");
        let err = a.merge(b).unwrap_err();
        assert!(err.to_string().contains("declared as both"));
    }

    #[test]
    fn test_default_operation_types() {
        let registry = parse("type Query { a: Int } type Mutation { b: Int }");
        assert_eq!(
            registry.operation_types(),
            vec![(OperationKind::Query, "Query"), (OperationKind::Mutation, "Mutation")]
        );
    }

    #[test]
    fn test_explicit_schema_block_wins() {
        let registry = parse(
            "schema { query: Root } type Root { a: Int } type Query { b: Int }",
        );
        assert_eq!(registry.operation_types(), vec![(OperationKind::Query, "Root")]);
    }

    #[test]
    fn test_schema_blocks_merge_per_operation() {
        let a = parse("schema { query: Root }");
        let b = parse("schema { mutation: Change }");
        let merged = a.merge(b).unwrap();
        let ops = merged.schema_definition().unwrap();
        assert_eq!(ops.query.as_deref(), Some("Root"));
        assert_eq!(ops.mutation.as_deref(), Some("Change"));

        let c = parse("schema { query: Other }");
        assert!(matches!(merged.merge(c), Err(SchemaError::Conflict { .. })));
    }

    #[test]
    fn test_extensions_applied_after_merge() {
        let ext = parse("extend type Query { extra: Int }");
        let base = parse("type Query { a: Int }");
        let merged = ext.merge(base).unwrap();
        assert_eq!(merged.pending_extensions(), 1);

        let merged = merged.apply_extensions().unwrap();
        let names: Vec<&str> = merged
            .get("Query")
            .unwrap()
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["a", "extra"]);
        assert_eq!(merged.pending_extensions(), 0);
    }

    #[test]
    fn test_extensions_apply_in_origin_order() {
        let base = TypeRegistry::parse("query.graphqls", "type Query { base: Int }").unwrap();
        let x = TypeRegistry::parse("a.graphqls", "extend type Query { x: Int }").unwrap();
        let y = TypeRegistry::parse("b.graphqls", "extend type Query { y: Int }").unwrap();

        let forward = base.clone().merge(x.clone()).unwrap().merge(y.clone()).unwrap();
        let backward = base.merge(y).unwrap().merge(x).unwrap();
        let forward = forward.apply_extensions().unwrap();
        let backward = backward.apply_extensions().unwrap();

        let names: Vec<&str> = backward
            .get("Query")
            .unwrap()
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["base", "x", "y"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_extension_errors() {
        let unknown = parse("extend type Missing { a: Int }");
        assert!(unknown.apply_extensions().is_err());

        let redeclared = parse("type Query { a: Int } extend type Query { a: Int }");
        let err = redeclared.apply_extensions().unwrap_err();
        assert!(err.to_string().contains("redeclares field `a`"));
    }
}
