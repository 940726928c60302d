//! Resolver components and the registry they are looked up from.
//!
//! The wiring resolver never creates components itself. It asks a
//! [`ComponentRegistry`] for a component by its derived name and receives
//! either the component or a [`LookupError`] telling it whether nothing was
//! registered or the registered component could not be provided.
//!
//! Two capabilities exist:
//! - [`DataFetcher`] – produces a single field's value at execution time.
//! - [`TypeBuilder`] – customises the complete wiring of one type.
//!
//! [`ComponentMap`] is a ready-made in-memory registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::{FieldFuture, ResolverContext};

use crate::error::{ComponentKind, LookupError};
use crate::wiring::TypeWiring;

/// Resolves the value of one field.
///
/// Implemented for every `Fn(ResolverContext) -> FieldFuture` closure, so a
/// plain resolver closure can be registered directly.
pub trait DataFetcher: Send + Sync {
    /// Starts resolving the field.
    fn fetch<'a>(&self, ctx: ResolverContext<'a>) -> FieldFuture<'a>;
}

impl<F> DataFetcher for F
where
    F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync,
{
    fn fetch<'a>(&self, ctx: ResolverContext<'a>) -> FieldFuture<'a> {
        self(ctx)
    }
}

/// Fully customises the wiring of one type.
///
/// When a type builder is registered for a type, automatic field wiring is
/// skipped for that type: the builder receives an empty [`TypeWiring`] and
/// whatever it returns is used as-is.
pub trait TypeBuilder: Send + Sync {
    /// Customises the wiring of the type. Returns the wiring unchanged by
    /// default.
    fn wiring(&self, wiring: TypeWiring) -> TypeWiring {
        wiring
    }
}

/// A component registered under a name.
#[derive(Clone)]
pub enum Component {
    DataFetcher(Arc<dyn DataFetcher>),
    TypeBuilder(Arc<dyn TypeBuilder>),
}

impl Component {
    /// Returns the capability this component provides.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::DataFetcher(_) => ComponentKind::DataFetcher,
            Self::TypeBuilder(_) => ComponentKind::TypeBuilder,
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.kind()).finish()
    }
}

/// Looks up components by name.
///
/// Lookups must be side-effect free and idempotent.
pub trait ComponentRegistry: Send + Sync {
    /// Returns the component registered under `name`.
    ///
    /// # Errors
    ///
    /// `LookupError::NotFound` if nothing is registered under the name,
    /// `LookupError::Initialization` if the component could not be created.
    fn lookup(&self, name: &str) -> Result<Component, LookupError>;

    /// Looks up a data fetcher.
    ///
    /// # Errors
    ///
    /// As [`lookup`](Self::lookup), plus `LookupError::UnexpectedKind` if the
    /// component is not a data fetcher.
    fn data_fetcher(&self, name: &str) -> Result<Arc<dyn DataFetcher>, LookupError> {
        match self.lookup(name)? {
            Component::DataFetcher(fetcher) => Ok(fetcher),
            Component::TypeBuilder(_) => Err(LookupError::UnexpectedKind {
                name: name.to_string(),
                expected: ComponentKind::DataFetcher,
            }),
        }
    }

    /// Looks up a type builder.
    ///
    /// # Errors
    ///
    /// As [`lookup`](Self::lookup), plus `LookupError::UnexpectedKind` if the
    /// component is not a type builder.
    fn type_builder(&self, name: &str) -> Result<Arc<dyn TypeBuilder>, LookupError> {
        match self.lookup(name)? {
            Component::TypeBuilder(builder) => Ok(builder),
            Component::DataFetcher(_) => Err(LookupError::UnexpectedKind {
                name: name.to_string(),
                expected: ComponentKind::TypeBuilder,
            }),
        }
    }
}

type ComponentFactory = Box<dyn Fn() -> Result<Component, String> + Send + Sync>;

enum Entry {
    Ready(Component),
    Factory(ComponentFactory),
}

/// In-memory component registry.
///
/// # Example
///
/// ```ignore
/// let components = ComponentMap::new()
///     .with_data_fetcher("widgetDataFetcher", |_ctx| {
///         FieldFuture::new(async { Ok(Some(Value::String("w-1".into()))) })
///     });
/// ```
#[derive(Default)]
pub struct ComponentMap {
    entries: HashMap<String, Entry>,
}

impl ComponentMap {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, component: Component) {
        self.entries.insert(name.into(), Entry::Ready(component));
    }

    /// Registers a resolver closure under `name`, replacing any previous
    /// entry.
    pub fn register_data_fetcher<F>(&mut self, name: impl Into<String>, fetcher: F)
    where
        F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
    {
        self.register(name, Component::DataFetcher(Arc::new(fetcher)));
    }

    /// Registers a type builder under `name`, replacing any previous entry.
    pub fn register_type_builder<B>(&mut self, name: impl Into<String>, builder: B)
    where
        B: TypeBuilder + 'static,
    {
        self.register(name, Component::TypeBuilder(Arc::new(builder)));
    }

    /// Registers a factory invoked on every lookup of `name`.
    ///
    /// A factory returning `Err` makes the lookup fail with
    /// `LookupError::Initialization`.
    pub fn register_factory<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Component, String> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Entry::Factory(Box::new(factory)));
    }

    /// Builder-style [`register_data_fetcher`](Self::register_data_fetcher).
    #[must_use]
    pub fn with_data_fetcher<F>(mut self, name: impl Into<String>, fetcher: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
    {
        self.register_data_fetcher(name, fetcher);
        self
    }

    /// Builder-style [`register_type_builder`](Self::register_type_builder).
    #[must_use]
    pub fn with_type_builder<B>(mut self, name: impl Into<String>, builder: B) -> Self
    where
        B: TypeBuilder + 'static,
    {
        self.register_type_builder(name, builder);
        self
    }

    /// Returns `true` if something is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ComponentRegistry for ComponentMap {
    fn lookup(&self, name: &str) -> Result<Component, LookupError> {
        match self.entries.get(name) {
            Some(Entry::Ready(component)) => Ok(component.clone()),
            Some(Entry::Factory(factory)) => {
                factory().map_err(|reason| LookupError::Initialization {
                    name: name.to_string(),
                    reason,
                })
            }
            None => Err(LookupError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}

impl<T: ComponentRegistry + ?Sized> ComponentRegistry for Arc<T> {
    fn lookup(&self, name: &str) -> Result<Component, LookupError> {
        (**self).lookup(name)
    }
}
