//! Component name derivation.
//!
//! Component names are derived mechanically from the schema shape, so adding
//! a field only requires registering a component under the matching name.
//! Everything here is pure; lookups happen in [`crate::wiring`].

use crate::config::NamingConfig;
use crate::registry::FieldType;

/// Lower-cases the first character of `name`.
#[must_use]
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wrapper found around a field's referenced type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    None,
    NonNull,
    List,
}

impl Wrapper {
    /// Marker inserted between the type name and the fetcher suffix.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::None => "",
            Self::NonNull => "NonNull",
            Self::List => "List",
        }
    }
}

/// Unwraps at most one `NonNull` or `List` wrapper.
///
/// Returns the referenced type name and the wrapper that was removed, or
/// `None` when the type is still wrapped after one level (for example
/// `[Owner!]!` or `[[Owner]]`). Nested wrappers are not walked.
#[must_use]
pub fn unwrap_one(ty: &FieldType) -> Option<(&str, Wrapper)> {
    match ty {
        FieldType::Named(name) => Some((name, Wrapper::None)),
        FieldType::NonNull(inner) => match inner.as_ref() {
            FieldType::Named(name) => Some((name, Wrapper::NonNull)),
            _ => None,
        },
        FieldType::List(inner) => match inner.as_ref() {
            FieldType::Named(name) => Some((name, Wrapper::List)),
            _ => None,
        },
    }
}

/// Name of the fetcher for a field of an operation type:
/// `fieldName + dataFetcherSuffix`.
#[must_use]
pub fn operation_fetcher_name(field_name: &str, naming: &NamingConfig) -> String {
    format!("{field_name}{}", naming.data_fetcher_suffix)
}

/// Name of the type builder for a type:
/// `lowerFirst(typeName) + typeBuilderSuffix`.
#[must_use]
pub fn type_builder_name(type_name: &str, naming: &NamingConfig) -> String {
    format!("{}{}", lower_first(type_name), naming.type_builder_suffix)
}

/// Name of the fetcher for a field referencing `type_name` through
/// `wrapper`: `lowerFirst(typeName + marker) + dataFetcherSuffix`.
#[must_use]
pub fn field_fetcher_name(type_name: &str, wrapper: Wrapper, naming: &NamingConfig) -> String {
    format!(
        "{}{}",
        lower_first(&format!("{type_name}{}", wrapper.marker())),
        naming.data_fetcher_suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Widget"), "widget");
        assert_eq!(lower_first("widget"), "widget");
        assert_eq!(lower_first("URLInfo"), "uRLInfo");
        assert_eq!(lower_first(""), "");
        assert_eq!(lower_first("Ärger"), "ärger");
    }

    #[test]
    fn test_unwrap_one_level() {
        let owner = FieldType::named("Owner");
        assert_eq!(unwrap_one(&owner), Some(("Owner", Wrapper::None)));
        assert_eq!(
            unwrap_one(&FieldType::non_null(owner.clone())),
            Some(("Owner", Wrapper::NonNull))
        );
        assert_eq!(
            unwrap_one(&FieldType::list(owner.clone())),
            Some(("Owner", Wrapper::List))
        );
    }

    #[test]
    fn test_nested_wrappers_are_not_unwrapped() {
        let nested = FieldType::non_null(FieldType::list(FieldType::non_null(
            FieldType::named("Owner"),
        )));
        assert_eq!(unwrap_one(&nested), None);
        assert_eq!(
            unwrap_one(&FieldType::list(FieldType::list(FieldType::named("Owner")))),
            None
        );
    }

    #[test]
    fn test_derived_names() {
        let naming = NamingConfig::default();
        assert_eq!(operation_fetcher_name("foo", &naming), "fooDataFetcher");
        assert_eq!(type_builder_name("Widget", &naming), "widgetTypeBuilder");
        assert_eq!(
            field_fetcher_name("Owner", Wrapper::NonNull, &naming),
            "ownerNonNullDataFetcher"
        );
        assert_eq!(field_fetcher_name("Owner", Wrapper::List, &naming), "ownerListDataFetcher");
        assert_eq!(field_fetcher_name("Owner", Wrapper::None, &naming), "ownerDataFetcher");
    }

    #[test]
    fn test_custom_suffixes() {
        let naming = NamingConfig {
            data_fetcher_suffix: "Resolver".into(),
            type_builder_suffix: "Wiring".into(),
        };
        assert_eq!(operation_fetcher_name("widget", &naming), "widgetResolver");
        assert_eq!(type_builder_name("Widget", &naming), "widgetWiring");
    }
}
