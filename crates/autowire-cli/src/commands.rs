use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use async_graphql::dynamic::FieldFuture;
use async_graphql::{Request, Value, Variables};
use autowire_graphql::{AssembledSchema, ComponentMap, WiringOutcome};

use crate::cli::{CheckArgs, QueryArgs};
use crate::output::{print_json, print_report, print_success, print_warning};

/// Builds a component registry of fixed-value data fetchers.
///
/// The file holds a JSON object mapping component names to the value the
/// fetcher returns, e.g. `{ "widgetDataFetcher": { "id": "w-1" } }`.
pub fn load_fixtures(path: &Path) -> Result<ComponentMap> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read fixtures {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("fixtures {} are not valid JSON", path.display()))?;
    let serde_json::Value::Object(entries) = json else {
        bail!("fixtures {} must be a JSON object", path.display());
    };

    let mut components = ComponentMap::new();
    for (name, fixture) in entries {
        let value = Value::from_json(fixture)
            .with_context(|| format!("fixture {name} cannot be converted"))?;
        tracing::debug!(component = %name, "Registered fixture data fetcher");
        components.register_data_fetcher(name, move |_ctx| {
            let value = value.clone();
            FieldFuture::new(async move { Ok(Some(value)) })
        });
    }
    Ok(components)
}

pub fn check(assembled: &AssembledSchema, args: &CheckArgs) -> Result<()> {
    print_report(&assembled.report);

    let report = &assembled.report;
    let bound = report.with_outcome(&WiringOutcome::Bound).count();
    let delegated = report.with_outcome(&WiringOutcome::Delegated).count();
    let missing = report.with_outcome(&WiringOutcome::NotFound).count();
    let failed = report.failure_count();

    if args.sdl {
        println!();
        println!("{}", assembled.executor.sdl());
    }

    println!();
    if failed > 0 {
        print_warning(&format!("{failed} component(s) failed to initialise"));
        if args.strict {
            bail!("{failed} component(s) failed to initialise");
        }
    }
    print_success(&format!(
        "Schema assembled: {} types, {bound} bound, {delegated} delegated, {missing} unbound",
        assembled.registry.len()
    ));
    Ok(())
}

pub async fn query(assembled: &AssembledSchema, args: &QueryArgs) -> Result<()> {
    let mut request = Request::new(args.query.as_str());
    if let Some(variables) = &args.variables {
        let json: serde_json::Value =
            serde_json::from_str(variables).context("--variables is not valid JSON")?;
        request = request.variables(Variables::from_json(json));
    }
    if let Some(operation) = &args.operation {
        request = request.operation_name(operation.as_str());
    }

    let response = match &args.root {
        Some(root) => {
            let root: serde_json::Value =
                serde_json::from_str(root).context("--root is not valid JSON")?;
            assembled.executor.execute_with_root(request, root).await
        }
        None => assembled.executor.execute(request).await,
    };

    let errors = response.errors.len();
    print_json(&serde_json::to_value(&response)?)?;
    if errors > 0 {
        bail!("query returned {errors} error(s)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use autowire_graphql::{ComponentRegistry, LookupError};

    use super::*;

    #[test]
    fn test_load_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixtures.json");
        fs::write(&path, r#"{ "widgetDataFetcher": { "id": "w-1" } }"#).unwrap();

        let components = load_fixtures(&path).unwrap();
        assert_eq!(components.len(), 1);
        assert!(components.data_fetcher("widgetDataFetcher").is_ok());
        assert!(matches!(
            components.lookup("ownerDataFetcher"),
            Err(LookupError::NotFound { .. })
        ));
    }

    #[test]
    fn test_fixtures_must_be_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixtures.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(load_fixtures(&path).is_err());
    }
}
