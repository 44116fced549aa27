//! package.json reader for the project under measurement
//!
//! Handles:
//! - dependencies
//! - devDependencies (skipped with --production)
//! - optionalDependencies (skipped with --no-optional)

use crate::domain::{DependencySelection, DependencySet};
use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::path::Path;

/// Manifest filename looked up in the project directory
pub const PACKAGE_JSON: &str = "package.json";

/// Which dependency categories take part in the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Skip devDependencies
    pub production: bool,
    /// Skip optionalDependencies
    pub no_optional: bool,
}

/// Read `package.json` from `dir` and select the dependencies to measure
pub fn read_dependencies(
    dir: &Path,
    options: SelectionOptions,
) -> Result<DependencySelection, ManifestError> {
    let path = dir.join(PACKAGE_JSON);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ManifestError::not_found(dir)
        } else {
            ManifestError::read_error(&path, e)
        }
    })?;

    let json: Value = serde_json::from_str(&content)
        .map_err(|e| ManifestError::json_parse_error(&path, e.to_string()))?;

    Ok(select_dependencies(&json, options))
}

/// Select dependencies from parsed package.json content
///
/// Categories are merged in order dependencies, devDependencies,
/// optionalDependencies; a later category overrides an earlier one's version.
pub fn select_dependencies(json: &Value, options: SelectionOptions) -> DependencySelection {
    let mut dependencies = DependencySet::new();
    let mut dev_skipped = 0;
    let mut optional_skipped = 0;

    if let Some(deps) = category(json, "dependencies") {
        merge_dependency_object(deps, &mut dependencies);
    }

    if let Some(deps) = category(json, "devDependencies") {
        if options.production {
            dev_skipped = deps.len();
        } else {
            merge_dependency_object(deps, &mut dependencies);
        }
    }

    if let Some(deps) = category(json, "optionalDependencies") {
        if options.no_optional {
            optional_skipped = deps.len();
        } else {
            merge_dependency_object(deps, &mut dependencies);
        }
    }

    DependencySelection {
        dependencies,
        dev_skipped,
        optional_skipped,
    }
}

fn category<'a>(json: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    json.get(key).and_then(|v| v.as_object())
}

fn merge_dependency_object(deps: &Map<String, Value>, output: &mut DependencySet) {
    for (name, version_value) in deps {
        if let Some(version) = version_value.as_str() {
            output.insert(name.clone(), version);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn select(content: &str, options: SelectionOptions) -> DependencySelection {
        let json: Value = serde_json::from_str(content).unwrap();
        select_dependencies(&json, options)
    }

    const MANIFEST: &str = r#"{
        "name": "app",
        "dependencies": {
            "lodash": "^4.17.21",
            "express": "~4.18.2"
        },
        "devDependencies": {
            "typescript": "^5.0.0"
        },
        "optionalDependencies": {
            "fsevents": "^2.3.3"
        }
    }"#;

    #[test]
    fn test_select_all_categories() {
        let selection = select(MANIFEST, SelectionOptions::default());

        assert_eq!(selection.dependencies.len(), 4);
        assert_eq!(selection.dependencies.get("typescript"), Some("^5.0.0"));
        assert_eq!(selection.dependencies.get("fsevents"), Some("^2.3.3"));
        assert_eq!(selection.dev_skipped, 0);
        assert_eq!(selection.optional_skipped, 0);
    }

    #[test]
    fn test_production_skips_dev() {
        let options = SelectionOptions {
            production: true,
            no_optional: false,
        };
        let selection = select(MANIFEST, options);

        assert_eq!(selection.dependencies.len(), 3);
        assert!(selection.dependencies.get("typescript").is_none());
        assert_eq!(selection.dev_skipped, 1);
    }

    #[test]
    fn test_no_optional_skips_optional() {
        let options = SelectionOptions {
            production: false,
            no_optional: true,
        };
        let selection = select(MANIFEST, options);

        assert_eq!(selection.dependencies.len(), 3);
        assert!(selection.dependencies.get("fsevents").is_none());
        assert_eq!(selection.optional_skipped, 1);
    }

    #[test]
    fn test_later_category_overrides_version() {
        let content = r#"{
            "dependencies": { "debug": "^3.0.0" },
            "devDependencies": { "debug": "^4.0.0" }
        }"#;
        let selection = select(content, SelectionOptions::default());

        assert_eq!(selection.dependencies.len(), 1);
        assert_eq!(selection.dependencies.get("debug"), Some("^4.0.0"));
    }

    #[test]
    fn test_non_string_versions_ignored() {
        let content = r#"{ "dependencies": { "ok": "1.0.0", "bad": 1, "worse": null } }"#;
        let selection = select(content, SelectionOptions::default());

        assert_eq!(selection.dependencies.len(), 1);
        assert_eq!(selection.dependencies.get("ok"), Some("1.0.0"));
    }

    #[test]
    fn test_no_dependency_fields() {
        let selection = select(r#"{ "name": "empty" }"#, SelectionOptions::default());
        assert!(selection.dependencies.is_empty());
    }

    #[test]
    fn test_read_dependencies_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let err = read_dependencies(dir.path(), SelectionOptions::default()).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
        assert!(err.to_string().starts_with("No package.json in"));
    }

    #[test]
    fn test_read_dependencies_invalid_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), "{ not json").unwrap();

        let err = read_dependencies(dir.path(), SelectionOptions::default()).unwrap_err();
        assert!(matches!(err, ManifestError::JsonParseError { .. }));
    }

    #[test]
    fn test_read_dependencies_from_disk() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), MANIFEST).unwrap();

        let selection = read_dependencies(dir.path(), SelectionOptions::default()).unwrap();
        assert_eq!(selection.dependencies.len(), 4);
    }
}
