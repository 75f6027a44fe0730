//! Library strategy: find external Go repositories through the `go_library` targets the
//! workspace depends on.
//!
//! Labels of external targets look like `@com_github_pkg_errors//subdir:go_default_library`.
//! The repository's import path is the library's `importpath` with the package
//! subdirectory removed from the end.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::BzlError;
use crate::query::proto::QueryResult;
use crate::query::rules::{self, RepositoryFields, RuleKind};
use crate::query::{DependencyMapping, normalize, rule_of};

static EXTERNAL_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@?([^/:]+)//([^:]*):(.+)$").expect("external label pattern is valid")
});

/// Repository and package directory of an external label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLabel {
    pub repository: String,
    pub package: String,
}

/// Split `@repo//pkg/dir:target` into its repository and package directory.
///
/// # Errors
///
/// [`BzlError::LabelFormat`] for labels that start with `@` but do not match the pattern.
pub fn parse_external_label(label: &str) -> Result<ExternalLabel, BzlError> {
    let caps = EXTERNAL_LABEL.captures(label).ok_or_else(|| BzlError::LabelFormat {
        label: label.to_string(),
    })?;
    Ok(ExternalLabel {
        repository: caps[1].to_string(),
        package: caps[2].to_string(),
    })
}

/// Whether a package directory lives inside a `vendor/` tree.
#[must_use]
pub fn is_vendored(package: &str) -> bool {
    package.split('/').any(|component| component == "vendor")
}

/// Strip `/<package>` from the end of a library import path.
fn repository_import_path(import_path: &str, package: &str) -> Option<String> {
    if package.is_empty() {
        return Some(import_path.to_string());
    }
    import_path.strip_suffix(package)?.strip_suffix('/').map(str::to_string)
}

pub(crate) fn decode_library_rules(result: &QueryResult) -> Result<DependencyMapping, BzlError> {
    let mut deps = DependencyMapping::new();

    for t in &result.target {
        let Some(rule) = rule_of(t) else {
            continue;
        };
        if RuleKind::from_rule_class(&rule.rule_class) != RuleKind::GoLibrary {
            tracing::warn!("Expected rule of class [go_library], instead got {}", rule.rule_class);
            continue;
        }
        if !rule.name.starts_with('@') {
            // Part of the main workspace
            continue;
        }

        let label = parse_external_label(&rule.name)?;
        if is_vendored(&label.package) {
            tracing::debug!("Skipping vendored library {}", rule.name);
            continue;
        }
        if deps.contains_key(&label.repository) {
            // First library seen for a repository decides its import path
            tracing::debug!("Already have {}, skipping {}", label.repository, rule.name);
            continue;
        }

        let library_path = rules::find_string_attr(rule, "importpath")?.unwrap_or_default();
        let import_path = if library_path.is_empty() {
            String::new()
        } else {
            repository_import_path(&library_path, &label.package).ok_or_else(|| {
                BzlError::MissingImportPath {
                    rule: rule.name.clone(),
                }
            })?
        };

        let fields = RepositoryFields {
            name: label.repository,
            import_path,
            source_ref: None,
            remote: None,
        };
        if let Some((name, record)) = normalize(&rule.name, fields)? {
            deps.insert(name, record);
        }
    }

    Ok(deps)
}
