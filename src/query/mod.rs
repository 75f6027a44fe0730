//! Decoding of `bazel query --output=proto` into Go dependency records
//!
//! This is the heart of bzlcompat: it turns the raw protobuf produced by bazel into a
//! [`DependencyMapping`] from external repository name to the Go import path (plus
//! revision and remote when known) under which that repository is imported.
//!
//! # Strategies
//!
//! Two mutually exclusive ways of finding external Go code are supported, each with its
//! own query expression:
//!
//! | Strategy | Query | Reads |
//! |----------|-------|-------|
//! | [`QueryStrategy::Repository`] | `kind('g(o\|it)_repository rule', //external:*)` | `go_repository` and `git_repository` declarations |
//! | [`QueryStrategy::Library`] | `kind('go_library rule', deps(//...))` | `go_library` targets in external repositories |
//!
//! The repository strategy is the default; it is the only one that knows revisions and
//! remotes.
//!
//! # Normalisation
//!
//! Every extracted record goes through the same steps:
//! 1. an empty repository name is an error ([`BzlError::MissingName`])
//! 2. the exceptions in [`remap`] are applied (exact names, then hosting prefixes)
//! 3. import paths still ending in `.git` are dropped, they are not Go repositories
//! 4. an empty import path is an error ([`BzlError::MissingImportPath`])
//! 5. the first record for a given name wins
//!
//! Any error aborts the whole decode; no partial mapping is ever returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use bzlcompat::query::{QueryStrategy, decode_query};
//!
//! # fn example(bytes: &[u8]) -> Result<(), bzlcompat::core::BzlError> {
//! let deps = decode_query(bytes, QueryStrategy::Repository)?;
//! for (name, dep) in &deps {
//!     println!("{name} -> {}", dep.import_path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod library;
pub mod proto;
pub mod remap;
pub mod rules;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::core::BzlError;
use proto::{QueryResult, target};
use rules::{RepositoryFields, RuleKind};

/// One external Go dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRecord {
    /// Go import path, never empty
    pub import_path: String,
    /// Commit or tag the repository is pinned to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,
    /// Fetch location (scheme and `.git` stripped) when it differs from the import path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

/// External repository name → dependency, ordered by name.
pub type DependencyMapping = BTreeMap<String, DependencyRecord>;

/// How external Go code is discovered in the build graph.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum QueryStrategy {
    /// Read `go_repository` / `git_repository` rules under `//external`
    #[default]
    Repository,
    /// Read `go_library` targets that live in external repositories
    Library,
}

impl QueryStrategy {
    /// The `bazel query` expression this strategy decodes.
    #[must_use]
    pub const fn query_expression(self) -> &'static str {
        match self {
            Self::Repository => "kind('g(o|it)_repository rule', //external:*)",
            Self::Library => "kind('go_library rule', deps(//...))",
        }
    }
}

/// Decode a `bazel query --output=proto` result.
///
/// # Errors
///
/// Fails on a corrupt protobuf envelope, on attribute type mismatches and on records
/// without a name or import path. See the module docs for the full pipeline.
pub fn decode_query(bytes: &[u8], strategy: QueryStrategy) -> Result<DependencyMapping, BzlError> {
    let result = QueryResult::decode(bytes)?;
    tracing::debug!("Decoded {} query targets", result.target.len());

    match strategy {
        QueryStrategy::Repository => decode_repository_rules(&result),
        QueryStrategy::Library => library::decode_library_rules(&result),
    }
}

fn decode_repository_rules(result: &QueryResult) -> Result<DependencyMapping, BzlError> {
    let mut deps = DependencyMapping::new();

    for t in &result.target {
        let Some(rule) = rule_of(t) else {
            continue;
        };

        let fields = match RuleKind::from_rule_class(&rule.rule_class) {
            RuleKind::GoRepository => rules::parse_go_repository(rule)?,
            RuleKind::GitRepository => rules::parse_git_repository(rule)?,
            RuleKind::GoLibrary | RuleKind::Unsupported(_) => {
                tracing::warn!(
                    "Expected rule of class [go_repository, git_repository], instead got {}",
                    rule.rule_class
                );
                continue;
            }
        };

        let Some((name, record)) = normalize(&rule.name, fields)? else {
            continue;
        };
        match deps.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(existing) => {
                tracing::warn!(
                    "Repository '{}' declared more than once, keeping the first declaration",
                    existing.key()
                );
            }
        }
    }

    Ok(deps)
}

/// The rule payload of a target, or `None` (with a warning) for non-rule targets.
pub(crate) fn rule_of(t: &proto::Target) -> Option<&proto::Rule> {
    if t.r#type != target::Discriminator::Rule as i32 {
        tracing::warn!(
            "Expected target of type RULE, instead got {}",
            proto::target_type_name(t.r#type)
        );
        return None;
    }
    let rule = t.rule.as_ref();
    if rule.is_none() {
        tracing::warn!("Target of type RULE without a rule payload");
    }
    rule
}

/// Apply the shared normalisation steps to extracted fields.
///
/// Returns `Ok(None)` when the record is filtered out as not being a Go repository.
pub(crate) fn normalize(
    label: &str,
    fields: RepositoryFields,
) -> Result<Option<(String, DependencyRecord)>, BzlError> {
    if fields.name.is_empty() {
        return Err(BzlError::MissingName {
            rule: label.to_string(),
        });
    }

    let import_path = remap::apply_remaps(&fields.name, &fields.import_path);
    if remap::is_non_go(&import_path) {
        // This is probably not a go repository
        tracing::debug!("Skipping {} ({}): not a Go repository", fields.name, import_path);
        return Ok(None);
    }
    if import_path.is_empty() {
        return Err(BzlError::MissingImportPath {
            rule: label.to_string(),
        });
    }

    Ok(Some((
        fields.name,
        DependencyRecord {
            import_path,
            source_ref: fields.source_ref,
            remote: fields.remote,
        },
    )))
}
