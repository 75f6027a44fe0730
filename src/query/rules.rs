//! Per-rule attribute extraction for the repository rules bzlcompat understands.

use crate::core::BzlError;
use crate::query::proto::{self, attribute};

/// Attribute names holding the fetched revision, in priority order.
const REVISION_ATTRS: &[&str] = &["commit", "tag"];

/// Rule classes the decoder dispatches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// `go_repository`: declares `importpath` explicitly
    GoRepository,
    /// `git_repository`: only a `remote`, the import path is derived from it
    GitRepository,
    /// `go_library`: only relevant to the library strategy
    GoLibrary,
    /// Anything else; skipped with a warning
    Unsupported(String),
}

impl RuleKind {
    /// Classify a `rule_class` string.
    #[must_use]
    pub fn from_rule_class(class: &str) -> Self {
        match class {
            "go_repository" => Self::GoRepository,
            "git_repository" => Self::GitRepository,
            "go_library" => Self::GoLibrary,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

/// Fields pulled out of a repository rule before normalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryFields {
    pub name: String,
    pub import_path: String,
    pub source_ref: Option<String>,
    pub remote: Option<String>,
}

/// Read a string-typed attribute.
///
/// # Errors
///
/// [`BzlError::AttributeType`] if the attribute is declared with any other type.
pub fn read_string_attr(attr: &proto::Attribute) -> Result<String, BzlError> {
    if attr.r#type != attribute::Discriminator::String as i32 {
        return Err(BzlError::AttributeType {
            attribute: attr.name.clone(),
            expected: attribute::Discriminator::String.as_str_name().to_string(),
            actual: proto::attribute_type_name(attr.r#type),
        });
    }
    Ok(attr.string_value.clone().unwrap_or_default())
}

/// Read the attribute called `name`, if present.
pub fn find_string_attr(rule: &proto::Rule, name: &str) -> Result<Option<String>, BzlError> {
    rule.attribute
        .iter()
        .find(|a| a.name == name)
        .map(read_string_attr)
        .transpose()
}

/// First non-empty value of `commit`, then `tag`.
pub fn read_revision(rule: &proto::Rule) -> Result<Option<String>, BzlError> {
    for attr_name in REVISION_ATTRS {
        match find_string_attr(rule, attr_name)? {
            Some(value) if !value.is_empty() => return Ok(Some(value)),
            _ => {}
        }
    }
    Ok(None)
}

/// Strip one trailing `.git`, then drop everything up to and including `://`.
#[must_use]
pub fn normalize_remote(remote: &str) -> String {
    let remote = remote.strip_suffix(".git").unwrap_or(remote);
    match remote.split_once("://") {
        Some((_, rest)) => rest.to_string(),
        None => remote.to_string(),
    }
}

/// Extract a `go_repository` rule.
///
/// ```text
/// <rule class="go_repository" name="//external:com_github_axw_gocov">
///   <string name="name" value="com_github_axw_gocov"/>
///   <string name="importpath" value="github.com/axw/gocov"/>
///   <string name="commit" value="54b98cfcac0c63fb3f9bd8e7ad241b724d4e985b"/>
/// </rule>
/// ```
pub fn parse_go_repository(rule: &proto::Rule) -> Result<RepositoryFields, BzlError> {
    let name = find_string_attr(rule, "name")?.unwrap_or_default();
    let import_path = find_string_attr(rule, "importpath")?.unwrap_or_default();
    let remote = find_string_attr(rule, "remote")?
        .map(|r| normalize_remote(&r))
        .filter(|r| !r.is_empty());
    Ok(RepositoryFields {
        name,
        import_path,
        source_ref: read_revision(rule)?,
        remote,
    })
}

/// Extract a `git_repository` rule.
///
/// There is no easy way to tell whether a `git_repository` holds Go source, so it is
/// treated as one with the normalised remote standing in for the import path:
///
/// ```text
/// <rule class="git_repository" name="//external:com_github_golang_protobuf">
///   <string name="name" value="com_github_golang_protobuf"/>
///   <string name="remote" value="https://github.com/golang/protobuf"/>
///   <string name="commit" value="c823c79ea1570fb5ff454033735a8e68575d1d0f"/>
///   <string name="shallow_since" value="1549405252 -0800"/>
/// </rule>
/// ```
pub fn parse_git_repository(rule: &proto::Rule) -> Result<RepositoryFields, BzlError> {
    let name = find_string_attr(rule, "name")?.unwrap_or_default();
    let import_path = find_string_attr(rule, "remote")?
        .map(|remote| normalize_remote(&remote))
        .unwrap_or_default();
    Ok(RepositoryFields {
        name,
        import_path,
        source_ref: read_revision(rule)?,
        remote: None,
    })
}
