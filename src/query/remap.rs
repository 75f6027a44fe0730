//! Import path corrections for repositories whose fetch location differs from their
//! Go import path.
//!
//! rules_go declares a handful of well-known repositories with URLs that do not match the
//! import path Go code uses (see `go/private/repositories.bzl` in rules_go 0.18.x). These
//! tables map them back.

/// Repository name → import path that always wins, whatever the rule declared.
pub const NAME_REMAPS: &[(&str, &str)] = &[
    ("org_golang_google_grpc", "google.golang.org/grpc"),
    ("org_golang_google_genproto", "google.golang.org/genproto"),
];

/// Hosting prefix → import path prefix.
pub const PREFIX_REMAPS: &[(&str, &str)] = &[("go.googlesource.com/", "golang.org/x/")];

/// Suffix marking remotes that are not expected to hold Go source.
pub const NON_GO_SUFFIX: &str = ".git";

/// Forced import path for `name`, if it is one of the known exceptions.
#[must_use]
pub fn name_remap(name: &str) -> Option<&'static str> {
    NAME_REMAPS.iter().find(|(n, _)| *n == name).map(|(_, path)| *path)
}

/// Rewrite a hosting prefix to its import path prefix. Only the first matching entry
/// applies.
#[must_use]
pub fn prefix_remap(import_path: &str) -> Option<String> {
    PREFIX_REMAPS.iter().find_map(|(from, to)| {
        import_path.strip_prefix(from).map(|rest| format!("{to}{rest}"))
    })
}

/// Apply the name table, then the prefix table.
#[must_use]
pub fn apply_remaps(name: &str, import_path: &str) -> String {
    let import_path = name_remap(name).unwrap_or(import_path);
    prefix_remap(import_path).unwrap_or_else(|| import_path.to_string())
}

/// Whether a normalised import path should be dropped from the mapping.
#[must_use]
pub fn is_non_go(import_path: &str) -> bool {
    import_path.ends_with(NON_GO_SUFFIX)
}
