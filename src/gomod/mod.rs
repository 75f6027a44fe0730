//! go.mod generation
//!
//! Renders a [`DependencyMapping`] as a `go.mod` so that Go tooling (gopls, `go vet`,
//! editors) resolves the same versions bazel builds with.
//!
//! ```text
//! module example.com/me
//!
//! require (
//! 	github.com/pkg/errors 645ef00459ed84a119197bfb8d8205042c6df63d
//! 	example.com/forked v0.0.0
//! )
//! replace example.com/forked => github.com/me/forked 1f2e3d4c
//! ```
//!
//! Records fetched from a different remote than their import path get a placeholder
//! `require` version plus a `replace` directive pointing at the remote.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::{Context as TeraContext, Tera};

use crate::bazel::WorkspaceInfo;
use crate::core::BzlError;
use crate::query::DependencyMapping;
use crate::utils::fs::safe_write;

/// Version used when no revision is known, and for requirements satisfied by `replace`.
pub const PLACEHOLDER_VERSION: &str = "v0.0.0";

/// File name written into the workspace root.
pub const GO_MOD_FILE: &str = "go.mod";

const GO_MOD_TEMPLATE: &str = "module {{ module }}

require (
{% for req in requires %}\t{{ req.import_path }} {{ req.version }}
{% endfor %})
{% for rep in replaces %}replace {{ rep.import_path }} => {{ rep.remote }} {{ rep.version }}
{% endfor %}";

#[derive(Serialize)]
struct Require<'a> {
    import_path: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
struct Replace<'a> {
    import_path: &'a str,
    remote: &'a str,
    version: &'a str,
}

/// Render the go.mod contents for `module`.
///
/// Requirements appear in repository-name order, which is the iteration order of the
/// mapping.
///
/// # Errors
///
/// [`BzlError::ConfigError`] for an empty module name, [`BzlError::TemplateError`] if
/// rendering fails.
pub fn render_go_mod(module: &str, deps: &DependencyMapping) -> Result<String, BzlError> {
    if module.trim().is_empty() {
        return Err(BzlError::ConfigError {
            message: "go.mod module name must not be empty (pass --module or set 'module' in bzlcompat.toml)".to_string(),
        });
    }

    let mut requires = Vec::with_capacity(deps.len());
    let mut replaces = Vec::new();
    for dep in deps.values() {
        let version = dep.source_ref.as_deref().unwrap_or(PLACEHOLDER_VERSION);
        match dep.remote.as_deref() {
            Some(remote) => {
                requires.push(Require {
                    import_path: &dep.import_path,
                    version: PLACEHOLDER_VERSION,
                });
                replaces.push(Replace {
                    import_path: &dep.import_path,
                    remote,
                    version,
                });
            }
            None => requires.push(Require {
                import_path: &dep.import_path,
                version,
            }),
        }
    }

    let mut context = TeraContext::new();
    context.insert("module", module);
    context.insert("requires", &requires);
    context.insert("replaces", &replaces);

    let mut tera = Tera::default();
    tera.render_str(GO_MOD_TEMPLATE, &context).map_err(|e| BzlError::TemplateError {
        reason: error_chain(&e),
    })
}

/// Render and atomically write `<workspace>/go.mod`, returning its path.
pub fn write_go_mod(module: &str, info: &WorkspaceInfo, deps: &DependencyMapping) -> Result<PathBuf> {
    let content = render_go_mod(module, deps)?;
    let path = Path::new(&info.workspace).join(GO_MOD_FILE);
    safe_write(&path, &content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created go.mod");
    Ok(path)
}

/// Tera nests the useful message in the source chain.
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
