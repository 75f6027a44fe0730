//! Configuration for bzlcompat
//!
//! Settings come from three layers, highest priority first:
//!
//! 1. Command-line flags and environment variables (`BZLCOMPAT_BAZEL`)
//! 2. The project file, `bzlcompat.toml` (or the file named by `--config`)
//! 3. Built-in defaults
//!
//! # Project file
//!
//! ```toml
//! # Binary to run instead of `bazel` from PATH
//! bazel = "~/bin/bazelisk"
//!
//! # "repository" (default) or "library"
//! strategy = "repository"
//!
//! # Module line of the generated go.mod
//! module = "github.com/example/project"
//!
//! # Directory in which vendor/ is created
//! vendor_base = "$HOME/go/src/github.com/example/project"
//! ```
//!
//! Every key is optional. `bazel` and `vendor_base` go through tilde and environment
//! variable expansion.
//!
//! The layers are merged once into a [`RunConfig`] which is then handed to the commands;
//! nothing reads configuration from global state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::BzlError;
use crate::query::QueryStrategy;
use crate::utils::fs::read_toml_file;

/// Name of the project file looked up in the current directory.
pub const CONFIG_FILE: &str = "bzlcompat.toml";

/// Program run when nothing else is configured.
pub const DEFAULT_BAZEL: &str = "bazel";

/// One layer of settings, as found in `bzlcompat.toml` or on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Bazel executable, a name on PATH or a path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bazel: Option<String>,

    /// How external Go repositories are discovered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<QueryStrategy>,

    /// Module name for go.mod
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Directory in which `vendor/` is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_base: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load and expand a project file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw: Self = read_toml_file(path)?;
        raw.expanded().with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load `explicit` if given, else `<dir>/bzlcompat.toml` if it exists, else defaults.
    ///
    /// An explicitly named file that does not exist is an error.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(BzlError::ConfigError {
                    message: format!("Config file not found: {}", path.display()),
                }
                .into());
            }
            tracing::debug!("Loading config from {}", path.display());
            return Self::load_from(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.exists() {
            tracing::debug!("Loading config from {}", candidate.display());
            Self::load_from(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn expanded(self) -> Result<Self> {
        let bazel = self.bazel.map(|b| expand(&b)).transpose()?;
        let vendor_base = self
            .vendor_base
            .map(|p| expand(&p.to_string_lossy()).map(PathBuf::from))
            .transpose()?;
        Ok(Self {
            bazel,
            vendor_base,
            ..self
        })
    }
}

/// Tilde and `$VAR` expansion.
pub fn expand(raw: &str) -> Result<String> {
    shellexpand::full(raw)
        .map(std::borrow::Cow::into_owned)
        .with_context(|| {
            format!(
                "Failed to expand '{raw}'\n\nCheck that every referenced environment variable is set"
            )
        })
}

/// Settings after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Bazel executable
    pub bazel: String,
    /// Discovery strategy
    pub strategy: QueryStrategy,
    /// go.mod module name, required only by `gomod`
    pub module: Option<String>,
    /// vendor/ parent, defaults to the workspace root
    pub vendor_base: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::resolve(ProjectConfig::default(), ProjectConfig::default())
    }
}

impl RunConfig {
    /// Merge the command-line layer over the file layer, then apply defaults.
    #[must_use]
    pub fn resolve(overrides: ProjectConfig, file: ProjectConfig) -> Self {
        Self {
            bazel: overrides.bazel.or(file.bazel).unwrap_or_else(|| DEFAULT_BAZEL.to_string()),
            strategy: overrides.strategy.or(file.strategy).unwrap_or_default(),
            module: overrides.module.or(file.module).filter(|m| !m.is_empty()),
            vendor_base: overrides.vendor_base.or(file.vendor_base),
        }
    }

    /// The module name, or a configuration error naming both ways to set it.
    pub fn require_module(&self) -> Result<&str, BzlError> {
        self.module.as_deref().ok_or_else(|| BzlError::ConfigError {
            message: "No module name given (pass --module or set 'module' in bzlcompat.toml)"
                .to_string(),
        })
    }
}
