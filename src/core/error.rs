//! Error handling for bzlcompat
//!
//! This module provides the error type shared by every layer of bzlcompat and the
//! user-friendly rendering used by the CLI. The error system follows two rules:
//! 1. **Strongly-typed errors** for the decoding core, so callers and tests can match on
//!    the exact failure
//! 2. **User-friendly messages** with actionable suggestions when an error reaches the CLI
//!
//! # Error Categories
//!
//! - **Format errors**: the `bazel info` text or the `bazel query` protobuf does not have
//!   the expected shape ([`BzlError::InfoFormat`], [`BzlError::InfoFieldMissing`],
//!   [`BzlError::QueryDecode`], [`BzlError::AttributeType`], [`BzlError::LabelFormat`])
//! - **Missing data**: a rule decoded correctly but lacks a mandatory derived field
//!   ([`BzlError::MissingName`], [`BzlError::MissingImportPath`])
//! - **Bazel invocation**: [`BzlError::BazelNotFound`], [`BzlError::BazelCommandError`]
//! - **Filesystem**: [`BzlError::SymlinkConflict`]
//! - **Configuration**: [`BzlError::ConfigError`], [`BzlError::TomlError`]
//!
//! Tolerable input (non-rule targets, unsupported rule classes) never becomes an error; it
//! is logged with `tracing::warn!` and skipped by the decoder.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bzlcompat::core::{BzlError, user_friendly_error};
//!
//! let err = BzlError::InfoFieldMissing { key: "workspace:".to_string() };
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for bzlcompat operations
///
/// The decoding core (`bazel::info`, `query`) returns this type directly. Higher layers
/// wrap it in [`anyhow::Error`] with additional context, and [`user_friendly_error`]
/// recovers it again for display.
#[derive(Error, Debug)]
pub enum BzlError {
    /// The `release:` line of `bazel info` did not look like `release: release <version>`
    #[error("Unable to parse version from 'bazel info' output:\n    {line}")]
    InfoFormat {
        /// The full offending line
        line: String,
    },

    /// A mandatory `bazel info` key never appeared in the output
    #[error("Unable to find '{key}' line in 'bazel info' output")]
    InfoFieldMissing {
        /// The key that was not found, including the trailing colon
        key: String,
    },

    /// The protobuf envelope of the query result could not be decoded
    #[error("Unable to decode 'bazel query' output: {0}")]
    QueryDecode(#[from] prost::DecodeError),

    /// A rule attribute did not carry the expected type
    #[error("Rule attribute {attribute} is not of type {expected}, instead got {actual}")]
    AttributeType {
        /// Attribute name
        attribute: String,
        /// The type the decoder requires
        expected: String,
        /// The type found in the query result
        actual: String,
    },

    /// A target label did not match `@<repo>//<package>:<target>`
    #[error("Unable to parse external label: {label}")]
    LabelFormat {
        /// The offending label
        label: String,
    },

    /// A rule had no usable `name`
    #[error("Unable to find name for {rule}")]
    MissingName {
        /// Label of the offending rule
        rule: String,
    },

    /// A rule ended up with an empty import path after normalisation
    #[error("Unable to find importpath for {rule}")]
    MissingImportPath {
        /// Label of the offending rule
        rule: String,
    },

    /// The bazel executable could not be located
    #[error("Bazel is not installed or '{program}' was not found in PATH")]
    BazelNotFound {
        /// The program name or path that was looked up
        program: String,
    },

    /// A bazel subcommand exited unsuccessfully
    #[error("'{command}' exited with {code}:\n\n{stderr}")]
    BazelCommandError {
        /// The full command line
        command: String,
        /// Exit code, or -1 when the process was killed by a signal
        code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// Something other than a symlink occupies a vendor path
    #[error("non-symlink in the way: {path}")]
    SymlinkConflict {
        /// The conflicting path
        path: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Manifest template rendering failed
    #[error("Failed to render go.mod: {reason}")]
    TemplateError {
        /// Rendering failure reason
        reason: String,
    },

    /// Operation not supported on this platform
    #[error("Operation not supported on this platform: {operation}")]
    PlatformNotSupported {
        /// The operation that cannot be performed
        operation: String,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for BzlError {
    fn clone(&self) -> Self {
        match self {
            Self::InfoFormat {
                line,
            } => Self::InfoFormat {
                line: line.clone(),
            },
            Self::InfoFieldMissing {
                key,
            } => Self::InfoFieldMissing {
                key: key.clone(),
            },
            Self::QueryDecode(e) => Self::QueryDecode(e.clone()),
            Self::AttributeType {
                attribute,
                expected,
                actual,
            } => Self::AttributeType {
                attribute: attribute.clone(),
                expected: expected.clone(),
                actual: actual.clone(),
            },
            Self::LabelFormat {
                label,
            } => Self::LabelFormat {
                label: label.clone(),
            },
            Self::MissingName {
                rule,
            } => Self::MissingName {
                rule: rule.clone(),
            },
            Self::MissingImportPath {
                rule,
            } => Self::MissingImportPath {
                rule: rule.clone(),
            },
            Self::BazelNotFound {
                program,
            } => Self::BazelNotFound {
                program: program.clone(),
            },
            Self::BazelCommandError {
                command,
                code,
                stderr,
            } => Self::BazelCommandError {
                command: command.clone(),
                code: *code,
                stderr: stderr.clone(),
            },
            Self::SymlinkConflict {
                path,
            } => Self::SymlinkConflict {
                path: path.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::TemplateError {
                reason,
            } => Self::TemplateError {
                reason: reason.clone(),
            },
            Self::PlatformNotSupported {
                operation,
            } => Self::PlatformNotSupported {
                operation: operation.clone(),
            },
            // toml::de::Error is not Clone
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`BzlError`] and adds an optional suggestion and details.
/// When displayed, the error is shown in red, details in yellow and the suggestion in
/// green.
///
/// ```rust,no_run
/// use bzlcompat::core::{BzlError, ErrorContext};
///
/// let context = ErrorContext::new(BzlError::BazelNotFound { program: "bazel".into() })
///     .with_suggestion("Install bazel or pass --bazel /path/to/bazel");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: BzlError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: BzlError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognises [`BzlError`] anywhere in the error chain (so `.context(..)` wrapping done by
/// the command layer does not hide it), then [`std::io::Error`], and otherwise falls back
/// to a generic message that includes the full chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(bzl_error) = error.chain().find_map(|e| e.downcast_ref::<BzlError>()) {
        let ctx = create_error_context(bzl_error.clone());
        // Keep the outer context messages visible
        if error.downcast_ref::<BzlError>().is_none() && ctx.details.is_none() {
            return ctx.with_details(error.to_string());
        }
        return ctx;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(BzlError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check ownership and permissions of the vendor and workspace directories");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(BzlError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(BzlError::Other {
        message,
    })
}

/// Attach suggestions to the error variants users can act on.
fn create_error_context(error: BzlError) -> ErrorContext {
    let (suggestion, details): (Option<String>, Option<&str>) = match &error {
        BzlError::BazelNotFound { .. } => (
            Some("Install bazel (or bazelisk), or point --bazel / BZLCOMPAT_BAZEL at the executable".to_string()),
            Some("bzlcompat runs 'bazel info' and 'bazel query' to discover external Go repositories"),
        ),
        BzlError::BazelCommandError { .. } => (
            Some("Run the command by hand from the workspace root to see the full bazel output".to_string()),
            None,
        ),
        BzlError::InfoFormat { .. } | BzlError::InfoFieldMissing { .. } => (
            Some("Check that 'bazel info' works in this workspace and report the bazel version in use".to_string()),
            Some("The 'bazel info' output format may have changed"),
        ),
        BzlError::QueryDecode(_) | BzlError::AttributeType { .. } | BzlError::LabelFormat { .. } => {
            (None, Some("The 'bazel query --output=proto' format may have changed in this bazel release"))
        }
        BzlError::MissingName { rule } | BzlError::MissingImportPath { rule } => {
            (Some(format!("Check the declaration of {rule} in your WORKSPACE")), None)
        }
        BzlError::SymlinkConflict { path } => (
            Some(format!("Move or delete '{path}' so a vendor symlink can be created there")),
            None,
        ),
        BzlError::ConfigError { .. } | BzlError::TomlError(_) => {
            (Some("Check bzlcompat.toml and the command-line flags".to_string()), None)
        }
        _ => (None, None),
    };

    let mut ctx = ErrorContext::new(error);
    if let Some(suggestion) = suggestion {
        ctx = ctx.with_suggestion(suggestion);
    }
    if let Some(details) = details {
        ctx = ctx.with_details(details);
    }
    ctx
}
