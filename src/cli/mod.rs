//! Command-line interface for bzlcompat.
//!
//! Each subcommand lives in its own module with its own argument struct and implements
//! [`common::CommandExecutor`]. All of them run `bazel info` first and, except `info`,
//! `bazel query` for the configured strategy.
//!
//! # Available Commands
//!
//! - `gomod` - Write `go.mod` into the workspace root
//! - `vendor` - Create `vendor/` symlinks into bazel's output base
//! - `list` - Print the external Go repositories bazel knows about
//! - `info` - Print the parsed `bazel info` fields
//!
//! # Usage
//!
//! ```bash
//! # go.mod for editors and gopls
//! bzlcompat gomod --module github.com/example/project
//!
//! # vendor/ tree for tools that cannot read go.mod replacements
//! bzlcompat vendor --vendor-base ~/go/src/github.com/example/project
//!
//! # Inspect what would be generated
//! bzlcompat --strategy library list --format json
//!
//! # Use bazelisk
//! BZLCOMPAT_BAZEL=bazelisk bzlcompat list
//! ```
//!
//! # Configuration
//!
//! Global flags override `bzlcompat.toml`, which overrides the defaults. See
//! [`crate::config`] for the file format.

pub mod common;
pub mod gomod;
pub mod info;
pub mod list;
pub mod vendor;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{ProjectConfig, RunConfig};
use crate::query::QueryStrategy;
use common::{CommandContext, CommandExecutor};

/// Process-level settings derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can drive
/// [`execute_with_config`](Cli::execute_with_config) without going through argument
/// parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log directive when `RUST_LOG` is unset
    pub log_level: Option<String>,

    /// Explicit project file, instead of `./bzlcompat.toml`
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over `log_level`; with neither set the level is `info`. Output goes
    /// to stderr so stdout only carries command output. Calling this twice is harmless.
    pub fn init_logging(&self) {
        let default = self.log_level.as_deref().unwrap_or("info");
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .try_init();
    }
}

/// Expose bazel-managed Go dependencies to Go tooling
#[derive(Parser, Debug)]
#[command(
    name = "bzlcompat",
    about = "Bazel compatibility shim - expose Bazel-managed Go dependencies to go.mod and vendor/ tooling",
    version,
    long_about = "bzlcompat asks bazel which external Go repositories a workspace uses and makes them \
                  visible to the regular Go toolchain, either as a go.mod or as a vendor/ tree of \
                  symlinks into bazel's output base."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging).
    ///
    /// Shows every bazel invocation, its timing and each symlink touched. Equivalent to
    /// `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a bzlcompat.toml to use instead of ./bzlcompat.toml.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bazel executable to run.
    #[arg(long, global = true, env = "BZLCOMPAT_BAZEL", value_name = "PROGRAM")]
    bazel: Option<String>,

    /// How external Go repositories are discovered.
    ///
    /// `repository` reads go_repository/git_repository rules and knows revisions and
    /// remotes; `library` reads the go_library targets the workspace depends on.
    #[arg(long, global = true, value_enum)]
    strategy: Option<QueryStrategy>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write go.mod into the workspace root.
    ///
    /// See [`gomod::GomodCommand`].
    Gomod(gomod::GomodCommand),

    /// Create vendor/ symlinks into bazel's external repositories.
    ///
    /// See [`vendor::VendorCommand`].
    Vendor(vendor::VendorCommand),

    /// List external Go repositories.
    ///
    /// See [`list::ListCommand`].
    List(list::ListCommand),

    /// Show the bazel release, output base and workspace.
    ///
    /// See [`info::InfoCommand`].
    Info(info::InfoCommand),
}

impl Cli {
    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Flags that override the project file.
    fn overrides(&self) -> ProjectConfig {
        let (module, vendor_base) = match &self.command {
            Commands::Gomod(cmd) => (cmd.module.clone(), None),
            Commands::Vendor(cmd) => (None, cmd.vendor_base.clone()),
            Commands::List(_) | Commands::Info(_) => (None, None),
        };
        ProjectConfig {
            bazel: self.bazel.clone(),
            strategy: self.strategy,
            module,
            vendor_base,
        }
    }

    /// Resolve the project configuration and run the subcommand.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let file = ProjectConfig::discover(config.config_path.as_deref(), &cwd)?;
        let run = RunConfig::resolve(self.overrides(), file);
        tracing::debug!("Resolved configuration: {:?}", run);

        let ctx = CommandContext::new(run);
        match self.command {
            Commands::Gomod(cmd) => cmd.execute(&ctx).await,
            Commands::Vendor(cmd) => cmd.execute(&ctx).await,
            Commands::List(cmd) => cmd.execute(&ctx).await,
            Commands::Info(cmd) => cmd.execute(&ctx).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["bzlcompat", "-v", "-q", "list"]).is_err());
    }

    #[test]
    fn test_log_levels() {
        let cli = Cli::try_parse_from(["bzlcompat", "--verbose", "info"]).unwrap();
        assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));

        let cli = Cli::try_parse_from(["bzlcompat", "info", "--quiet"]).unwrap();
        assert_eq!(cli.build_config().log_level.as_deref(), Some("error"));

        let cli = Cli::try_parse_from(["bzlcompat", "info"]).unwrap();
        assert_eq!(cli.build_config().log_level.as_deref(), Some("info"));
    }

    #[test]
    fn test_gomod_overrides() {
        let cli = Cli::try_parse_from([
            "bzlcompat",
            "--bazel",
            "/opt/bazel",
            "--strategy",
            "library",
            "gomod",
            "--module",
            "example.com/me",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.bazel.as_deref(), Some("/opt/bazel"));
        assert_eq!(overrides.strategy, Some(QueryStrategy::Library));
        assert_eq!(overrides.module.as_deref(), Some("example.com/me"));
        assert_eq!(overrides.vendor_base, None);
    }

    #[test]
    fn test_vendor_overrides() {
        let cli =
            Cli::try_parse_from(["bzlcompat", "vendor", "--vendor-base", "/src/project"]).unwrap();
        assert_eq!(cli.overrides().vendor_base, Some(PathBuf::from("/src/project")));
    }

    #[test]
    fn test_list_format() {
        let cli = Cli::try_parse_from(["bzlcompat", "list", "--format", "json"]).unwrap();
        match cli.command {
            Commands::List(cmd) => assert_eq!(cmd.format, list::OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["bzlcompat", "list", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::try_parse_from(["bzlcompat", "-c", "other.toml", "info"]).unwrap();
        assert_eq!(cli.build_config().config_path, Some(PathBuf::from("other.toml")));
    }
}
