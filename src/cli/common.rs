//! Shared plumbing for the subcommands

use anyhow::Result;

use crate::bazel::{Bazel, WorkspaceInfo};
use crate::config::RunConfig;
use crate::query::DependencyMapping;

/// Common trait for CLI command execution
pub trait CommandExecutor: Sized {
    /// Run the command against the resolved configuration.
    fn execute(self, ctx: &CommandContext) -> impl std::future::Future<Output = Result<()>>;
}

/// Everything a subcommand needs: the merged configuration and a bazel client built
/// from it.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Merged flags, project file and defaults
    pub config: RunConfig,
    /// Client for the configured bazel binary
    pub bazel: Bazel,
}

impl CommandContext {
    /// Build a context for `config`.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        let bazel = Bazel::new(config.bazel.clone());
        Self {
            config,
            bazel,
        }
    }

    /// Run `bazel info` and log the release.
    pub async fn workspace_info(&self) -> Result<WorkspaceInfo> {
        let info = self.bazel.info().await?;
        tracing::info!("Bazel version: {}", info.version);
        Ok(info)
    }

    /// Workspace info plus the decoded external Go dependencies.
    pub async fn discover(&self) -> Result<(WorkspaceInfo, DependencyMapping)> {
        let info = self.workspace_info().await?;
        let deps = self.bazel.query(self.config.strategy).await?;
        tracing::info!("Found {} external dependencies", deps.len());
        Ok((info, deps))
    }
}
