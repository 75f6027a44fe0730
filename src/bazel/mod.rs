//! Talking to bazel
//!
//! bzlcompat never links against bazel; it shells out to the `bazel` binary (or whatever
//! [`crate::config::RunConfig::bazel`] names) and parses what comes back:
//!
//! - [`Bazel::info`] runs `bazel info` and parses it into a [`WorkspaceInfo`]
//! - [`Bazel::query`] runs `bazel query <expr> --output=proto` for the chosen
//!   [`QueryStrategy`] and decodes the result into a [`DependencyMapping`]
//!
//! Both commands run from the current directory, which must be inside a bazel workspace.

pub mod command_builder;
pub mod info;

pub use command_builder::{BazelCommand, BazelCommandOutput};
pub use info::WorkspaceInfo;

use anyhow::{Context, Result};

use crate::query::{self, DependencyMapping, QueryStrategy};

/// Handle on a bazel binary.
#[derive(Debug, Clone)]
pub struct Bazel {
    program: String,
}

impl Bazel {
    /// Client for `program`, looked up on `PATH` unless it is a path.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self) -> BazelCommand {
        BazelCommand::new(self.program.clone())
    }

    /// Run `bazel info` and parse the result.
    pub async fn info(&self) -> Result<WorkspaceInfo> {
        let output = self
            .command()
            .arg("info")
            .with_context("workspace info")
            .execute()
            .await?;
        let text = output.stdout_text()?;
        let info = WorkspaceInfo::from_info_output(&text)?;
        tracing::debug!("Workspace info:\n{}", info);
        Ok(info)
    }

    /// Run the query for `strategy` and decode its protobuf output.
    pub async fn query(&self, strategy: QueryStrategy) -> Result<DependencyMapping> {
        let output = self
            .command()
            .args(["query", strategy.query_expression(), "--output=proto"])
            .with_context("external dependencies")
            .execute()
            .await?;
        let deps = query::decode_query(&output.stdout, strategy)
            .context("Failed to decode bazel query output")?;
        Ok(deps)
    }
}
