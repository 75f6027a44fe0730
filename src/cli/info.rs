//! `bzlcompat info`: show what bzlcompat reads from `bazel info`.

use anyhow::Result;
use clap::Args;

use crate::cli::common::{CommandContext, CommandExecutor};

/// Print the bazel release, output base and workspace root
#[derive(Args, Debug, Clone, Default)]
pub struct InfoCommand {}

impl CommandExecutor for InfoCommand {
    async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let info = ctx.workspace_info().await?;
        print!("{info}");
        Ok(())
    }
}
