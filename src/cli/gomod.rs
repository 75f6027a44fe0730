//! `bzlcompat gomod`: write a go.mod into the workspace root.
//!
//! ```bash
//! bzlcompat gomod --module github.com/example/project
//! ```
//!
//! The module name may also come from `module` in `bzlcompat.toml`.

use anyhow::Result;
use clap::Args;

use crate::cli::common::{CommandContext, CommandExecutor};
use crate::gomod::write_go_mod;

/// Generate `<workspace>/go.mod` from bazel's external Go repositories
#[derive(Args, Debug, Clone, Default)]
pub struct GomodCommand {
    /// Module name for the go.mod file
    #[arg(short, long)]
    pub module: Option<String>,
}

impl CommandExecutor for GomodCommand {
    async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let module = ctx.config.require_module()?;
        let (info, deps) = ctx.discover().await?;
        let path = write_go_mod(module, &info, &deps)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}
