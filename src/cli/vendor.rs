//! `bzlcompat vendor`: populate `vendor/` with symlinks into bazel's output base.
//!
//! ```bash
//! bzlcompat vendor --vendor-base ~/go/src/github.com/example/project
//! ```
//!
//! Without `--vendor-base` (or `vendor_base` in `bzlcompat.toml`) the workspace root
//! reported by `bazel info` is used.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{CommandContext, CommandExecutor};
use crate::vendor::materialize;

/// Symlink external Go repositories into a vendor/ directory
#[derive(Args, Debug, Clone, Default)]
pub struct VendorCommand {
    /// Directory to create vendor/ in
    #[arg(long, value_name = "DIR")]
    pub vendor_base: Option<PathBuf>,
}

impl CommandExecutor for VendorCommand {
    async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let (info, deps) = ctx.discover().await?;
        let vendor_base = ctx
            .config
            .vendor_base
            .clone()
            .unwrap_or_else(|| PathBuf::from(&info.workspace));
        materialize(&vendor_base, &info, &deps)?;
        Ok(())
    }
}
