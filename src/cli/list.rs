//! `bzlcompat list`: print the decoded dependency mapping.
//!
//! ```bash
//! bzlcompat list
//! bzlcompat list --format json > deps.json
//! ```
//!
//! # Output Formats
//!
//! ## Text (default)
//! ```text
//! com_github_pkg_errors  github.com/pkg/errors  645ef00459ed84a119197bfb8d8205042c6df63d
//! com_example_forked     example.com/forked     1f2e3d4c => github.com/me/forked
//! org_golang_x_net       golang.org/x/net       -
//! ```
//!
//! ## JSON
//! ```json
//! {
//!   "com_github_pkg_errors": {
//!     "import_path": "github.com/pkg/errors",
//!     "source_ref": "645ef00459ed84a119197bfb8d8205042c6df63d"
//!   }
//! }
//! ```
//!
//! Only the listing goes to stdout; logs stay on stderr.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::cli::common::{CommandContext, CommandExecutor};
use crate::query::DependencyMapping;

/// Output format for `list`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns: name, import path, revision, remote
    #[default]
    Text,
    /// JSON object keyed by repository name
    Json,
}

/// List external Go repositories and their import paths
#[derive(Args, Debug, Clone, Default)]
pub struct ListCommand {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CommandExecutor for ListCommand {
    async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let (_, deps) = ctx.discover().await?;
        let rendered = match self.format {
            OutputFormat::Text => format_text(&deps),
            OutputFormat::Json => format_json(&deps)?,
        };
        print!("{rendered}");
        Ok(())
    }
}

fn format_text(deps: &DependencyMapping) -> String {
    let name_width = deps.keys().map(String::len).max().unwrap_or(0);
    let path_width = deps.values().map(|d| d.import_path.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (name, dep) in deps {
        let line = format!(
            "{name:<name_width$}  {path:<path_width$}  {rev}",
            path = dep.import_path,
            rev = dep.source_ref.as_deref().unwrap_or("-"),
        );
        out.push_str(&line);
        if let Some(remote) = &dep.remote {
            out.push_str(" => ");
            out.push_str(remote);
        }
        out.push('\n');
    }
    out
}

fn format_json(deps: &DependencyMapping) -> Result<String> {
    let mut json = serde_json::to_string_pretty(deps).context("Failed to serialize dependencies")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::DependencyRecord;

    fn deps() -> DependencyMapping {
        let mut deps = DependencyMapping::new();
        deps.insert(
            "com_example_forked".to_string(),
            DependencyRecord {
                import_path: "example.com/forked".to_string(),
                source_ref: Some("1f2e3d4c".to_string()),
                remote: Some("github.com/me/forked".to_string()),
            },
        );
        deps.insert(
            "org_golang_x_net".to_string(),
            DependencyRecord {
                import_path: "golang.org/x/net".to_string(),
                source_ref: None,
                remote: None,
            },
        );
        deps
    }

    #[test]
    fn test_text_format() {
        assert_eq!(
            format_text(&deps()),
            "com_example_forked  example.com/forked  1f2e3d4c => github.com/me/forked\n\
             org_golang_x_net    golang.org/x/net    -\n"
        );
    }

    #[test]
    fn test_text_format_empty() {
        assert_eq!(format_text(&DependencyMapping::new()), "");
    }

    #[test]
    fn test_json_format_skips_missing_fields() {
        let json = format_json(&deps()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["com_example_forked"]["remote"], "github.com/me/forked");
        assert_eq!(value["org_golang_x_net"]["import_path"], "golang.org/x/net");
        assert!(value["org_golang_x_net"].get("source_ref").is_none());
    }
}
