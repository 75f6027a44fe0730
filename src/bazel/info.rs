//! Parsing of `bazel info` output.
//!
//! Only three keys matter to bzlcompat:
//!
//! ```text
//! release: release 6.4.0
//! output_base: /home/user/.cache/bazel/_bazel_user/60ed071115454b1cf2fea18770779bb0
//! workspace: /home/user/go/src/github.com/user/repo
//! ```
//!
//! Every other line is ignored so newer bazel releases can add keys freely.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::BzlError;

const RELEASE_KEY: &str = "release:";
const OUTPUT_BASE_KEY: &str = "output_base:";
const WORKSPACE_KEY: &str = "workspace:";

/// The relevant parts of the output of `bazel info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceInfo {
    /// Bazel release, e.g. `6.4.0`
    pub version: String,
    /// Absolute path of bazel's output base
    pub output_base: String,
    /// Absolute path of the workspace root
    pub workspace: String,
}

impl WorkspaceInfo {
    /// Parse the raw stdout of `bazel info`.
    ///
    /// # Errors
    ///
    /// - [`BzlError::InfoFormat`] if the `release:` line is not exactly
    ///   `release: release <version>`
    /// - [`BzlError::InfoFieldMissing`] naming the first of `release:`, `output_base:`,
    ///   `workspace:` that never appeared
    pub fn from_info_output(output: &str) -> Result<Self, BzlError> {
        let mut version = None;
        let mut output_base = None;
        let mut workspace = None;

        for line in output.lines() {
            let words: Vec<&str> = line.split(' ').collect();
            match words[0] {
                RELEASE_KEY => {
                    // Be a little paranoid here, in case the format changes
                    if words.len() != 3 || words[1] != "release" {
                        return Err(BzlError::InfoFormat {
                            line: line.to_string(),
                        });
                    }
                    version = Some(words[2].to_string());
                }
                OUTPUT_BASE_KEY => output_base = words.get(1).map(|s| (*s).to_string()),
                WORKSPACE_KEY => workspace = words.get(1).map(|s| (*s).to_string()),
                _ => {}
            }
        }

        let missing = |key: &str| BzlError::InfoFieldMissing {
            key: key.to_string(),
        };
        let version = version.filter(|v| !v.is_empty()).ok_or_else(|| missing(RELEASE_KEY))?;
        let output_base =
            output_base.filter(|v| !v.is_empty()).ok_or_else(|| missing(OUTPUT_BASE_KEY))?;
        let workspace =
            workspace.filter(|v| !v.is_empty()).ok_or_else(|| missing(WORKSPACE_KEY))?;

        Ok(Self {
            version,
            output_base,
            workspace,
        })
    }

    /// Directory bazel fetches external repositories into: `<output_base>/external`.
    #[must_use]
    pub fn external_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_base).join("external")
    }
}

impl FromStr for WorkspaceInfo {
    type Err = BzlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_info_output(s)
    }
}

impl fmt::Display for WorkspaceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "OutputBase: {}", self.output_base)?;
        writeln!(f, "Workspace: {}", self.workspace)
    }
}
