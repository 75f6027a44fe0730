//! bzlcompat - expose Bazel-managed Go dependencies to the Go toolchain
//!
//! Bazel fetches external Go repositories into its own output base, where `go build`,
//! gopls and friends cannot see them. bzlcompat asks bazel which repositories a
//! workspace uses and makes them visible again, either as a `go.mod` or as a `vendor/`
//! tree of symlinks.
//!
//! # Architecture Overview
//!
//! ```text
//! bazel info ──────────────► bazel::info ──► WorkspaceInfo ─┐
//!                                                           ├─► gomod  (go.mod)
//! bazel query --output=proto ► query ──► DependencyMapping ─┴─► vendor (symlinks)
//! ```
//!
//! # Core Modules
//!
//! - [`bazel`] - Running bazel and parsing `bazel info`
//! - [`query`] - Decoding `bazel query --output=proto` into dependency records
//! - [`gomod`] - Rendering and writing `go.mod`
//! - [`vendor`] - Materialising `vendor/` symlinks
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line interface
//! - [`config`] - `bzlcompat.toml` loading and flag precedence
//! - [`core`] - Error types and user-facing error rendering
//! - [`utils`] - Filesystem helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use bzlcompat::bazel::Bazel;
//! use bzlcompat::query::QueryStrategy;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let bazel = Bazel::new("bazel");
//! let info = bazel.info().await?;
//! let deps = bazel.query(QueryStrategy::Repository).await?;
//! bzlcompat::gomod::write_go_mod("github.com/example/project", &info, &deps)?;
//! # Ok(())
//! # }
//! ```

pub mod bazel;
pub mod cli;
pub mod config;
pub mod core;
pub mod gomod;
pub mod query;
pub mod utils;
pub mod vendor;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
