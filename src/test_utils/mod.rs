//! Test utilities for bzlcompat
//!
//! Helpers shared by the unit tests and the integration suite (enabled there through the
//! `test-utils` feature):
//! - [`proto_builders`] - Build `bazel query --output=proto` results in memory
//! - [`fixtures`] - Canned `bazel info` output and a scripted fake `bazel` executable
//!
//! # Example
//!
//! ```rust,no_run
//! use bzlcompat::test_utils::proto_builders::{RuleBuilder, query_result};
//!
//! let result = query_result(vec![
//!     RuleBuilder::new("go_repository", "com_github_pkg_errors")
//!         .string("importpath", "github.com/pkg/errors")
//!         .target(),
//! ]);
//! ```

pub mod fixtures;
pub mod proto_builders;

pub use fixtures::{FakeBazel, InfoFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise `RUST_LOG`;
/// with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
