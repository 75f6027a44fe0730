//! Small shared utilities
//!
//! - [`fs`] - atomic writes, directory creation and TOML loading

pub mod fs;
