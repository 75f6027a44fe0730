//! File system helpers shared by the go.mod writer, the vendor tree and config loading
//!
//! # Examples
//!
//! ```rust,no_run
//! use bzlcompat::utils::fs::dirs::ensure_dir;
//! use bzlcompat::utils::fs::safe_write;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("vendor/github.com/pkg"))?;
//! safe_write(Path::new("go.mod"), "module example.com/me\n")?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;
pub mod formats;

pub use atomic::safe_write;
pub use dirs::ensure_parent_dir;
pub use formats::read_toml_file;
