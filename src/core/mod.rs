//! Core types shared across bzlcompat
//!
//! The only thing every layer needs is the error type and its user-facing rendering:
//! - [`BzlError`] - Enumerated error types covering all bzlcompat failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format

pub mod error;

pub use error::{BzlError, ErrorContext, user_friendly_error};
