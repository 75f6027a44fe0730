//! Integration test suite for bzlcompat
//!
//! Drives the real binary against a scripted fake `bazel` (see
//! `bzlcompat::test_utils::FakeBazel`) that answers `bazel info` with paths inside a
//! temporary directory and `bazel query` with a protobuf result built in the test.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! The fake bazel is a shell script, so the suite only runs on Unix.

#![cfg(unix)]

mod common;

mod config;
mod errors;
mod gomod;
mod info;
mod list;
mod vendor;
