use anyhow::Result;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::common::{bzlcompat, fake_workspace};

#[test]
fn test_vendor_creates_symlinks() -> Result<()> {
    let fake = fake_workspace();
    let base = TempDir::new()?;

    bzlcompat(&fake)
        .arg("vendor")
        .arg("--vendor-base")
        .arg(base.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Created 4 symlinks in"));

    let external = fake.output_base().join("external");
    let vendor = base.path().join("vendor");
    assert_eq!(
        fs::read_link(vendor.join("github.com/pkg/errors"))?,
        external.join("com_github_pkg_errors")
    );
    assert_eq!(
        fs::read_link(vendor.join("google.golang.org/grpc"))?,
        external.join("org_golang_google_grpc")
    );
    assert_eq!(
        fs::read_link(vendor.join("github.com/golang/protobuf"))?,
        external.join("com_github_golang_protobuf")
    );
    Ok(())
}

#[test]
fn test_vendor_twice_creates_nothing_new() -> Result<()> {
    let fake = fake_workspace();
    let base = TempDir::new()?;

    bzlcompat(&fake).arg("vendor").arg("--vendor-base").arg(base.path()).assert().success();
    bzlcompat(&fake)
        .arg("vendor")
        .arg("--vendor-base")
        .arg(base.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Created 0 symlinks in"));
    Ok(())
}

#[test]
fn test_vendor_defaults_to_workspace() -> Result<()> {
    let fake = fake_workspace();

    bzlcompat(&fake).arg("vendor").assert().success();

    assert!(fs::symlink_metadata(fake.workspace().join("vendor/github.com/pkg/errors"))?
        .file_type()
        .is_symlink());
    Ok(())
}

#[test]
fn test_vendor_refuses_to_clobber_directory() -> Result<()> {
    let fake = fake_workspace();
    let base = TempDir::new()?;
    let occupied = base.path().join("vendor/github.com/pkg/errors");
    fs::create_dir_all(&occupied)?;
    fs::write(occupied.join("errors.go"), "package errors\n")?;

    bzlcompat(&fake)
        .arg("vendor")
        .arg("--vendor-base")
        .arg(base.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-symlink in the way"));

    assert!(occupied.join("errors.go").exists());
    Ok(())
}
