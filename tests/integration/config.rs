use anyhow::Result;
use predicates::prelude::*;
use std::fs;

use crate::common::{bzlcompat, fake_workspace};

#[test]
fn test_bazel_from_config_file() -> Result<()> {
    let fake = fake_workspace();
    let config = fake.workspace().join("custom.toml");
    fs::write(&config, format!("bazel = \"{}\"\n", fake.bazel_path().display()))?;

    bzlcompat(&fake)
        .env_remove("BZLCOMPAT_BAZEL")
        .args(["--config", "custom.toml", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Version: 6.4.0"));
    Ok(())
}

#[test]
fn test_flag_overrides_config_file() -> Result<()> {
    let fake = fake_workspace();
    fs::write(fake.workspace().join("bzlcompat.toml"), "bazel = \"bzlcompat-no-such-bazel\"\n")?;

    // BZLCOMPAT_BAZEL (set by the helper) wins over the file
    bzlcompat(&fake).arg("info").assert().success();
    Ok(())
}

#[test]
fn test_explicit_missing_config_fails() {
    let fake = fake_workspace();

    bzlcompat(&fake)
        .args(["-c", "nope.toml", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let fake = fake_workspace();
    fs::write(fake.workspace().join("bzlcompat.toml"), "strategy = \"everything\"\n")?;

    bzlcompat(&fake)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bzlcompat.toml"));
    Ok(())
}
