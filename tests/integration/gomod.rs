use anyhow::Result;
use predicates::prelude::*;
use std::fs;

use crate::common::{bzlcompat, fake_workspace};

#[test]
fn test_gomod_writes_workspace_root() -> Result<()> {
    let fake = fake_workspace();

    bzlcompat(&fake)
        .args(["gomod", "--module", "example.com/me"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Bazel version: 6.4.0"))
        .stderr(predicate::str::contains("Found 4 external dependencies"))
        .stderr(predicate::str::contains("Created go.mod"));

    let go_mod = fs::read_to_string(fake.workspace().join("go.mod"))?;
    assert_eq!(
        go_mod,
        "module example.com/me\n\
         \n\
         require (\n\
         \texample.com/forked v0.0.0\n\
         \tgithub.com/golang/protobuf c823c79ea1570fb5ff454033735a8e68575d1d0f\n\
         \tgithub.com/pkg/errors 645ef00459ed84a119197bfb8d8205042c6df63d\n\
         \tgoogle.golang.org/grpc v1.20.0\n\
         )\n\
         replace example.com/forked => github.com/me/forked v1.2.0\n"
    );
    Ok(())
}

#[test]
fn test_gomod_without_module_fails_before_bazel() -> Result<()> {
    let fake = fake_workspace();

    bzlcompat(&fake)
        .arg("gomod")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No module name given"));

    assert!(fake.query_args().is_none());
    assert!(!fake.workspace().join("go.mod").exists());
    Ok(())
}

#[test]
fn test_gomod_module_from_config_file() -> Result<()> {
    let fake = fake_workspace();
    fs::write(fake.workspace().join("bzlcompat.toml"), "module = \"example.com/fromfile\"\n")?;

    bzlcompat(&fake).arg("gomod").assert().success();

    let go_mod = fs::read_to_string(fake.workspace().join("go.mod"))?;
    assert!(go_mod.starts_with("module example.com/fromfile\n"));
    Ok(())
}

#[test]
fn test_gomod_replaces_existing_file() -> Result<()> {
    let fake = fake_workspace();
    fs::write(fake.workspace().join("go.mod"), "module stale\n")?;

    bzlcompat(&fake).args(["gomod", "-m", "example.com/me"]).assert().success();

    let go_mod = fs::read_to_string(fake.workspace().join("go.mod"))?;
    assert!(go_mod.starts_with("module example.com/me\n"));
    assert!(!fake.workspace().join("go.mod.tmp").exists());
    Ok(())
}
