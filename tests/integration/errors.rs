use anyhow::Result;
use bzlcompat::test_utils::FakeBazel;
use bzlcompat::test_utils::proto_builders::RuleBuilder;
use predicates::prelude::*;
use std::fs;

use crate::common::{bzlcompat, fake_with};

#[test]
fn test_missing_bazel_binary() -> Result<()> {
    let fake = fake_with(vec![]);

    bzlcompat(&fake)
        .env("BZLCOMPAT_BAZEL", "bzlcompat-no-such-bazel")
        .arg("info")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("'bzlcompat-no-such-bazel' was not found"))
        .stderr(predicate::str::contains("suggestion"));
    Ok(())
}

#[test]
fn test_bazel_failure_reports_stderr() -> Result<()> {
    let fake = FakeBazel::failing(2, "ERROR: not in a workspace")?;

    bzlcompat(&fake)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with 2"))
        .stderr(predicate::str::contains("ERROR: not in a workspace"));
    Ok(())
}

#[test]
fn test_corrupt_query_output() -> Result<()> {
    let fake = FakeBazel::with_query_bytes(b"\xff\xff\xff")?;

    bzlcompat(&fake)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to decode 'bazel query' output"));
    Ok(())
}

#[test]
fn test_missing_import_path_aborts_everything() -> Result<()> {
    let fake = fake_with(vec![
        RuleBuilder::new("go_repository", "com_github_pkg_errors")
            .string("importpath", "github.com/pkg/errors")
            .target(),
        RuleBuilder::new("go_repository", "com_example_broken").target(),
    ]);

    bzlcompat(&fake)
        .args(["gomod", "--module", "example.com/me"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to find importpath for //external:com_example_broken"));

    assert!(!fake.workspace().join("go.mod").exists());
    Ok(())
}

#[test]
fn test_malformed_info_output() -> Result<()> {
    let fake = fake_with(vec![]);
    // Swap in an info line without the 'release' word
    let info_path = fake.bazel_path().with_file_name("info.txt");
    fs::write(&info_path, bzlcompat::test_utils::InfoFixture::malformed_release().content)?;

    bzlcompat(&fake)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to parse version from 'bazel info' output"))
        .stderr(predicate::str::contains("release: 6.4.0"));
    Ok(())
}
