use anyhow::Result;
use bzlcompat::test_utils::proto_builders::RuleBuilder;
use predicates::prelude::*;

use crate::common::{bzlcompat, fake_with, fake_workspace};

#[test]
fn test_list_text() {
    let fake = fake_workspace();

    bzlcompat(&fake)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com/forked"))
        .stdout(predicate::str::contains("=> github.com/me/forked"))
        .stdout(predicate::str::contains("google.golang.org/grpc"))
        .stdout(predicate::str::contains("github.com/grpc/grpc-go").not());
}

#[test]
fn test_list_json_is_clean() -> Result<()> {
    let fake = fake_workspace();

    let output = bzlcompat(&fake).args(["list", "--format", "json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let deps = value.as_object().unwrap();
    assert_eq!(deps.len(), 4);
    assert_eq!(deps["com_github_golang_protobuf"]["import_path"], "github.com/golang/protobuf");
    assert_eq!(deps["com_example_forked"]["source_ref"], "v1.2.0");
    assert!(deps["com_github_pkg_errors"].get("remote").is_none());
    Ok(())
}

#[test]
fn test_list_library_strategy() -> Result<()> {
    let fake = fake_with(vec![
        RuleBuilder::labelled("go_library", "@org_golang_x_net//http2:go_default_library")
            .string("importpath", "golang.org/x/net/http2")
            .target(),
        RuleBuilder::labelled("go_library", "//cmd/app:go_default_library")
            .string("importpath", "example.com/me/cmd/app")
            .target(),
    ]);

    let output = bzlcompat(&fake).args(["--strategy", "library", "list", "-f", "json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["org_golang_x_net"]["import_path"], "golang.org/x/net");
    assert_eq!(value.as_object().unwrap().len(), 1);
    assert_eq!(
        fake.query_args().as_deref(),
        Some("query kind('go_library rule', deps(//...)) --output=proto")
    );
    Ok(())
}

#[test]
fn test_list_warns_about_unsupported_rules() {
    let fake = fake_with(vec![
        RuleBuilder::new("http_archive", "io_bazel_rules_go").target(),
    ]);

    bzlcompat(&fake)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("instead got http_archive"))
        .stderr(predicate::str::contains("Found 0 external dependencies"));
}
