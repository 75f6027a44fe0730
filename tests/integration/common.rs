//! Shared helpers for the integration suite

use assert_cmd::Command;
use bzlcompat::query::proto::{QueryResult, Target};
use bzlcompat::test_utils::FakeBazel;
use bzlcompat::test_utils::proto_builders::{RuleBuilder, query_result, source_file_target};

/// A small but representative WORKSPACE: a plain go_repository, a fork with a remote, a
/// git_repository, a non-Go git_repository and a target that is not a rule.
pub fn workspace_result() -> QueryResult {
    query_result(vec![
        RuleBuilder::new("go_repository", "com_github_pkg_errors")
            .string("importpath", "github.com/pkg/errors")
            .string("commit", "645ef00459ed84a119197bfb8d8205042c6df63d")
            .target(),
        RuleBuilder::new("go_repository", "com_example_forked")
            .string("importpath", "example.com/forked")
            .string("remote", "https://github.com/me/forked.git")
            .string("tag", "v1.2.0")
            .target(),
        RuleBuilder::new("git_repository", "com_github_golang_protobuf")
            .string("remote", "https://github.com/golang/protobuf")
            .string("commit", "c823c79ea1570fb5ff454033735a8e68575d1d0f")
            .target(),
        RuleBuilder::new("go_repository", "org_golang_google_grpc")
            .string("importpath", "github.com/grpc/grpc-go")
            .string("tag", "v1.20.0")
            .target(),
        source_file_target(),
    ])
}

/// Fake bazel serving [`workspace_result`].
pub fn fake_workspace() -> FakeBazel {
    FakeBazel::new(&workspace_result()).unwrap()
}

/// Fake bazel serving `targets`.
pub fn fake_with(targets: Vec<Target>) -> FakeBazel {
    FakeBazel::new(&query_result(targets)).unwrap()
}

/// `bzlcompat` running inside the fake workspace with the fake bazel.
pub fn bzlcompat(fake: &FakeBazel) -> Command {
    let mut cmd = Command::cargo_bin("bzlcompat").unwrap();
    cmd.current_dir(fake.workspace())
        .env("BZLCOMPAT_BAZEL", fake.bazel_path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}
