use predicates::prelude::*;

use crate::common::{bzlcompat, fake_workspace};

#[test]
fn test_info_prints_fields() {
    let fake = fake_workspace();

    bzlcompat(&fake)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version: 6.4.0\n"))
        .stdout(predicate::str::contains(format!(
            "OutputBase: {}\n",
            fake.output_base().display()
        )))
        .stdout(predicate::str::contains(format!("Workspace: {}\n", fake.workspace().display())));

    // info never queries
    assert!(fake.query_args().is_none());
}

#[test]
fn test_quiet_hides_progress_logs() {
    let fake = fake_workspace();

    bzlcompat(&fake)
        .args(["--quiet", "info"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Bazel version").not());
}
