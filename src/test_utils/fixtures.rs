//! Test fixtures: canned `bazel info` output and a scripted fake `bazel`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::query::proto::QueryResult;
use prost::Message;

/// Sample `bazel info` outputs
#[derive(Clone, Debug)]
pub struct InfoFixture {
    pub content: String,
}

impl InfoFixture {
    /// Output shaped like a real `bazel info`, with the given paths
    pub fn with_paths(version: &str, output_base: &Path, workspace: &Path) -> Self {
        Self {
            content: format!(
                "bazel-bin: {ws}/bazel-out/k8-fastbuild/bin\n\
                 execution_root: {ob}/execroot/__main__\n\
                 output_base: {ob}\n\
                 output_path: {ob}/execroot/__main__/bazel-out\n\
                 release: release {version}\n\
                 server_pid: 4242\n\
                 workspace: {ws}\n",
                ob = output_base.display(),
                ws = workspace.display(),
            ),
        }
    }

    /// Output from a bazel that reports its release without the `release` word
    pub fn malformed_release() -> Self {
        Self {
            content: "release: 6.4.0\noutput_base: /ob\nworkspace: /ws\n".to_string(),
        }
    }
}

/// A temporary workspace plus a shell script standing in for `bazel`.
///
/// `bazel info` prints an [`InfoFixture`] pointing at the temporary workspace and output
/// base, `bazel query ...` records its arguments and prints the encoded query result.
pub struct FakeBazel {
    dir: TempDir,
}

impl FakeBazel {
    /// Fake bazel answering queries with `result`.
    pub fn new(result: &QueryResult) -> Result<Self> {
        Self::with_query_bytes(&result.encode_to_vec())
    }

    /// Fake bazel answering queries with raw bytes (possibly not valid protobuf).
    pub fn with_query_bytes(query: &[u8]) -> Result<Self> {
        let fake = Self::scaffold()?;
        let info = InfoFixture::with_paths("6.4.0", &fake.output_base(), &fake.workspace());
        fs::write(fake.dir.path().join("info.txt"), info.content)?;
        fs::write(fake.dir.path().join("query.pb"), query)?;
        fake.write_script(0, "")?;
        Ok(fake)
    }

    /// Fake bazel whose every invocation fails with `code` and `stderr`.
    pub fn failing(code: i32, stderr: &str) -> Result<Self> {
        let fake = Self::scaffold()?;
        fake.write_script(code, stderr)?;
        Ok(fake)
    }

    fn scaffold() -> Result<Self> {
        let dir = tempfile::tempdir().context("Failed to create fake bazel directory")?;
        fs::create_dir_all(dir.path().join("workspace"))?;
        fs::create_dir_all(dir.path().join("output_base").join("external"))?;
        Ok(Self {
            dir,
        })
    }

    fn write_script(&self, code: i32, stderr: &str) -> Result<()> {
        let root = self.dir.path().display();
        let script = if code == 0 {
            format!(
                "#!/bin/sh\n\
                 case \"$1\" in\n\
                 \x20 info) cat \"{root}/info.txt\" ;;\n\
                 \x20 query) echo \"$@\" > \"{root}/query_args.txt\"; cat \"{root}/query.pb\" ;;\n\
                 \x20 *) echo \"unknown command: $1\" >&2; exit 2 ;;\n\
                 esac\n"
            )
        } else {
            format!("#!/bin/sh\necho \"{stderr}\" >&2\nexit {code}\n")
        };
        let path = self.bazel_path();
        fs::write(&path, script)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        }
        Ok(())
    }

    /// Path of the fake executable.
    pub fn bazel_path(&self) -> PathBuf {
        self.dir.path().join("bazel")
    }

    pub fn workspace(&self) -> PathBuf {
        self.dir.path().join("workspace")
    }

    pub fn output_base(&self) -> PathBuf {
        self.dir.path().join("output_base")
    }

    /// Arguments of the last `bazel query` invocation, if any.
    pub fn query_args(&self) -> Option<String> {
        fs::read_to_string(self.dir.path().join("query_args.txt"))
            .ok()
            .map(|s| s.trim_end().to_string())
    }
}
