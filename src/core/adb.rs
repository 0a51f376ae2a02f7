//! Device bridge: the adb-backed push/shell collaborator every stage above
//! it depends on. The pipeline only sees the trait, so tests substitute a
//! recording fake.

use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::command::{self, ToolOutput};

pub trait DeviceBridge {
    /// Push a local file into a remote directory.
    fn push(&self, local_path: &Path, remote_dir: &str) -> Result<ToolOutput>;

    /// Run a command on the device via `adb shell`, capturing output.
    fn shell(&self, args: &[&str]) -> Result<ToolOutput>;

    /// Block tailing the app's logcat output, filtered to `tag`, until the
    /// logcat process exits (it dies with the adb connection, so a device
    /// disconnect ends the tail). Returns the process exit code.
    fn tail_logs(&self, package: &str, tag: &str) -> Result<i32>;
}

/// The real bridge, shelling out to the `adb` binary on PATH.
pub struct AdbBridge;

impl DeviceBridge for AdbBridge {
    fn push(&self, local_path: &Path, remote_dir: &str) -> Result<ToolOutput> {
        let local = local_path.to_string_lossy();
        command::run("adb", &["push", &local, remote_dir], None)
    }

    fn shell(&self, args: &[&str]) -> Result<ToolOutput> {
        let mut full = vec!["shell"];
        full.extend_from_slice(args);
        command::run("adb", &full, None)
    }

    fn tail_logs(&self, package: &str, tag: &str) -> Result<i32> {
        // logcat's --pid filter needs a numeric pid; the app was started
        // by the stage before this one, so pidof should resolve.
        let pid_out = self.shell(&["pidof", "-s", package])?;
        command::require_success("pidof", &pid_out)?;
        let pid = pid_out.stdout.trim().to_string();
        if pid.is_empty() {
            return Err(Error::Other(format!("No running process for {}", package)));
        }

        command::run_interactive("adb", &["logcat", "--pid", &pid, "-s", tag], None)
    }
}
