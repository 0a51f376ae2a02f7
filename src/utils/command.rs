//! External process invocation primitives with consistent error handling.
//!
//! Every pipeline stage funnels its tool calls through here: the runner
//! captures (or streams) output and reports the exit status, and callers
//! decide fatality with [`require_success`]. Nothing in this module retries.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Captured result of one external tool invocation. Never mutated after creation.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: i32,
}

/// Run a command and capture its output.
///
/// A nonzero exit is not an error here — the output is returned and the
/// caller decides what counts as fatal. Failing to spawn the process at
/// all is an error.
pub fn run(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<ToolOutput> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let out = cmd
        .output()
        .map_err(|e| Error::Other(format!("Failed to run {}: {}", program, e)))?;

    Ok(ToolOutput {
        stdout: String::from_utf8_lossy(&out.stdout).to_string(),
        stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        success: out.status.success(),
        exit_code: out.status.code().unwrap_or(-1),
    })
}

/// Run a command with stdout/stderr passed through to the terminal.
///
/// Used for long-winded tools (cmake, qpm) whose progress the operator
/// wants live. Captured output is empty; only the exit status is reported.
pub fn run_streamed(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<ToolOutput> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());

    let status = cmd
        .status()
        .map_err(|e| Error::Other(format!("Failed to run {}: {}", program, e)))?;

    Ok(ToolOutput {
        stdout: String::new(),
        stderr: String::new(),
        success: status.success(),
        exit_code: status.code().unwrap_or(-1),
    })
}

/// Run a command with fully inherited stdio and block until it exits.
/// Returns the exit code. Used for the blocking logcat tail.
pub fn run_interactive(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<i32> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::Other(format!("Failed to run {}: {}", program, e)))?;

    Ok(status.code().unwrap_or(-1))
}

/// Extract error text from captured output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &ToolOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        stderr.to_string()
    } else {
        output.stdout.trim().to_string()
    }
}

/// Fail fast on a nonzero exit. The single exit-code check used by every
/// pipeline stage; stages only encode which command to run.
pub fn require_success(context: &str, output: &ToolOutput) -> Result<()> {
    if output.success {
        Ok(())
    } else {
        Err(Error::tool(context, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_captures_stdout() {
        let output = run("echo", &["hello"], None).unwrap();
        assert!(output.success);
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    fn run_fails_with_unknown_program() {
        let result = run("qdev_nonexistent_program_xyz", &[], None);
        assert!(result.is_err());
    }

    #[test]
    fn run_reports_nonzero_exit_without_error() {
        let output = run("sh", &["-c", "exit 3"], None).unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, 3);
    }

    #[test]
    fn error_text_prefers_stderr() {
        let output = run("sh", &["-c", "echo out; echo err >&2; exit 1"], None).unwrap();
        assert_eq!(error_text(&output), "err");
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let output = run("sh", &["-c", "echo out; exit 1"], None).unwrap();
        assert_eq!(error_text(&output), "out");
    }

    #[test]
    fn require_success_passes_on_zero_exit() {
        let output = run("true", &[], None).unwrap();
        assert!(require_success("true", &output).is_ok());
    }

    #[test]
    fn require_success_carries_output_on_failure() {
        let output = run("sh", &["-c", "echo broken >&2; exit 2"], None).unwrap();
        let err = require_success("sh probe", &output).unwrap_err();
        match err {
            Error::Tool {
                context,
                exit_code,
                output,
            } => {
                assert_eq!(context, "sh probe");
                assert_eq!(exit_code, 2);
                assert_eq!(output, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
