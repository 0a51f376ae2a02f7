use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Requested build mode, mapped onto the CMake build-type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Parse a CLI build-type string. Anything other than `debug` or
    /// `release` is a configuration error, raised before any external
    /// process is spawned.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "debug" => Ok(BuildMode::Debug),
            "release" => Ok(BuildMode::Release),
            other => Err(Error::Config(format!(
                "Unknown build type '{}' (expected 'debug' or 'release')",
                other
            ))),
        }
    }

    /// CMake's name for this mode. Release builds keep debug info so
    /// crash addresses stay resolvable.
    pub fn cmake_build_type(&self) -> &'static str {
        match self {
            BuildMode::Debug => "Debug",
            BuildMode::Release => "RelWithDebInfo",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }
}

/// Immutable per-run build configuration. Constructed once from validated
/// CLI input and owned by the pipeline for the duration of the run.
#[derive(Debug, Clone)]
pub struct BuildContext {
    project_root_dir: PathBuf,
    project_output_dir: PathBuf,
    build_mode: BuildMode,
}

impl BuildContext {
    pub fn new(project_root_dir: PathBuf, build_mode: BuildMode) -> Self {
        let project_output_dir = project_root_dir.join("build");
        Self {
            project_root_dir,
            project_output_dir,
            build_mode,
        }
    }

    pub fn project_root_dir(&self) -> &Path {
        &self.project_root_dir
    }

    pub fn project_output_dir(&self) -> &Path {
        &self.project_output_dir
    }

    pub fn build_mode(&self) -> BuildMode {
        self.build_mode
    }
}

/// Run-scoped "target app is running" flag shared between the pipeline and
/// the interrupt handler.
///
/// Single writer (the Launch stage), single reader (the handler). The
/// Release store pairs with the Acquire load so the handler sees the flag
/// before the log-tail stage starts blocking — the window in which
/// cancellation is expected.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    running: Arc<AtomicBool>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the remote app has been started. Called exactly once,
    /// by the Launch stage, after a successful start command.
    pub fn mark_running(&self) {
        self.running.store(true, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_mode_maps_to_cmake_vocabulary() {
        assert_eq!(BuildMode::parse("debug").unwrap().cmake_build_type(), "Debug");
        assert_eq!(
            BuildMode::parse("release").unwrap().cmake_build_type(),
            "RelWithDebInfo"
        );
    }

    #[test]
    fn unknown_build_mode_is_a_config_error() {
        let err = BuildMode::parse("profile").unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn output_dir_is_build_under_root() {
        let ctx = BuildContext::new(PathBuf::from("/work/mod"), BuildMode::Debug);
        assert_eq!(ctx.project_output_dir(), Path::new("/work/mod/build"));
        assert_eq!(ctx.build_mode(), BuildMode::Debug);
    }

    #[test]
    fn app_state_starts_not_running() {
        let state = AppState::new();
        assert!(!state.is_running());
        state.mark_running();
        assert!(state.is_running());
    }

    #[test]
    fn app_state_clones_share_the_flag() {
        let state = AppState::new();
        let handler_view = state.clone();
        state.mark_running();
        assert!(handler_view.is_running());
    }
}
