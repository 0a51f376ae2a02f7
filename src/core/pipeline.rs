//! The build → package → deploy → launch → log-tail pipeline.
//!
//! Stages run strictly in order; the first failure aborts everything after
//! it and propagates unchanged to the top-level handler. No stage is
//! re-entered and nothing already completed is rolled back — a failed
//! launch does not undeploy files.

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::adb::DeviceBridge;
use crate::context::{AppState, BuildContext};
use crate::defaults;
use crate::error::Result;
use crate::manifest::{self, ModManifest};
use crate::utils::command::{self, require_success, ToolOutput};

/// Per-run stage toggles from the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub clean: bool,
    pub build_only: bool,
}

/// Seam for invoking build tools so tests can substitute a recording fake.
pub trait ToolRunner {
    /// Invoke a tool and capture its output.
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<ToolOutput>;

    /// Invoke a tool with output streamed to the terminal.
    fn run_streamed(&self, program: &str, args: &[&str], cwd: Option<&Path>)
        -> Result<ToolOutput>;
}

/// The real runner, spawning child processes.
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<ToolOutput> {
        command::run(program, args, cwd)
    }

    fn run_streamed(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> Result<ToolOutput> {
        command::run_streamed(program, args, cwd)
    }
}

/// Execute one full pipeline run.
///
/// Returns `Ok(())` on full success or on build-only completion. Any stage
/// error is terminal; the caller logs it and exits nonzero.
pub fn run(
    context: &BuildContext,
    options: &RunOptions,
    runner: &dyn ToolRunner,
    bridge: &dyn DeviceBridge,
    state: &AppState,
) -> Result<()> {
    if options.clean {
        clean(context)?;
    }

    let started = Instant::now();
    compile(context, runner)?;
    log_status!(
        "build",
        "Build finished in {} seconds",
        started.elapsed().as_secs()
    );

    let manifest = manifest::load(&context.project_root_dir().join(defaults::MANIFEST_FILE))?;
    package(context, &manifest, runner)?;

    if options.build_only {
        log_status!("pipeline", "Build-only run complete");
        return Ok(());
    }

    deploy(context, &manifest, bridge)?;
    launch(bridge, state)?;
    tail_logs(bridge)
}

/// Remove the build output directory. Idempotent: an absent directory is
/// already clean.
pub fn clean(context: &BuildContext) -> Result<()> {
    let output_dir = context.project_output_dir();
    if output_dir.exists() {
        log_status!("clean", "Removing build output at \"{}\"", output_dir.display());
        fs::remove_dir_all(output_dir)?;
    }
    Ok(())
}

/// Two-phase CMake invocation: configure, then build. Each phase is
/// individually fatal.
fn compile(context: &BuildContext, runner: &dyn ToolRunner) -> Result<()> {
    let root = context.project_root_dir();
    let output_dir = context.project_output_dir().to_string_lossy().to_string();
    let build_type_arg = format!(
        "-DCMAKE_BUILD_TYPE={}",
        context.build_mode().cmake_build_type()
    );

    log_status!("build", "Configuring CMake project...");
    let configure = runner.run_streamed(
        "cmake",
        &["-G", "Ninja", &build_type_arg, "-B", &output_dir],
        Some(root),
    )?;
    require_success("cmake configure", &configure)?;

    log_status!("build", "Building CMake project...");
    let build = runner.run_streamed("cmake", &["--build", &output_dir], Some(root))?;
    require_success("cmake build", &build)
}

/// Zip the mod into `{id}-v{version}.qmod` inside the output directory.
fn package(
    context: &BuildContext,
    manifest: &ModManifest,
    runner: &dyn ToolRunner,
) -> Result<()> {
    let artifact = context.project_output_dir().join(manifest.artifact_name());
    let artifact_arg = artifact.to_string_lossy().to_string();

    log_status!("package", "Creating \"{}\"", artifact.display());
    let output = runner.run_streamed(
        "qpm",
        &["qmod", "zip", &artifact_arg],
        Some(context.project_root_dir()),
    )?;
    require_success("qpm qmod zip", &output)
}

/// Push mod files to the modloader directories, early mods first. Pushes
/// happen strictly in list order and the first failure stops everything,
/// including the remainder of the second list.
fn deploy(context: &BuildContext, manifest: &ModManifest, bridge: &dyn DeviceBridge) -> Result<()> {
    push_list(context, bridge, &manifest.mod_files, defaults::EARLY_MODS_DIR)?;
    push_list(context, bridge, &manifest.late_mod_files, defaults::MODS_DIR)
}

fn push_list(
    context: &BuildContext,
    bridge: &dyn DeviceBridge,
    files: &[String],
    remote_dir: &str,
) -> Result<()> {
    for file in files {
        let src = context.project_output_dir().join(file);
        log_status!("deploy", "Deploying \"{}\" -> \"{}\"", src.display(), remote_dir);
        let output = bridge.push(&src, remote_dir)?;
        require_success(&format!("adb push {}", file), &output)?;
    }
    Ok(())
}

/// Stop the target app via the device bridge. Shared with the interrupt
/// handler's teardown path.
pub fn force_stop(bridge: &dyn DeviceBridge) -> Result<ToolOutput> {
    bridge.shell(&["am", "force-stop", defaults::APP_PACKAGE])
}

/// Restart the target app. The stop half is non-critical (the app may not
/// be running); the start half is fatal. On success the running flag is
/// set before the next stage begins — the interrupt handler relies on it.
fn launch(bridge: &dyn DeviceBridge, state: &AppState) -> Result<()> {
    match force_stop(bridge) {
        Ok(out) if !out.success => {
            log_status!(
                "launch",
                "Failed to stop {}: {}",
                defaults::APP_PACKAGE,
                command::error_text(&out)
            );
        }
        Err(err) => {
            log_status!("launch", "Failed to stop {}: {}", defaults::APP_PACKAGE, err);
        }
        Ok(_) => {}
    }

    log_status!("launch", "Starting {}", defaults::APP_PACKAGE);
    let start = bridge.shell(&["am", "start", defaults::APP_ACTIVITY])?;
    require_success("am start", &start)?;

    state.mark_running();
    Ok(())
}

/// Block on the app's logcat output until the capture process exits or the
/// operator interrupts. A nonzero logcat exit (device disconnect) ends the
/// run as natural completion, not failure.
fn tail_logs(bridge: &dyn DeviceBridge) -> Result<()> {
    log_status!(
        "logs",
        "Tailing logcat for tag '{}' (Ctrl-C to stop)",
        defaults::LOG_TAG
    );
    let code = bridge.tail_logs(defaults::APP_PACKAGE, defaults::LOG_TAG)?;
    if code != 0 {
        log_status!("logs", "Log capture exited with code {}", code);
    }
    Ok(())
}
