//! Operator interrupt handling.
//!
//! The handler is registered once at startup and bounded to: read the
//! running flag, issue at most one device command, terminate. It never
//! chains into other handlers after deciding to exit.

use crate::adb::{AdbBridge, DeviceBridge};
use crate::context::AppState;
use crate::defaults;
use crate::error::{Error, Result};
use crate::pipeline;
use crate::utils::command;

/// Install the Ctrl-C handler for this run.
pub fn install(state: AppState) -> Result<()> {
    ctrlc::set_handler(move || {
        let code = on_interrupt(&state, &AdbBridge);
        std::process::exit(code);
    })
    .map_err(|e| Error::Other(format!("Failed to install interrupt handler: {}", e)))
}

/// Decide and perform the teardown action for one interrupt, returning the
/// process exit status.
///
/// If the target app was launched by this run, stop it rather than leave
/// it orphaned on the device; otherwise just note the cancellation. Either
/// way the run ends with a non-success status.
pub fn on_interrupt(state: &AppState, bridge: &dyn DeviceBridge) -> i32 {
    if state.is_running() {
        log_status!("interrupt", "Stopping {} before exit", defaults::APP_PACKAGE);
        match pipeline::force_stop(bridge) {
            Ok(out) if !out.success => {
                log_status!(
                    "interrupt",
                    "Failed to stop {}: {}",
                    defaults::APP_PACKAGE,
                    command::error_text(&out)
                );
            }
            Err(err) => {
                log_status!("interrupt", "Failed to stop {}: {}", defaults::APP_PACKAGE, err);
            }
            Ok(_) => {}
        }
    } else {
        log_status!("interrupt", "Cancelled by user");
    }
    1
}
