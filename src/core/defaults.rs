//! Fixed identifiers for the target application and device layout.
//!
//! These are deliberately non-configurable: the tool drives exactly one app
//! on one device, and the modloader directory layout is dictated by the
//! modloader itself.

/// Package name of the target application.
pub const APP_PACKAGE: &str = "com.beatgames.beatsaber";

/// Fully qualified activity used by `am start`.
pub const APP_ACTIVITY: &str = "com.beatgames.beatsaber/com.unity3d.player.UnityPlayerActivity";

/// Remote directory for early-loaded module files (`modFiles`).
pub const EARLY_MODS_DIR: &str = "/sdcard/ModData/com.beatgames.beatsaber/Modloader/early_mods/";

/// Remote directory for normally-loaded module files (`lateModFiles`).
pub const MODS_DIR: &str = "/sdcard/ModData/com.beatgames.beatsaber/Modloader/mods/";

/// Manifest file name, resolved against the project root.
pub const MANIFEST_FILE: &str = "mod.json";

/// Logcat tag the mod logs under.
pub const LOG_TAG: &str = "spotify-search";
