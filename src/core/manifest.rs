//! Mod manifest loading.
//!
//! The manifest describes the mod's identity and which built files go to
//! which modloader directory. It is read once per run and only the Package
//! and Deploy stages look at it.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct ModInfo {
    pub id: String,
    pub version: String,
}

/// Parsed `mod.json`. Both file lists may be empty but must be present;
/// a manifest without them is malformed rather than "deploy nothing".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModManifest {
    pub info: ModInfo,
    pub mod_files: Vec<String>,
    pub late_mod_files: Vec<String>,
}

impl ModManifest {
    /// Archive file name for this mod: `{id}-v{version}.qmod`.
    pub fn artifact_name(&self) -> String {
        format!("{}-v{}.qmod", self.info.id, self.info.version)
    }
}

/// Load and validate the manifest at `path`.
pub fn load(path: &Path) -> Result<ModManifest> {
    let raw = fs::read_to_string(path).map_err(|e| {
        Error::Manifest(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let manifest: ModManifest = serde_json::from_str(&raw).map_err(|e| {
        Error::Manifest(format!("Invalid manifest {}: {}", path.display(), e))
    })?;

    if manifest.info.id.trim().is_empty() {
        return Err(Error::Manifest(format!(
            "Manifest {} has an empty info.id",
            path.display()
        )));
    }
    if manifest.info.version.trim().is_empty() {
        return Err(Error::Manifest(format!(
            "Manifest {} has an empty info.version",
            path.display()
        )));
    }

    Ok(manifest)
}
