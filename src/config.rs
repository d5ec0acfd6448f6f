//! Adapter settings.
//!
//! Settings live in a small JSON file (`~/.qax-ggoutlier/config.json`) and
//! every field has a default, so the adapter runs with no file present at
//! all. Configuration here is limited to locating the external executable
//! and deciding where detailed spatial outputs land; check parameters
//! themselves always arrive through QAJSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Settings controlling how the adapter drives GGOutlier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Explicit path to the GGOutlier executable. When unset the adapter
    /// falls back to the `GGOUTLIER_EXE` environment variable and then a
    /// `PATH` search.
    pub ggoutlier_path: Option<PathBuf>,

    /// Maximum seconds a single check run may take before it is killed.
    pub check_timeout_secs: u64,

    /// Detailed spatial outputs handling.
    pub spatial_outputs: SpatialOutputs,
}

/// Where GGOutlier's generated files (shapefile, log, report) end up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialOutputs {
    /// Copy GGOutlier's output directory to `export_location` after a run.
    /// When false the outputs are staged in a temp dir and discarded.
    pub export: bool,

    /// Root folder for exported outputs; each check writes to
    /// `<export_location>/<grid stem>/<check name>/`.
    pub export_location: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ggoutlier_path: None,
            check_timeout_secs: default_check_timeout_secs(),
            spatial_outputs: SpatialOutputs::default(),
        }
    }
}

impl Default for SpatialOutputs {
    fn default() -> Self {
        Self {
            export: false,
            export_location: None,
        }
    }
}

impl Settings {
    /// Default settings file location: `~/.qax-ggoutlier/config.json`.
    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".qax-ggoutlier")
            .join("config.json")
    }

    /// Load settings from the default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load settings from a specific file, falling back to defaults when
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Resolved export directory for one check run, or `None` when export
    /// is disabled or unconfigured.
    pub fn export_dir(&self, grid_stem: &str, check_name: &str) -> Option<PathBuf> {
        if !self.spatial_outputs.export {
            return None;
        }
        self.spatial_outputs
            .export_location
            .as_ref()
            .map(|root| root.join(grid_stem).join(check_name))
    }
}

fn default_check_timeout_secs() -> u64 {
    3600
}
