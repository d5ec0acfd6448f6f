//! GGOutlier check invocation
//!
//! This module drives one GGOutlier run end to end:
//! - builds the command-line arguments a user would type
//! - runs the external executable against a temporary output directory
//! - collects the generated shapefile and `GGOutlier_log.txt`
//! - extracts summary statistics from the log
//! - optionally exports the whole output directory for QAX's detailed
//!   spatial outputs
//!
//! All bathymetric analysis happens inside GGOutlier itself; nothing here
//! interprets the grid beyond relaying paths and log statistics.

mod logparse;
mod standard;

pub use logparse::{parse_log, parse_log_file, LogSummary};
pub use standard::Standard;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::exec::GgoutlierExecutor;

/// Fixed check identifier registered with QAX.
pub const CHECK_ID: Uuid = Uuid::from_u128(0xec2d2ebc_480e_44d8_a5c5_c9dec4f8428a);

/// Check name shown in the QAX UI and used for export folder names.
pub const CHECK_NAME: &str = "GGOutlier Check";

/// Check version reported to QAX.
pub const CHECK_VERSION: &str = "1";

/// Help anchor for the check's input parameters in the QAX user manual.
pub const PARAMETER_HELP_LINK: &str = "user_manual_qax_ggoutlier.html#input-parameters";

/// Name of the log file GGOutlier writes into its output directory.
const LOG_FILE_NAME: &str = "GGOutlier_log.txt";

/// Resolved inputs for one GGOutlier run.
#[derive(Debug, Clone)]
pub struct GgoutlierCheck {
    /// Depth grid (GeoTIFF) to check.
    pub grid_file: PathBuf,

    /// Survey standard to check against.
    pub standard: Standard,

    /// GGOutlier `-near` neighbourhood distance.
    pub near: u32,

    /// Forward `-verbose` to GGOutlier.
    pub verbose: bool,

    /// Where to copy GGOutlier's output directory after the run.
    /// `None` discards the outputs once the log has been read.
    pub export_dir: Option<PathBuf>,
}

/// What came back from a completed GGOutlier run.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// True iff GGOutlier reported zero points outside specification.
    pub passed: bool,

    /// Statistics extracted from `GGOutlier_log.txt`.
    pub summary: LogSummary,

    /// Notes gathered while collecting outputs (missing files etc.),
    /// surfaced to the QAX user alongside the result.
    pub messages: Vec<String>,

    /// Export directory the outputs were copied to, when enabled.
    pub exported_to: Option<PathBuf>,
}

impl GgoutlierCheck {
    /// Build the argument list passed to the GGOutlier executable,
    /// mirroring what a user would provide on the command line.
    pub fn cli_args(&self, outdir: &Path) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();
        args.push("-i".to_string());
        args.push(self.grid_file.display().to_string());
        args.push("-near".to_string());
        args.push(self.near.to_string());
        args.push("-standard".to_string());
        args.push(self.standard.as_str().to_string());
        if self.verbose {
            args.push("-verbose".to_string());
        }
        args.push("-odir".to_string());
        args.push(outdir.display().to_string());
        args
    }

    /// Run GGOutlier over the grid file and collect its outputs.
    ///
    /// The run is staged in a temporary directory that is deleted when this
    /// function returns; enable `export_dir` to keep the generated files.
    pub async fn run(&self, executor: &GgoutlierExecutor) -> Result<CheckOutcome> {
        info!(grid_file = %self.grid_file.display(), "Grid file");
        info!(standard = %self.standard, near = self.near, verbose = self.verbose, "Check parameters");

        let tmp = tempfile::Builder::new()
            .suffix(".ggoutlier-check")
            .tempdir()?;

        let args = self.cli_args(tmp.path());
        debug!(args = %args.join(" "), "GGOutlier args");

        executor.run_checked(&args).await?;

        let mut messages: Vec<String> = Vec::new();

        // GGOutlier generates one shp file per input grid
        let shapefile = find_shapefile(tmp.path())?;
        match &shapefile {
            Some(path) => debug!(shp = %path.display(), "Found GGOutlier shapefile"),
            None => {
                let msg =
                    "Unable to find GGOutlier generated shp file, results cannot be extracted";
                info!("{}", msg);
                messages.push(msg.to_string());
            }
        }

        let log_path = tmp.path().join(LOG_FILE_NAME);
        let summary = if log_path.exists() {
            parse_log_file(&log_path)?
        } else {
            let msg =
                "Unable to find GGOutlier generated log file, results cannot be extracted";
            info!("{}", msg);
            messages.push(msg.to_string());
            LogSummary::default()
        };

        let exported_to = if let Some(export_dir) = &self.export_dir {
            debug!(
                from = %tmp.path().display(),
                to = %export_dir.display(),
                "Exporting GGOutlier outputs"
            );
            copy_dir_all(tmp.path(), export_dir)?;
            Some(export_dir.clone())
        } else {
            None
        };

        // A single outlier fails the check; a missing count is not a pass.
        let passed = summary.passed().unwrap_or(false);

        Ok(CheckOutcome {
            passed,
            summary,
            messages,
            exported_to,
        })
    }
}

/// Find the first shapefile in a directory.
fn find_shapefile(dir: &Path) -> Result<Option<PathBuf>> {
    let mut shapefiles: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "shp").unwrap_or(false))
        .collect();
    shapefiles.sort();
    Ok(shapefiles.into_iter().next())
}

/// Recursively copy a directory tree, creating the destination as needed.
fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
