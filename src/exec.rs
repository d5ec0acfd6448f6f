//! GGOutlier executable invocation.
//!
//! Wraps the external `ggoutlier` subprocess with executable resolution and
//! timeout handling. All methods are async via `tokio::process::Command`.
//! Failures are surfaced as-is: the adapter performs no retry or recovery
//! on behalf of the external tool.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::config::Settings;
use crate::error::{GgoutlierQaxError, Result};

/// Environment variable overriding the executable location.
pub const GGOUTLIER_EXE_ENV: &str = "GGOUTLIER_EXE";

/// Name of the external executable searched for on `PATH`.
#[cfg(not(windows))]
const GGOUTLIER_EXE_NAME: &str = "ggoutlier";
#[cfg(windows)]
const GGOUTLIER_EXE_NAME: &str = "ggoutlier.exe";

/// Captured result of one GGOutlier invocation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Process exit code; `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs the GGOutlier executable with a timeout.
#[derive(Debug, Clone)]
pub struct GgoutlierExecutor {
    exe: PathBuf,
    timeout: Duration,
}

impl GgoutlierExecutor {
    /// Create an executor for an already-resolved executable path.
    pub fn new(exe: PathBuf, timeout: Duration) -> Self {
        Self { exe, timeout }
    }

    /// Resolve the executable (see [`resolve_executable`]) and build an
    /// executor with the given timeout.
    pub fn resolve(settings: &Settings, timeout: Duration) -> Result<Self> {
        let exe = resolve_executable(settings)?;
        Ok(Self::new(exe, timeout))
    }

    /// Path of the resolved executable.
    pub fn exe(&self) -> &Path {
        &self.exe
    }

    /// Run GGOutlier with the given arguments, capturing output.
    ///
    /// Returns the captured output regardless of exit status; callers decide
    /// whether a non-zero exit is fatal. Spawn failures and timeouts are
    /// errors.
    pub async fn run(&self, args: &[String]) -> Result<RunOutput> {
        debug!(exe = %self.exe.display(), ?args, "Running GGOutlier");

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.exe).args(args).output(),
        )
        .await
        .map_err(|_| {
            GgoutlierQaxError::ExternalTool(format!(
                "GGOutlier timed out after {}s",
                self.timeout.as_secs()
            ))
        })?
        .map_err(|e| {
            GgoutlierQaxError::ExternalTool(format!(
                "Failed to run {}: {}",
                self.exe.display(),
                e
            ))
        })?;

        Ok(RunOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run GGOutlier and treat a non-zero exit as an error, with stderr in
    /// the message.
    pub async fn run_checked(&self, args: &[String]) -> Result<RunOutput> {
        let output = self.run(args).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(GgoutlierQaxError::ExternalTool(format!(
                "GGOutlier exited with status {:?}: {}",
                output.exit_code,
                output.stderr.trim()
            )))
        }
    }
}

/// Locate the GGOutlier executable.
///
/// Resolution order:
/// 1. `ggoutlier_path` from the settings file
/// 2. the `GGOUTLIER_EXE` environment variable
/// 3. a search of the directories on `PATH`
pub fn resolve_executable(settings: &Settings) -> Result<PathBuf> {
    if let Some(path) = &settings.ggoutlier_path {
        if path.is_file() {
            return Ok(path.clone());
        }
        return Err(GgoutlierQaxError::ExecutableNotFound(format!(
            "configured path does not exist: {}",
            path.display()
        )));
    }

    if let Ok(value) = env::var(GGOUTLIER_EXE_ENV) {
        let path = PathBuf::from(&value);
        if path.is_file() {
            return Ok(path);
        }
        return Err(GgoutlierQaxError::ExecutableNotFound(format!(
            "{} points at a missing file: {}",
            GGOUTLIER_EXE_ENV, value
        )));
    }

    if let Some(paths) = env::var_os("PATH") {
        for dir in env::split_paths(&paths) {
            let candidate = dir.join(GGOUTLIER_EXE_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(GgoutlierQaxError::ExecutableNotFound(format!(
        "'{}' not found on PATH; install GGOutlier or set {}",
        GGOUTLIER_EXE_NAME, GGOUTLIER_EXE_ENV
    )))
}
