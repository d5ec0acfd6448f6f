//! Smoke-test command: prove the external GGOutlier install responds.

use std::time::Duration;

use anyhow::{Context, Result};

use qax_ggoutlier::config::Settings;
use qax_ggoutlier::exec::GgoutlierExecutor;

/// Help output should be near-instant; anything longer means a broken
/// install.
const SMOKE_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve the GGOutlier executable and forward a fixed `--help` flag,
/// relaying its output verbatim and exiting with the tool's exit code.
pub(crate) async fn cmd_smoke() -> Result<()> {
    let settings = Settings::load().with_context(|| "Failed to load settings")?;
    let executor = GgoutlierExecutor::resolve(&settings, SMOKE_TIMEOUT)?;

    println!("ggoutlier executable");
    println!("{}", executor.exe().display());

    let output = executor.run(&["--help".to_string()]).await?;
    print!("{}", output.stdout);
    eprint!("{}", output.stderr);

    if !output.success() {
        std::process::exit(output.exit_code.unwrap_or(1));
    }
    Ok(())
}
