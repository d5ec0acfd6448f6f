//! QAJSON run command: drive the plugin without the QAX GUI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use qax_ggoutlier::config::Settings;
use qax_ggoutlier::plugin::{CheckToolPlugin, GgoutlierPlugin};
use qax_ggoutlier::qajson::QajsonRoot;

/// Load a QAJSON document, run the GGOutlier checks it contains, and write
/// the updated document back out (in place unless `--output` is given).
pub(crate) async fn cmd_run(qajson_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load().with_context(|| "Failed to load settings")?;

    let mut qajson = QajsonRoot::from_file(&qajson_path)
        .with_context(|| format!("Failed to read QAJSON from {}", qajson_path.display()))?;

    let plugin = GgoutlierPlugin::new(settings);
    plugin.run(&mut qajson).await?;

    for check in &qajson.qa.survey_products.checks {
        if let Some(outputs) = &check.outputs {
            let status = outputs
                .execution
                .as_ref()
                .map(|e| format!("{:?}", e.status).to_lowercase())
                .unwrap_or_else(|| "unknown".to_string());
            let state = outputs
                .check_state
                .map(|s| format!("{:?}", s).to_lowercase())
                .unwrap_or_else(|| "-".to_string());
            println!("{}: {} ({})", check.info.name, status, state);
        }
    }

    let out_path = output.unwrap_or(qajson_path);
    qajson
        .to_file(&out_path)
        .with_context(|| format!("Failed to write QAJSON to {}", out_path.display()))?;
    info!(path = %out_path.display(), "Wrote updated QAJSON");

    Ok(())
}
