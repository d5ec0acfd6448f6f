//! Check-enumeration command.

use anyhow::Result;

use qax_ggoutlier::config::Settings;
use qax_ggoutlier::plugin::{CheckToolPlugin, GgoutlierPlugin};

/// Print the plugin's check references as pretty JSON, the same metadata
/// the QAX host sees when it enumerates the plugin.
pub(crate) fn cmd_checks() -> Result<()> {
    let plugin = GgoutlierPlugin::new(Settings::default());
    let checks = plugin.checks();
    println!("{}", serde_json::to_string_pretty(&checks)?);
    Ok(())
}
