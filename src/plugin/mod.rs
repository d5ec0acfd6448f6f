//! QAX plugin surface for GGOutlier
//!
//! This module is the adapter's host-facing side: the static descriptor the
//! QAX host uses to enumerate the plugin's checks, and the entry point that
//! runs those checks over a QAJSON document.
//!
//! # Architecture
//!
//! - **descriptor**: plugin identity, supported file types, check
//!   references, and default input parameters
//! - **runner**: the `CheckToolPlugin` trait and `GgoutlierPlugin`, which
//!   walks the `survey_products` checks and writes results back
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use qax_ggoutlier::config::Settings;
//! use qax_ggoutlier::plugin::{CheckToolPlugin, GgoutlierPlugin};
//! use qax_ggoutlier::qajson::QajsonRoot;
//!
//! # async fn example() -> qax_ggoutlier::Result<()> {
//! let mut qajson = QajsonRoot::from_file(Path::new("survey.qajson.json"))?;
//! let plugin = GgoutlierPlugin::new(Settings::load()?);
//! plugin.run(&mut qajson).await?;
//! qajson.to_file(Path::new("survey.qajson.json"))?;
//! # Ok(())
//! # }
//! ```

mod descriptor;
mod runner;

pub use descriptor::{
    default_input_params, ggoutlier_check_reference, supported_file_types, QaxCheckReference,
    QaxFileType, DATA_LEVEL_SURVEY_PRODUCTS, SURVEY_DTMS_GROUP,
};
pub use runner::{CheckToolPlugin, GgoutlierPlugin, PLUGIN_NAME};
