//! QAX plugin adapter for the GGOutlier bathymetry QC tool.
//!
//! The adapter contains no surface-analysis logic of its own: it declares
//! the plugin metadata QAX needs to enumerate the GGOutlier check, forwards
//! check parameters to the external `ggoutlier` executable, and writes the
//! tool's reported results back into the QAJSON document.

pub mod check;
pub mod config;
pub mod error;
pub mod exec;
pub mod plugin;
pub mod qajson;

pub use config::Settings;
pub use error::{GgoutlierQaxError, Result};
