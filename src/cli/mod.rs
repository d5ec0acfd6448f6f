//! Command handlers for the `run_ggoutlier` binary.

mod checks;
mod run;
mod smoke;

pub(crate) use checks::cmd_checks;
pub(crate) use run::cmd_run;
pub(crate) use smoke::cmd_smoke;
