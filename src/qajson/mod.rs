//! QAJSON document model
//!
//! QAX exchanges check definitions and results through a QAJSON document.
//! This module provides serde types for the subset of that schema the
//! adapter reads and writes. The host owns the full schema; fields this
//! module does not model are carried through unmodified, and the adapter
//! only rewrites the `outputs` of checks it ran.
//!
//! # Document shape
//!
//! ```text
//! {
//!   "qa": {
//!     "survey_products": {
//!       "checks": [
//!         {
//!           "info": { "id": "...", "name": "...", "version": "..." },
//!           "inputs": { "files": [...], "params": [...] },
//!           "outputs": { "execution": {...}, "messages": [...], ... }
//!         }
//!       ]
//!     }
//!   }
//! }
//! ```

mod model;

pub use model::{
    CheckState, QajsonCheck, QajsonDataLevel, QajsonExecution, QajsonExecutionStatus, QajsonFile,
    QajsonInfo, QajsonInputs, QajsonOutputs, QajsonParam, QajsonQa, QajsonRoot,
};
