//! QAJSON serde types.
//!
//! Field-level `#[serde(default)]` keeps deserialization lenient: QAX
//! writes a richer document than the adapter consumes. Every struct also
//! carries a flattened `extra` map of host-owned fields the adapter does
//! not model, so a document produced by QAX or another plugin survives a
//! round trip through this model untouched apart from the outputs this
//! plugin writes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::Result;

/// Root of a QAJSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QajsonRoot {
    /// Schema version string written by QAX.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qajson_version: Option<String>,

    /// The QA body holding per-data-level check lists.
    pub qa: QajsonQa,

    /// Host-owned fields carried through unmodelled.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl QajsonRoot {
    /// Read and parse a QAJSON document from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let root: QajsonRoot = serde_json::from_str(&content)?;
        Ok(root)
    }

    /// Serialize the document and write it to disk, pretty-printed.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// The `qa` body of a QAJSON document.
///
/// Only `survey_products` is processed by this plugin; the other data
/// levels are carried so documents round-trip intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QajsonQa {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<QajsonDataLevel>,

    #[serde(default)]
    pub survey_products: QajsonDataLevel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_adequacy: Option<QajsonDataLevel>,

    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// A data level: a list of checks to run against one class of input data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QajsonDataLevel {
    #[serde(default)]
    pub checks: Vec<QajsonCheck>,

    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// A single check entry: identity, inputs, and (once run) outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QajsonCheck {
    pub info: QajsonInfo,

    #[serde(default)]
    pub inputs: QajsonInputs,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<QajsonOutputs>,

    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// Check identity as declared by the plugin that owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QajsonInfo {
    /// Stable check identifier; used to match checks to plugins.
    pub id: Uuid,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// QAX-owned members such as `group` ride along here.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// The files and parameters a check runs with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QajsonInputs {
    #[serde(default)]
    pub files: Vec<QajsonFile>,

    #[serde(default)]
    pub params: Vec<QajsonParam>,

    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl QajsonInputs {
    /// Get a parameter value by name. Returns `None` if the parameter
    /// is not present.
    pub fn param_value(&self, name: &str) -> Option<&Value> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}

/// An input file reference with its QAX file-type group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QajsonFile {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// A named check parameter with its value and, optionally, the set of
/// values the QAX UI offers for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QajsonParam {
    pub name: String,

    pub value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,

    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl QajsonParam {
    /// A parameter with no UI option list.
    pub fn new(name: &str, value: Value) -> Self {
        Self {
            name: name.to_string(),
            value,
            options: None,
            extra: Map::new(),
        }
    }

    /// A parameter constrained to a fixed set of values.
    pub fn with_options(name: &str, value: Value, options: Vec<Value>) -> Self {
        Self {
            name: name.to_string(),
            value,
            options: Some(options),
            extra: Map::new(),
        }
    }
}

/// Results written back into a check after it has been run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QajsonOutputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<QajsonExecution>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_state: Option<CheckState>,

    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// Execution record for a single check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QajsonExecution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    pub status: QajsonExecutionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

/// Lifecycle states QAX recognises for a check execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QajsonExecutionStatus {
    Draft,
    Queued,
    Running,
    Aborted,
    Failed,
    Completed,
}

/// Overall outcome of a completed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Pass,
    Fail,
}
