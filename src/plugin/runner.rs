//! Plugin entry point: running GGOutlier checks over a QAJSON document.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use serde_json::json;
use tracing::{info, warn};

use crate::check::{CheckOutcome, GgoutlierCheck, Standard, CHECK_ID, CHECK_NAME};
use crate::config::Settings;
use crate::error::{GgoutlierQaxError, Result};
use crate::exec::GgoutlierExecutor;
use crate::qajson::{
    CheckState, QajsonCheck, QajsonExecution, QajsonExecutionStatus, QajsonFile, QajsonInputs,
    QajsonOutputs, QajsonRoot,
};

use super::descriptor::{ggoutlier_check_reference, QaxCheckReference, SURVEY_DTMS_GROUP};

/// Plugin name shown by the QAX host.
pub const PLUGIN_NAME: &str = "GGOutlier Checks";

/// The contract a QAX check tool fulfils: enumerate check references and
/// run all matching checks found in a QAJSON document.
#[async_trait]
pub trait CheckToolPlugin {
    /// Name of the check tool.
    fn name(&self) -> &str;

    /// Check references implemented by this plugin.
    fn checks(&self) -> Vec<QaxCheckReference>;

    /// Run every check in `qajson` owned by this plugin, writing results
    /// into each check's `outputs`. Checks owned by other plugins are left
    /// untouched. A failing check is recorded in its execution details and
    /// does not abort the rest of the run.
    async fn run(&self, qajson: &mut QajsonRoot) -> Result<()>;
}

/// The GGOutlier check tool plugin.
pub struct GgoutlierPlugin {
    settings: Settings,
}

impl GgoutlierPlugin {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run one GGOutlier check and write its outputs. Failures end up in
    /// the execution record rather than propagating.
    async fn run_ggoutlier_check(&self, check: &mut QajsonCheck) {
        let mut execution = QajsonExecution {
            start: Some(now_timestamp()),
            end: None,
            status: QajsonExecutionStatus::Running,
            error: None,
            extra: Default::default(),
        };

        // get the input file the check needs to run: the first grid file
        // that looks like a depth layer
        let grid_file = match select_grid_file(&check.inputs) {
            Some(path) => path,
            None => {
                let msg = "Missing input depth data";
                info!("{}", msg);
                execution.status = QajsonExecutionStatus::Aborted;
                execution.error = Some(msg.to_string());
                execution.end = Some(now_timestamp());
                info!("Aborting GGOutlier Check");
                check.outputs = Some(QajsonOutputs {
                    execution: Some(execution),
                    ..Default::default()
                });
                return;
            }
        };

        let outcome = match self.checked_run(&check.inputs, grid_file).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "GGOutlier Check failed");
                execution.status = QajsonExecutionStatus::Failed;
                execution.error = Some(e.to_string());
                execution.end = Some(now_timestamp());
                // no results to populate on failure
                check.outputs = Some(QajsonOutputs {
                    execution: Some(execution),
                    ..Default::default()
                });
                return;
            }
        };

        execution.status = QajsonExecutionStatus::Completed;
        execution.end = Some(now_timestamp());

        let points_total = outcome.summary.points_checked.unwrap_or(0);
        let points_outside_spec = outcome.summary.points_outside_spec.unwrap_or(0);
        let percentage = outcome.summary.percentage_outside_spec.unwrap_or(0.0);

        let state_msg = if outcome.passed {
            format!("No outliers found, {} were checked", points_total)
        } else {
            format!(
                "{} outliers were found in a total of {} points. \
                 This represents a percentage of {:.3}%",
                points_outside_spec, points_total, percentage
            )
        };

        let mut messages = vec![state_msg];
        messages.extend(outcome.messages);
        if let Some(dir) = &outcome.exported_to {
            messages.push(format!(
                "Detailed spatial outputs written to {}",
                dir.display()
            ));
        }

        check.outputs = Some(QajsonOutputs {
            execution: Some(execution),
            messages,
            data: Some(json!({
                "points_total": points_total,
                "points_outside_spec": points_outside_spec,
                "points_outside_spec_percentage": percentage,
            })),
            check_state: Some(if outcome.passed {
                CheckState::Pass
            } else {
                CheckState::Fail
            }),
            ..Default::default()
        });
    }

    /// Resolve parameters and the executable, then run the check.
    async fn checked_run(
        &self,
        inputs: &QajsonInputs,
        grid_file: PathBuf,
    ) -> Result<CheckOutcome> {
        let standard = match inputs.param_value("Standard") {
            Some(value) => value
                .as_str()
                .ok_or_else(|| {
                    GgoutlierQaxError::Qajson("'Standard' parameter is not a string".to_string())
                })?
                .parse::<Standard>()?,
            None => Standard::default(),
        };
        // absent params take the declared defaults; present but malformed
        // ones are reported rather than silently defaulted
        let near = match inputs.param_value("Near") {
            Some(value) => u32::try_from(value.as_u64().ok_or_else(|| {
                GgoutlierQaxError::Qajson(format!(
                    "'Near' parameter is not a non-negative integer: {}",
                    value
                ))
            })?)
            .map_err(|_| {
                GgoutlierQaxError::Qajson(format!("'Near' parameter is out of range: {}", value))
            })?,
            None => 5,
        };
        let verbose = match inputs.param_value("Verbose") {
            Some(value) => value.as_bool().ok_or_else(|| {
                GgoutlierQaxError::Qajson(format!(
                    "'Verbose' parameter is not a boolean: {}",
                    value
                ))
            })?,
            None => false,
        };

        let grid_stem = grid_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let export_dir = self.settings.export_dir(&grid_stem, CHECK_NAME);

        let timeout = Duration::from_secs(self.settings.check_timeout_secs);
        let executor = GgoutlierExecutor::resolve(&self.settings, timeout)?;

        let check = GgoutlierCheck {
            grid_file,
            standard,
            near,
            verbose,
            export_dir,
        };
        check.run(&executor).await
    }
}

#[async_trait]
impl CheckToolPlugin for GgoutlierPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn checks(&self) -> Vec<QaxCheckReference> {
        vec![ggoutlier_check_reference()]
    }

    async fn run(&self, qajson: &mut QajsonRoot) -> Result<()> {
        // all of this plugin's check references declare the survey_products
        // data level, so only that level is walked here
        for check in qajson.qa.survey_products.checks.iter_mut() {
            // the document also lists checks implemented by other plugins
            if check.info.id != CHECK_ID {
                continue;
            }
            self.run_ggoutlier_check(check).await;
        }
        Ok(())
    }
}

/// Select the depth grid from a check's input files: the first
/// `Survey DTMs` file whose stem mentions "depth", falling back to the
/// first `Survey DTMs` file.
fn select_grid_file(inputs: &QajsonInputs) -> Option<PathBuf> {
    let dtm_files: Vec<&QajsonFile> = inputs
        .files
        .iter()
        .filter(|f| f.file_type.as_deref() == Some(SURVEY_DTMS_GROUP))
        .collect();

    dtm_files
        .iter()
        .find(|f| {
            Path::new(&f.path)
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_lowercase().contains("depth"))
                .unwrap_or(false)
        })
        .or_else(|| dtm_files.first())
        .map(|f| PathBuf::from(&f.path))
}

/// Timestamp format QAX expects in execution records.
fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    fn dtm_file(path: &str) -> QajsonFile {
        QajsonFile {
            path: path.to_string(),
            file_type: Some(SURVEY_DTMS_GROUP.to_string()),
            description: None,
            extra: Default::default(),
        }
    }

    fn write_stub(dir: &Path, outside_spec: &str) -> PathBuf {
        let script = format!(
            r#"#!/bin/sh
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-odir" ]; then out="$a"; fi
  prev="$a"
done
cat > "$out/GGOutlier_log.txt" <<EOF
INFO:root:Points checked: 2,000
INFO:root:Points outside specification: {outside_spec}
INFO:root:Percentage outside specification: 0.05
EOF
touch "$out/outliers.shp"
"#
        );
        let path = dir.join("ggoutlier");
        fs::write(&path, script).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn plugin_with_stub(stub: PathBuf) -> GgoutlierPlugin {
        GgoutlierPlugin::new(Settings {
            ggoutlier_path: Some(stub),
            ..Default::default()
        })
    }

    fn qajson_with_check(grid_path: &str) -> QajsonRoot {
        serde_json::from_str(&format!(
            r#"{{
                "qa": {{
                    "survey_products": {{
                        "checks": [
                            {{
                                "info": {{
                                    "id": "ec2d2ebc-480e-44d8-a5c5-c9dec4f8428a",
                                    "name": "GGOutlier Check"
                                }},
                                "inputs": {{
                                    "files": [
                                        {{ "path": "{grid_path}", "file_type": "Survey DTMs" }}
                                    ],
                                    "params": [
                                        {{ "name": "Standard", "value": "order1a" }},
                                        {{ "name": "Near", "value": 5 }},
                                        {{ "name": "Verbose", "value": false }}
                                    ]
                                }}
                            }}
                        ]
                    }}
                }}
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_plugin_name_and_checks() {
        let plugin = GgoutlierPlugin::new(Settings::default());
        assert_eq!(plugin.name(), "GGOutlier Checks");
        let checks = plugin.checks();
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].id, CHECK_ID);
    }

    #[test]
    fn test_select_grid_file_prefers_depth_stem() {
        let inputs = QajsonInputs {
            files: vec![
                dtm_file("/data/area51_density.tif"),
                dtm_file("/data/area51_Depth.tif"),
            ],
            ..Default::default()
        };
        assert_eq!(
            select_grid_file(&inputs),
            Some(PathBuf::from("/data/area51_Depth.tif"))
        );
    }

    #[test]
    fn test_select_grid_file_falls_back_to_first_dtm() {
        let inputs = QajsonInputs {
            files: vec![
                QajsonFile {
                    path: "/data/notes.txt".to_string(),
                    file_type: Some("Ancillary".to_string()),
                    description: None,
                    extra: Default::default(),
                },
                dtm_file("/data/surface.tif"),
            ],
            ..Default::default()
        };
        assert_eq!(
            select_grid_file(&inputs),
            Some(PathBuf::from("/data/surface.tif"))
        );
    }

    #[test]
    fn test_select_grid_file_no_dtm_files() {
        let inputs = QajsonInputs::default();
        assert_eq!(select_grid_file(&inputs), None);
    }

    #[tokio::test]
    async fn test_run_writes_pass_outputs() {
        let tmp = TempDir::new().unwrap();
        let stub = write_stub(tmp.path(), "0");
        let plugin = plugin_with_stub(stub);

        let mut qajson = qajson_with_check("/data/area_depth.tif");
        plugin.run(&mut qajson).await.unwrap();

        let outputs = qajson.qa.survey_products.checks[0]
            .outputs
            .as_ref()
            .unwrap();
        assert_eq!(outputs.check_state, Some(CheckState::Pass));

        let execution = outputs.execution.as_ref().unwrap();
        assert_eq!(execution.status, QajsonExecutionStatus::Completed);
        assert!(execution.start.is_some());
        assert!(execution.end.is_some());

        assert!(outputs.messages[0].contains("No outliers found"));
        let data = outputs.data.as_ref().unwrap();
        assert_eq!(data["points_total"], 2_000);
        assert_eq!(data["points_outside_spec"], 0);
    }

    #[tokio::test]
    async fn test_run_writes_fail_outputs() {
        let tmp = TempDir::new().unwrap();
        let stub = write_stub(tmp.path(), "17");
        let plugin = plugin_with_stub(stub);

        let mut qajson = qajson_with_check("/data/area_depth.tif");
        plugin.run(&mut qajson).await.unwrap();

        let outputs = qajson.qa.survey_products.checks[0]
            .outputs
            .as_ref()
            .unwrap();
        assert_eq!(outputs.check_state, Some(CheckState::Fail));
        assert!(outputs.messages[0].contains("17 outliers were found"));
        assert_eq!(outputs.data.as_ref().unwrap()["points_outside_spec"], 17);
    }

    #[tokio::test]
    async fn test_run_missing_depth_input_aborts() {
        let tmp = TempDir::new().unwrap();
        let stub = write_stub(tmp.path(), "0");
        let plugin = plugin_with_stub(stub);

        let mut qajson: QajsonRoot = serde_json::from_str(
            r#"{
                "qa": {
                    "survey_products": {
                        "checks": [
                            {
                                "info": {
                                    "id": "ec2d2ebc-480e-44d8-a5c5-c9dec4f8428a",
                                    "name": "GGOutlier Check"
                                },
                                "inputs": { "files": [], "params": [] }
                            }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        plugin.run(&mut qajson).await.unwrap();

        let outputs = qajson.qa.survey_products.checks[0]
            .outputs
            .as_ref()
            .unwrap();
        let execution = outputs.execution.as_ref().unwrap();
        assert_eq!(execution.status, QajsonExecutionStatus::Aborted);
        assert_eq!(execution.error.as_deref(), Some("Missing input depth data"));
        assert!(outputs.check_state.is_none());
    }

    #[tokio::test]
    async fn test_run_missing_executable_marks_failed() {
        let plugin = GgoutlierPlugin::new(Settings {
            ggoutlier_path: Some(PathBuf::from("/definitely/not/here/ggoutlier")),
            ..Default::default()
        });

        let mut qajson = qajson_with_check("/data/area_depth.tif");
        plugin.run(&mut qajson).await.unwrap();

        let outputs = qajson.qa.survey_products.checks[0]
            .outputs
            .as_ref()
            .unwrap();
        let execution = outputs.execution.as_ref().unwrap();
        assert_eq!(execution.status, QajsonExecutionStatus::Failed);
        assert!(execution.error.as_ref().unwrap().contains("not"));
    }

    #[tokio::test]
    async fn test_run_skips_foreign_checks() {
        let tmp = TempDir::new().unwrap();
        let stub = write_stub(tmp.path(), "0");
        let plugin = plugin_with_stub(stub);

        let mut qajson: QajsonRoot = serde_json::from_str(
            r#"{
                "qa": {
                    "survey_products": {
                        "checks": [
                            {
                                "info": {
                                    "id": "00000000-0000-0000-0000-000000000001",
                                    "name": "Some Other Check"
                                },
                                "inputs": { "files": [], "params": [] }
                            }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        plugin.run(&mut qajson).await.unwrap();
        assert!(qajson.qa.survey_products.checks[0].outputs.is_none());
    }

    #[tokio::test]
    async fn test_run_preserves_foreign_check_fields() {
        let tmp = TempDir::new().unwrap();
        let stub = write_stub(tmp.path(), "0");
        let plugin = plugin_with_stub(stub);

        let original = serde_json::json!({
            "qa": {
                "survey_products": {
                    "checks": [
                        {
                            "info": {
                                "id": "00000000-0000-0000-0000-000000000001",
                                "name": "Some Other Check",
                                "group": "Mate"
                            },
                            "inputs": { "files": [], "params": [] },
                            "namespace": "hyo2.mate"
                        }
                    ]
                }
            }
        });
        let mut qajson: QajsonRoot = serde_json::from_value(original.clone()).unwrap();

        plugin.run(&mut qajson).await.unwrap();

        let rewritten = serde_json::to_value(&qajson).unwrap();
        assert_eq!(rewritten, original);
    }

    #[tokio::test]
    async fn test_run_invalid_standard_marks_failed() {
        let tmp = TempDir::new().unwrap();
        let stub = write_stub(tmp.path(), "0");
        let plugin = plugin_with_stub(stub);

        let mut qajson = qajson_with_check("/data/area_depth.tif");
        qajson.qa.survey_products.checks[0].inputs.params[0].value =
            serde_json::json!("order99");

        plugin.run(&mut qajson).await.unwrap();

        let outputs = qajson.qa.survey_products.checks[0]
            .outputs
            .as_ref()
            .unwrap();
        let execution = outputs.execution.as_ref().unwrap();
        assert_eq!(execution.status, QajsonExecutionStatus::Failed);
        assert!(execution.error.as_ref().unwrap().contains("order99"));
    }

    #[tokio::test]
    async fn test_run_non_integer_near_marks_failed() {
        let tmp = TempDir::new().unwrap();
        let stub = write_stub(tmp.path(), "0");
        let plugin = plugin_with_stub(stub);

        let mut qajson = qajson_with_check("/data/area_depth.tif");
        qajson.qa.survey_products.checks[0].inputs.params[1].value =
            serde_json::json!("five");

        plugin.run(&mut qajson).await.unwrap();

        let outputs = qajson.qa.survey_products.checks[0]
            .outputs
            .as_ref()
            .unwrap();
        let execution = outputs.execution.as_ref().unwrap();
        assert_eq!(execution.status, QajsonExecutionStatus::Failed);
        assert!(execution.error.as_ref().unwrap().contains("Near"));
    }

    #[tokio::test]
    async fn test_run_non_boolean_verbose_marks_failed() {
        let tmp = TempDir::new().unwrap();
        let stub = write_stub(tmp.path(), "0");
        let plugin = plugin_with_stub(stub);

        let mut qajson = qajson_with_check("/data/area_depth.tif");
        qajson.qa.survey_products.checks[0].inputs.params[2].value =
            serde_json::json!("yes");

        plugin.run(&mut qajson).await.unwrap();

        let outputs = qajson.qa.survey_products.checks[0]
            .outputs
            .as_ref()
            .unwrap();
        let execution = outputs.execution.as_ref().unwrap();
        assert_eq!(execution.status, QajsonExecutionStatus::Failed);
        assert!(execution.error.as_ref().unwrap().contains("Verbose"));
    }
}
