//! Static plugin descriptor.
//!
//! The shapes here mirror what the QAX host expects when it enumerates a
//! check tool: which file types the plugin consumes, which checks it
//! implements, and the default parameters the UI should offer.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::check::{Standard, CHECK_ID, CHECK_NAME, CHECK_VERSION, PARAMETER_HELP_LINK};
use crate::qajson::QajsonParam;

/// QAX file-type group for survey digital terrain models.
pub const SURVEY_DTMS_GROUP: &str = "Survey DTMs";

/// The data level this plugin's checks run at.
pub const DATA_LEVEL_SURVEY_PRODUCTS: &str = "survey_products";

/// A file type a check accepts, as presented in the QAX file picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaxFileType {
    pub name: String,
    pub extension: String,
    pub group: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One check the plugin implements, as advertised to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaxCheckReference {
    pub id: Uuid,
    pub name: String,
    pub version: String,
    pub data_level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub supported_file_types: Vec<QaxFileType>,
    pub default_input_params: Vec<QajsonParam>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_help_link: Option<String>,
}

/// File types the GGOutlier check accepts.
pub fn supported_file_types() -> Vec<QaxFileType> {
    vec![QaxFileType {
        name: "GeoTIFF".to_string(),
        extension: "tif".to_string(),
        group: SURVEY_DTMS_GROUP.to_string(),
        icon: Some("tif.png".to_string()),
    }]
}

/// Default input parameters offered by the QAX UI.
pub fn default_input_params() -> Vec<QajsonParam> {
    let standard_options: Vec<Value> = Standard::all()
        .into_iter()
        .map(|s| json!(s.as_str()))
        .collect();

    vec![
        QajsonParam::with_options(
            "Standard",
            json!(Standard::default().as_str()),
            standard_options,
        ),
        QajsonParam::new("Near", json!(5)),
        QajsonParam::new("Verbose", json!(false)),
    ]
}

/// The single check reference this plugin registers with QAX.
pub fn ggoutlier_check_reference() -> QaxCheckReference {
    QaxCheckReference {
        id: CHECK_ID,
        name: CHECK_NAME.to_string(),
        version: CHECK_VERSION.to_string(),
        data_level: DATA_LEVEL_SURVEY_PRODUCTS.to_string(),
        description: None,
        supported_file_types: supported_file_types(),
        default_input_params: default_input_params(),
        parameter_help_link: Some(PARAMETER_HELP_LINK.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reference_identity() {
        let reference = ggoutlier_check_reference();
        assert_eq!(
            reference.id,
            Uuid::parse_str("ec2d2ebc-480e-44d8-a5c5-c9dec4f8428a").unwrap()
        );
        assert_eq!(reference.name, "GGOutlier Check");
        assert_eq!(reference.version, "1");
        assert_eq!(reference.data_level, "survey_products");
        assert_eq!(
            reference.parameter_help_link.as_deref(),
            Some("user_manual_qax_ggoutlier.html#input-parameters")
        );
    }

    #[test]
    fn test_supported_file_types() {
        let types = supported_file_types();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "GeoTIFF");
        assert_eq!(types[0].extension, "tif");
        assert_eq!(types[0].group, SURVEY_DTMS_GROUP);
    }

    #[test]
    fn test_default_params() {
        let params = default_input_params();
        assert_eq!(params.len(), 3);

        let standard = &params[0];
        assert_eq!(standard.name, "Standard");
        assert_eq!(standard.value, json!("order1a"));
        let options = standard.options.as_ref().unwrap();
        assert_eq!(options.len(), 8);
        assert!(options.contains(&json!("hippassage")));

        assert_eq!(params[1].name, "Near");
        assert_eq!(params[1].value, json!(5));
        assert_eq!(params[2].name, "Verbose");
        assert_eq!(params[2].value, json!(false));
    }

    #[test]
    fn test_check_reference_serializes_to_json() {
        let reference = ggoutlier_check_reference();
        let value = serde_json::to_value(&reference).unwrap();
        assert_eq!(value["id"], "ec2d2ebc-480e-44d8-a5c5-c9dec4f8428a");
        assert_eq!(value["supported_file_types"][0]["group"], "Survey DTMs");
        // no description set, so the field is omitted entirely
        assert!(value.get("description").is_none());
    }
}
