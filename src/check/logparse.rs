//! Summary extraction from `GGOutlier_log.txt`.
//!
//! GGOutlier writes its run log through Python's root logger, so summary
//! lines look like `INFO:root:Points checked: 28,613,210`. The adapter pulls
//! the three summary statistics out of that log; it is the only place the
//! check outcome comes from.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{GgoutlierQaxError, Result};

/// Statistics reported by a GGOutlier run.
///
/// Fields stay `None` when the corresponding line never appeared in the
/// log, which callers treat as an extraction failure rather than a clean
/// result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSummary {
    /// Total grid points GGOutlier inspected.
    pub points_checked: Option<u64>,

    /// Points flagged as outside the selected standard.
    pub points_outside_spec: Option<u64>,

    /// Percentage of points outside the standard.
    pub percentage_outside_spec: Option<f64>,
}

impl LogSummary {
    /// Whether the run passed: zero points outside specification.
    /// `None` when the outlier count was never reported.
    pub fn passed(&self) -> Option<bool> {
        self.points_outside_spec.map(|n| n == 0)
    }

    /// Whether all three statistics were found.
    pub fn is_complete(&self) -> bool {
        self.points_checked.is_some()
            && self.points_outside_spec.is_some()
            && self.percentage_outside_spec.is_some()
    }
}

/// Parse summary statistics from log text.
pub fn parse_log(content: &str) -> Result<LogSummary> {
    // GGOutlier formats counts with thousands separators
    let points_re = Regex::new(r"Points checked:\s*([\d,]+)").unwrap();
    let outside_re = Regex::new(r"Points outside specification:\s*([\d,]+)").unwrap();
    let percentage_re =
        Regex::new(r"Percentage outside specification:\s*([0-9.,eE+\-]+)").unwrap();

    let mut summary = LogSummary::default();

    for line in content.lines() {
        if let Some(caps) = points_re.captures(line) {
            summary.points_checked = Some(parse_count(&caps[1], line)?);
        } else if let Some(caps) = outside_re.captures(line) {
            summary.points_outside_spec = Some(parse_count(&caps[1], line)?);
        } else if let Some(caps) = percentage_re.captures(line) {
            summary.percentage_outside_spec = Some(parse_percentage(&caps[1], line)?);
        }
    }

    Ok(summary)
}

/// Parse summary statistics from a log file on disk.
pub fn parse_log_file(path: &Path) -> Result<LogSummary> {
    let content = fs::read_to_string(path)?;
    parse_log(&content)
}

fn parse_count(raw: &str, line: &str) -> Result<u64> {
    raw.replace(',', "").parse::<u64>().map_err(|_| {
        GgoutlierQaxError::Check(format!("Error parsing log line: {}", line))
    })
}

fn parse_percentage(raw: &str, line: &str) -> Result<f64> {
    raw.replace(',', "").parse::<f64>().map_err(|_| {
        GgoutlierQaxError::Check(format!("Error parsing log line: {}", line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LOG: &str = "\
INFO:root:GGOutlier Version: 2.01
INFO:root:Processing grid file
INFO:root:Points checked: 28,613,210
INFO:root:Points outside specification: 1,250
INFO:root:Percentage outside specification: 0.0043686
INFO:root:Done
";

    #[test]
    fn test_parse_full_log() {
        let summary = parse_log(SAMPLE_LOG).unwrap();
        assert_eq!(summary.points_checked, Some(28_613_210));
        assert_eq!(summary.points_outside_spec, Some(1_250));
        assert_eq!(summary.percentage_outside_spec, Some(0.004_368_6));
        assert!(summary.is_complete());
        assert_eq!(summary.passed(), Some(false));
    }

    #[test]
    fn test_parse_clean_run_passes() {
        let log = "\
INFO:root:Points checked: 1,000
INFO:root:Points outside specification: 0
INFO:root:Percentage outside specification: 0.0
";
        let summary = parse_log(log).unwrap();
        assert_eq!(summary.passed(), Some(true));
    }

    #[test]
    fn test_parse_counts_without_separators() {
        let log = "INFO:root:Points checked: 512\n";
        let summary = parse_log(log).unwrap();
        assert_eq!(summary.points_checked, Some(512));
    }

    #[test]
    fn test_missing_lines_stay_none() {
        let summary = parse_log("INFO:root:nothing relevant here\n").unwrap();
        assert_eq!(summary, LogSummary::default());
        assert!(!summary.is_complete());
        assert_eq!(summary.passed(), None);
    }

    #[test]
    fn test_scientific_notation_percentage() {
        let log = "INFO:root:Percentage outside specification: 4.3686e-03\n";
        let summary = parse_log(log).unwrap();
        let pct = summary.percentage_outside_spec.unwrap();
        assert!((pct - 0.0043686).abs() < 1e-9);
    }

    #[test]
    fn test_parse_log_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("GGOutlier_log.txt");
        std::fs::write(&path, SAMPLE_LOG).unwrap();

        let summary = parse_log_file(&path).unwrap();
        assert_eq!(summary.points_outside_spec, Some(1_250));
    }

    #[test]
    fn test_parse_log_file_missing_is_an_error() {
        let result = parse_log_file(Path::new("/nope/GGOutlier_log.txt"));
        assert!(result.is_err());
    }
}
