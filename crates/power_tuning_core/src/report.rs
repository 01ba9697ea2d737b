//! Report rows and CSV export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::contract::{ExecutionStatus, Target};
use crate::error::TuningError;

pub const DEFAULT_REPORT_PATH: &str = "lambda_power_tuner_results.csv";
pub const REPORT_HEADER: [&str; 4] = [
    "LambdaFunctionName",
    "CurrentMemory",
    "PowerTunerVisualizationURL",
    "Status",
];

/// How one target's analysis ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    Succeeded { visualization: String },
    /// Terminal but not `SUCCEEDED`. A normal outcome, not an error.
    EndedWithStatus(ExecutionStatus),
    Errored(String),
}

impl TargetOutcome {
    pub fn visualization(&self) -> String {
        match self {
            Self::Succeeded { visualization } => visualization.clone(),
            Self::EndedWithStatus(status) => format!("Execution ended with status: {status}"),
            Self::Errored(message) => format!("Error: {message}"),
        }
    }

    pub fn status_label(&self) -> String {
        match self {
            Self::Succeeded { .. } => "Success".to_string(),
            Self::EndedWithStatus(status) => format!("Failed: {status}"),
            Self::Errored(message) => format!("Error: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub function_name: String,
    pub current_memory: String,
    pub visualization: String,
    pub status: String,
}

impl ReportRow {
    pub fn from_outcome(target: &Target, outcome: &TargetOutcome) -> Self {
        Self {
            function_name: target.name.clone(),
            current_memory: target.memory_label(),
            visualization: outcome.visualization(),
            status: outcome.status_label(),
        }
    }
}

/// Writes the header and all rows to `path`, replacing any existing file.
pub fn write_report(rows: &[ReportRow], path: impl AsRef<Path>) -> Result<(), TuningError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|error| {
        TuningError::Report(format!("failed to create '{}': {error}", path.display()))
    })?;
    write_report_to(rows, file)
}

pub fn write_report_to(rows: &[ReportRow], writer: impl Write) -> Result<(), TuningError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(REPORT_HEADER).map_err(report_error)?;

    for row in rows {
        wtr.write_record([
            row.function_name.as_str(),
            row.current_memory.as_str(),
            row.visualization.as_str(),
            row.status.as_str(),
        ])
        .map_err(report_error)?;
    }

    wtr.flush()
        .map_err(|error| TuningError::Report(error.to_string()))?;
    Ok(())
}

fn report_error(error: csv::Error) -> TuningError {
    TuningError::Report(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(memory_size: Option<i32>) -> Target {
        Target::new(
            "orders-api",
            "arn:aws:lambda:us-east-1:123456789012:function:orders-api",
            memory_size,
        )
    }

    #[test]
    fn success_row_carries_visualization() {
        let row = ReportRow::from_outcome(
            &target(Some(512)),
            &TargetOutcome::Succeeded {
                visualization: "https://lambda-power-tuning.show/#abc".to_string(),
            },
        );

        assert_eq!(row.function_name, "orders-api");
        assert_eq!(row.current_memory, "512");
        assert_eq!(row.visualization, "https://lambda-power-tuning.show/#abc");
        assert_eq!(row.status, "Success");
    }

    #[test]
    fn non_success_terminal_row_embeds_status() {
        let row = ReportRow::from_outcome(
            &target(Some(1024)),
            &TargetOutcome::EndedWithStatus(ExecutionStatus::Aborted),
        );

        assert_eq!(row.visualization, "Execution ended with status: ABORTED");
        assert_eq!(row.status, "Failed: ABORTED");
    }

    #[test]
    fn error_row_starts_with_error_prefix() {
        let row = ReportRow::from_outcome(
            &target(None),
            &TargetOutcome::Errored("access denied".to_string()),
        );

        assert_eq!(row.current_memory, "Unknown");
        assert_eq!(row.visualization, "Error: access denied");
        assert_eq!(row.status, "Error: access denied");
    }

    #[test]
    fn csv_has_header_and_quotes_embedded_commas() {
        let rows = vec![ReportRow::from_outcome(
            &target(Some(256)),
            &TargetOutcome::Errored("throttled, retry later".to_string()),
        )];

        let mut buffer = Vec::new();
        write_report_to(&rows, &mut buffer).expect("report should write");
        let text = String::from_utf8(buffer).expect("report should be utf-8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "LambdaFunctionName,CurrentMemory,PowerTunerVisualizationURL,Status"
        );
        assert_eq!(
            lines[1],
            "orders-api,256,\"Error: throttled, retry later\",\"Error: throttled, retry later\""
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn writes_report_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.csv");
        let rows = vec![ReportRow::from_outcome(
            &target(Some(128)),
            &TargetOutcome::Succeeded {
                visualization: "http://x".to_string(),
            },
        )];

        write_report(&rows, &path).expect("report should write");

        let mut reader = csv::Reader::from_path(&path).expect("report should open");
        let records: Vec<csv::StringRecord> = reader
            .records()
            .collect::<Result<_, _>>()
            .expect("records should parse");
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "orders-api");
        assert_eq!(&records[0][3], "Success");
    }

    #[test]
    fn missing_directory_is_report_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("report.csv");

        let error = write_report(&[], &path).expect_err("missing directory should fail");
        assert!(matches!(error, TuningError::Report(_)));
    }
}
