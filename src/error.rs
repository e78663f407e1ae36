use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop an analysis run.
///
/// Missing auxiliary data (no translation or population table, or no entry for
/// a location) is never an error; those paths degrade to fallback values.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{table} table is missing required columns: {}", .missing.join(", "))]
    Schema {
        table: &'static str,
        missing: Vec<String>,
    },

    #[error("could not parse {source_name} ({stage}): {message}")]
    MalformedInput {
        source_name: String,
        stage: String,
        message: String,
    },

    #[error("could not open {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("unsupported file type for {}: expected a .csv, .xlsx or .xls file", .path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AnalysisError {
    pub(crate) fn malformed(
        source_name: &str,
        stage: impl Into<String>,
        err: impl std::fmt::Display,
    ) -> Self {
        AnalysisError::MalformedInput {
            source_name: source_name.to_string(),
            stage: stage.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_missing_column() {
        let err = AnalysisError::Schema {
            table: "complaint",
            missing: vec!["household_id".into(), "atoll".into()],
        };
        assert_eq!(
            err.to_string(),
            "complaint table is missing required columns: household_id, atoll"
        );
    }

    #[test]
    fn malformed_input_names_source_and_stage() {
        let err = AnalysisError::MalformedInput {
            source_name: "complaints.csv".into(),
            stage: "row 4".into(),
            message: "invalid utf-8".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("complaints.csv"));
        assert!(msg.contains("row 4"));
    }
}
