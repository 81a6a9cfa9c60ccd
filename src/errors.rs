use thiserror::Error;

/// Errors raised while loading raw data or building the analytical tables.
///
/// Join-time row drops are policy, not failure; they are tallied in
/// `pipeline::DropReport` instead of surfacing here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One or more required CSV files were absent. The pipeline never returns
    /// a partial dataset; callers should prompt for a valid data directory.
    #[error("data unavailable: missing data files: {}", .0.join(", "))]
    MissingDataFiles(Vec<String>),

    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("failed to read {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
