use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid angle format: {0}")]
    InvalidAngle(String),

    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Source '{source_name}' is missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },

    #[error("Failed to build '{source_name}' from {path} during {step}: {source}")]
    SourceLoad {
        source_name: String,
        path: String,
        step: PipelineStep,
        #[source]
        source: Box<ProcessingError>,
    },

    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

impl From<config::ConfigError> for ProcessingError {
    fn from(err: config::ConfigError) -> Self {
        ProcessingError::Config(err.to_string())
    }
}

/// Stage of the normalization pipeline a source failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Load,
    Rename,
    AngleConversion,
    Projection,
    ColumnSelection,
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStep::Load => "load",
            PipelineStep::Rename => "column rename",
            PipelineStep::AngleConversion => "angle conversion",
            PipelineStep::Projection => "cartesian projection",
            PipelineStep::ColumnSelection => "column selection",
        };
        f.write_str(name)
    }
}

impl ProcessingError {
    /// Wrap an error with the source and step it was raised in
    pub fn at_source(self, source_name: &str, path: &str, step: PipelineStep) -> Self {
        ProcessingError::SourceLoad {
            source_name: source_name.to_string(),
            path: path.to_string(),
            step,
            source: Box::new(self),
        }
    }

    /// Row-level defects are absorbed by the normalizer instead of aborting a source
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            ProcessingError::InvalidAngle(_) | ProcessingError::MissingValue { .. }
        )
    }
}
