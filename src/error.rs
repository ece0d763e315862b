use std::path::PathBuf;

/// Errors returned by grid ingestion and the classification pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ShapeError {
    #[error("{0}")]
    Usage(String),
    #[error("file {} can not be opened", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    #[error("no foreground region found in the grid")]
    NoForeground,
    #[error("bounding box {0} exceeds the grid")]
    BoxOutOfRange(String),
    #[error("pipeline step {step} is missing its input: {missing}")]
    MissingStageInput { step: String, missing: &'static str },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to write debug output: {0}")]
    Debug(String),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
