// errors.rs
use std::path::PathBuf;

/// Errors raised while serving the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error")]
    InternalError,
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
}

/// Fatal errors of a fetch run. Anything in here aborts the process;
/// per-request failures never end up here (see `FetchError`).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{} not found", .0.display())]
    MissingInput(PathBuf),

    #[error("column '{column}' missing from {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
