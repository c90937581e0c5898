use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CotejoError {
    #[error("failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("unsupported spreadsheet format: {0}. Supported extensions are .xlsx, .xlsm and .xls.")]
    UnsupportedFormat(String),

    #[error("failed to load match profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid match profile: {0}")]
    ProfileInvalid(String),

    #[error("source '{name}' unavailable: {reason}")]
    SourceUnavailable { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
