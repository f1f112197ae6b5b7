use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebtopError {
    #[error("Failed to download Contents index for architecture {architecture}: HTTP {status}")]
    Fetch {
        architecture: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to download Release file: HTTP {status}")]
    Release { status: reqwest::StatusCode },

    #[error("Failed to decode Contents index: {0}")]
    Decode(#[source] std::io::Error),

    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("No SHA256 entry for {path} in the Release file")]
    MissingChecksum { path: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DebtopError>;
