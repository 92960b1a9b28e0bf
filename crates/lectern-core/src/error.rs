use thiserror::Error;

#[derive(Debug, Error)]
pub enum LecternError {
    #[error("config error: {0}")]
    Config(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("unexpected status {status} fetching {path}")]
    Status { status: u16, path: String },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
