use lectern_core::LecternError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Lectern(#[from] LecternError),

    #[error("no lecture key can be derived from {0:?}")]
    NoLectureKey(String),
}
