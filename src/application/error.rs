use std::fmt;
use std::io;

#[derive(Debug)]
pub enum AppError {
    /// Reference dataset source absent or unreadable at engine construction.
    MissingReferenceData(String),
    /// A reference record failed validation at load time.
    InvalidRecord(String),
    /// Storage failure from the persistence layer.
    Io(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingReferenceData(path) => {
                write!(f, "food reference data not found: {}", path)
            }
            AppError::InvalidRecord(message) => write!(f, "invalid reference record: {}", message),
            AppError::Io(message) => write!(f, "io error: {}", message),
        }
    }
}

impl std::error::Error for AppError {}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
