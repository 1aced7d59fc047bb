use std::fmt;

#[derive(Debug)]
pub enum BreedGuruError {
    ConfigError(String),
    ValidationError(String),
    RequestError(String),
    ResponseError(String),
    SerializationError(String),
    OverloadedError(String),
    IoError(String),
}

impl BreedGuruError {
    /// True for the transient "service overloaded" condition that warrants
    /// a bounded retry. Every other variant is fatal to the call.
    pub fn is_overloaded(&self) -> bool {
        matches!(self, BreedGuruError::OverloadedError(_))
    }
}

impl fmt::Display for BreedGuruError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreedGuruError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BreedGuruError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            BreedGuruError::RequestError(msg) => write!(f, "Request error: {}", msg),
            BreedGuruError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            BreedGuruError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            BreedGuruError::OverloadedError(msg) => write!(f, "Service overloaded: {}", msg),
            BreedGuruError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for BreedGuruError {}

impl From<std::io::Error> for BreedGuruError {
    fn from(e: std::io::Error) -> Self {
        BreedGuruError::IoError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BreedGuruError>;
