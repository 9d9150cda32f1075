use actix_web::http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while serving a single request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KvError {
    #[error("{0}")]
    MalformedRequest(String),

    #[error("this value doesn't exist")]
    KeyNotFound,

    #[error("Unrecognised Op: {0}")]
    UnrecognizedOperation(String),

    #[error("store failure: {0}")]
    Store(String),
}

impl KvError {
    /// Status reported both on the HTTP status line and in the payload.
    /// A missing key is still reported as a server fault.
    pub fn status(&self) -> StatusCode {
        match self {
            KvError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            KvError::KeyNotFound
            | KvError::UnrecognizedOperation(_)
            | KvError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid WORKERS {0:?}: expected a positive integer")]
    InvalidWorkers(String),

    #[error("invalid MAX_BODY_BYTES {0:?}: expected a positive integer")]
    InvalidBodyLimit(String),
}

pub type Result<T> = std::result::Result<T, KvError>;
