use derive_more::Display;
use pathgrid_config::ConfigError;
use pathgrid_core::{
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
    path::PathParseError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.class {
            ErrorClass::InvalidInput => ErrorKind::InvalidInput,
            ErrorClass::Unsupported => ErrorKind::Unsupported,
            ErrorClass::InvariantViolation | ErrorClass::Internal => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<PathParseError> for Error {
    fn from(err: PathParseError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::Io { .. } => ErrorKind::Unavailable,
            ConfigError::Toml(_) | ConfigError::Invalid(_) => ErrorKind::InvalidInput,
        };

        Self::new(kind, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Input text (path, config) is malformed.
    InvalidInput,

    /// Input is well-formed but asks for something not supported.
    Unsupported,

    /// A file could not be read.
    Unavailable,

    /// The caller cannot remediate this.
    Internal,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Column,
    Config,
    Export,
    Ingest,
    Path,
    Sql,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Column => Self::Column,
            CoreErrorOrigin::Export => Self::Export,
            CoreErrorOrigin::Ingest => Self::Ingest,
            CoreErrorOrigin::Path => Self::Path,
            CoreErrorOrigin::Sql => Self::Sql,
        }
    }
}
