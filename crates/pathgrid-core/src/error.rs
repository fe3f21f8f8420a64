use crate::{ingest::IngestError, path::PathParseError, sql::SqlError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured error with a stable internal classification.
/// Not a stable API; the public facade maps it onto its own error type.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a column-origin invariant violation.
    pub(crate) fn column_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Column,
            message.into(),
        )
    }

    /// Construct an export-origin internal error.
    pub(crate) fn export_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Export, message.into())
    }

    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidInput)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Path(PathParseError),
    #[error("{0}")]
    Ingest(IngestError),
    #[error("{0}")]
    Sql(SqlError),
}

impl From<PathParseError> for InternalError {
    fn from(err: PathParseError) -> Self {
        Self {
            class: ErrorClass::InvalidInput,
            origin: ErrorOrigin::Path,
            message: err.to_string(),
            detail: Some(ErrorDetail::Path(err)),
        }
    }
}

impl From<IngestError> for InternalError {
    fn from(err: IngestError) -> Self {
        Self {
            class: ErrorClass::InvalidInput,
            origin: ErrorOrigin::Ingest,
            message: err.to_string(),
            detail: Some(ErrorDetail::Ingest(err)),
        }
    }
}

impl From<SqlError> for InternalError {
    fn from(err: SqlError) -> Self {
        Self {
            class: ErrorClass::Unsupported,
            origin: ErrorOrigin::Sql,
            message: err.to_string(),
            detail: Some(ErrorDetail::Sql(err)),
        }
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidInput,
    Unsupported,
    InvariantViolation,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "invalid_input",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Path,
    Ingest,
    Column,
    Sql,
    Export,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Path => "path",
            Self::Ingest => "ingest",
            Self::Column => "column",
            Self::Sql => "sql",
            Self::Export => "export",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_parse_error_maps_to_invalid_input() {
        let err: InternalError = PathParseError::Empty.into();

        assert!(err.is_invalid_input());
        assert_eq!(err.origin, ErrorOrigin::Path);
        assert!(matches!(err.detail, Some(ErrorDetail::Path(_))));
        assert_eq!(err.display_with_class(), "path:invalid_input: path is empty");
    }

    #[test]
    fn ingest_error_keeps_its_detail() {
        let err: InternalError = IngestError::NoHeader.into();

        assert!(err.is_invalid_input());
        assert_eq!(err.origin, ErrorOrigin::Ingest);
        assert!(matches!(err.detail, Some(ErrorDetail::Ingest(IngestError::NoHeader))));
        assert_eq!(err.message, "input has no header row");
    }

    #[test]
    fn sql_error_maps_to_unsupported() {
        let err: InternalError = SqlError::RootIndex {
            path: "[0].name".to_string(),
        }
        .into();

        assert_eq!(err.class, ErrorClass::Unsupported);
        assert_eq!(err.origin, ErrorOrigin::Sql);
    }
}
