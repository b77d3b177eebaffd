//! Error types for request handling.
//!
//! Every failure a handler can produce is a [`ServiceError`]. All variants
//! except [`ServiceError::Internal`] are user-actionable and their message is
//! returned to the client verbatim; internal errors are only ever logged.

use thiserror::Error;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more required request parameters are absent.
    /// Names are kept in the order the handler declared them.
    #[error("Missing parameters {}", .0.join(","))]
    MissingParameters(Vec<String>),

    /// Malformed date text.
    #[error("{0}")]
    InvalidDate(String),

    /// No archived resource matches the requested date/time.
    #[error("{0}")]
    NotFound(String),

    /// Any other recognized, user-facing condition.
    #[error("{0}")]
    Domain(String),

    /// Anything unexpected. Never shown to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn internal(message: impl std::fmt::Display) -> Self {
        ServiceError::Internal(anyhow::anyhow!("{}", message))
    }

    /// Whether the message may be shown to the client.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ServiceError::Internal(_))
    }

    /// Short category label used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::MissingParameters(_) => "validation",
            ServiceError::InvalidDate(_) => "parse",
            ServiceError::NotFound(_) => "resolution",
            ServiceError::Domain(_) => "domain",
            ServiceError::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameters_message() {
        let err = ServiceError::MissingParameters(vec!["a".into(), "c".into()]);
        assert_eq!(err.to_string(), "Missing parameters a,c");
    }

    #[test]
    fn test_user_facing_variants() {
        assert!(ServiceError::InvalidDate("x".into()).is_user_facing());
        assert!(ServiceError::NotFound("x".into()).is_user_facing());
        assert!(ServiceError::Domain("x".into()).is_user_facing());
        assert!(ServiceError::MissingParameters(vec![]).is_user_facing());
        assert!(!ServiceError::internal("boom").is_user_facing());
    }

    #[test]
    fn test_internal_from_anyhow_keeps_message() {
        let err: ServiceError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(err.kind(), "internal");
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ServiceError::MissingParameters(vec![]).kind(), "validation");
        assert_eq!(ServiceError::InvalidDate(String::new()).kind(), "parse");
        assert_eq!(ServiceError::NotFound(String::new()).kind(), "resolution");
        assert_eq!(ServiceError::Domain(String::new()).kind(), "domain");
    }
}
