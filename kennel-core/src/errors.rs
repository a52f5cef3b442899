//! # Errors
//!
//! Kennel carries a small set of structured errors through `anyhow::Error`.
//! - each kind maps to one HTTP status code
//! - a `KennelError` can sit anywhere in an anyhow chain and still be found
//! - transport-agnostic (the HTTP crate decides how to render it)

use std::fmt;

use anyhow::Error as AnyError;

/// A convenience result type for Kennel core APIs.
pub type KennelResult<T> = std::result::Result<T, AnyError>;

/// Error classes surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,   // 400
    NotFound,     // 404
    GeneralError, // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::GeneralError => 500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::GeneralError => "GeneralError",
        }
    }
}

/// A structured Kennel error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct KennelError {
    pub kind: ErrorKind,
    pub message: String,
    pub source: Option<AnyError>,
}

impl KennelError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Convert into `anyhow::Error` so it flows through `?`.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Find a `KennelError` anywhere in an anyhow chain (context layers included).
    pub fn from_anyhow(err: &AnyError) -> Option<&KennelError> {
        err.chain().find_map(|e| e.downcast_ref::<KennelError>())
    }

    /// Client-safe copy: drops the inner `source`, and hides the message of
    /// general errors since it usually comes from the store driver.
    pub fn sanitize_for_client(&self) -> KennelError {
        let message = match self.kind {
            ErrorKind::GeneralError => "internal server error".to_string(),
            _ => self.message.clone(),
        };
        KennelError {
            kind: self.kind,
            message,
            source: None,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }

    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }

    /// Envelope-shaped JSON payload: `{ "status": <code>, "message": <text> }`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.code(),
            "message": self.message,
        })
    }
}

impl fmt::Display for KennelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for KennelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Convenience helper for "bail with KennelError".
#[macro_export]
macro_rules! bail_kennel {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::KennelError::$ctor($msg).into_anyhow());
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::KennelError::$ctor(format!($fmt, $($arg)*)).into_anyhow());
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn kennel_error_survives_context_layers() {
        let err: AnyError = KennelError::not_found("no dog found").into_anyhow();
        let err = Err::<(), _>(err).context("loading dog 7").unwrap_err();

        let found = KennelError::from_anyhow(&err).unwrap();
        assert_eq!(found.kind, ErrorKind::NotFound);
        assert_eq!(found.code(), 404);
    }

    #[test]
    fn sanitize_hides_general_error_details() {
        let err = KennelError::general_error("disk I/O error")
            .with_source(anyhow::anyhow!("disk I/O error"));
        assert!(err.source.is_some());

        let safe = err.sanitize_for_client();
        assert_eq!(safe.message, "internal server error");
        assert!(safe.source.is_none());
    }

    #[test]
    fn to_json_has_envelope_shape() {
        let body = KennelError::bad_request("age required").to_json();
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "age required");
    }
}
