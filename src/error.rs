//! Wire-level error entries and the JSON error envelope
//!
//! Every failure surfaced to a client is one or more [`ApiError`] entries
//! rendered as a JSON array. Field order within an entry is part of the wire
//! contract (`code, description, subject, title, data`) and is fixed by the
//! struct declaration order below; `data` serializes as `null` when absent.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Subject tag attached to errors generated by this crate
pub const ERROR_SUBJECT: &str = "restgate";

/// A single wire-level error entry
///
/// `code` doubles as the HTTP status of the response when this entry leads
/// the envelope.
///
/// # Example
///
/// ```rust
/// use restgate::error::ApiError;
///
/// let err = ApiError::new("Not Found", "No such user.", "users", 404);
/// assert_eq!(err.code, 404);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{title} ({code}): {description}")]
pub struct ApiError {
    /// HTTP status code carried by this entry
    pub code: u16,
    /// Human-readable description of the failure
    pub description: String,
    /// Resource or domain the failure relates to
    pub subject: String,
    /// Short title
    pub title: String,
    /// Optional attached payload, `null` on the wire when absent
    pub data: Option<Value>,
}

impl ApiError {
    /// Create a new error entry
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        subject: impl Into<String>,
        code: u16,
    ) -> Self {
        Self {
            code,
            description: description.into(),
            subject: subject.into(),
            title: title.into(),
            data: None,
        }
    }

    /// Attach a payload to the entry
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The 401 error returned when authentication fails
    pub fn unauthorized() -> Self {
        Self::new(
            "Unauthorized",
            "You are not authorized to access this resource.",
            ERROR_SUBJECT,
            StatusCode::UNAUTHORIZED.as_u16(),
        )
    }

    /// The 403 error returned when authorization fails
    pub fn forbidden() -> Self {
        Self::new(
            "Forbidden",
            "You are not allowed to access this resource.",
            ERROR_SUBJECT,
            StatusCode::FORBIDDEN.as_u16(),
        )
    }

    /// A 500 error preserving the underlying cause's message
    pub fn internal(description: impl Into<String>) -> Self {
        Self::new(
            "Internal Server Error",
            description,
            ERROR_SUBJECT,
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        )
    }

    /// HTTP status for this entry.
    ///
    /// Codes outside the valid HTTP range map to 500.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// An ordered collection of error entries
///
/// Serializes transparently as a JSON array. Order is preserved; the first
/// entry's code governs the response status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ApiErrors(Vec<ApiError>);

impl ApiErrors {
    /// Create an envelope holding a single entry
    pub fn new(error: ApiError) -> Self {
        Self(vec![error])
    }

    /// Append an entry, preserving order
    pub fn push(&mut self, error: ApiError) {
        self.0.push(error);
    }

    /// The entries in envelope order
    #[must_use]
    pub fn entries(&self) -> &[ApiError] {
        &self.0
    }

    /// Status code of the first entry, 500 when the envelope is empty
    #[must_use]
    pub fn code(&self) -> u16 {
        self.0
            .first()
            .map_or(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), |e| e.code)
    }

    /// HTTP status derived from [`ApiErrors::code`]
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the envelope holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{entry}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ApiErrors {}

impl From<ApiError> for ApiErrors {
    fn from(error: ApiError) -> Self {
        Self::new(error)
    }
}

impl From<Vec<ApiError>> for ApiErrors {
    fn from(errors: Vec<ApiError>) -> Self {
        Self(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        crate::writer::write_error(None, self)
    }
}

impl IntoResponse for ApiErrors {
    fn into_response(self) -> Response {
        crate::writer::write_error(None, self)
    }
}
