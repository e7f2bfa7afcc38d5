//! Per-request context consumed by the response writer
//!
//! A [`Context`] is created once per inbound request, populated by the
//! routing/business layer (operation, output payload, error state, total
//! count), handed to [`crate::writer::write_response`] exactly once, and
//! discarded. It is exclusively owned by its request and never shared.

use std::fmt;

use axum::http::Method;
use serde::Serialize;

use crate::error::{ApiError, ApiErrors};

/// Default page size when the originating request does not specify one
pub const DEFAULT_PER_PAGE: u32 = 100;

/// The semantic REST action requested, distinct from the raw HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Creating a new entity
    Create,
    /// Retrieving a single entity
    Retrieve,
    /// Retrieving a collection of entities
    RetrieveMany,
    /// Replacing an existing entity
    Update,
    /// Deleting an entity
    Delete,
    /// Probing a collection without retrieving bodies
    Info,
    /// Partially modifying an existing entity
    Patch,
}

impl Operation {
    /// Coarse mapping from an HTTP method, for contexts built by middleware
    /// before routing has resolved the exact operation.
    #[must_use]
    pub fn from_method(method: &Method) -> Self {
        match method.as_str() {
            "POST" => Self::Create,
            "PUT" => Self::Update,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "HEAD" => Self::Info,
            _ => Self::Retrieve,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Retrieve => write!(f, "retrieve"),
            Self::RetrieveMany => write!(f, "retrieve_many"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Info => write!(f, "info"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// Collection counts and the page position of the originating request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Count {
    /// Total number of items across all pages
    pub total: u64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl Default for Count {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// A payload that can be encoded to a JSON response body.
///
/// Blanket-implemented for every `Serialize + Send + Sync` type; encoding
/// is fallible so the writer can recover from payloads whose serialization
/// is intrinsically impossible.
pub trait Payload: Send + Sync {
    /// Encode the payload to JSON bytes
    fn encode(&self) -> serde_json::Result<Vec<u8>>;
}

impl<T> Payload for T
where
    T: Serialize + Send + Sync,
{
    fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Per-request carrier of operation, output payload, error state, and counts
pub struct Context {
    /// The semantic operation being performed
    pub operation: Operation,
    /// The inbound HTTP method
    pub method: Method,
    /// Collection counts and page position
    pub count: Count,
    /// The request's `Origin` header value, echoed in CORS headers
    pub origin: Option<String>,
    /// Output payload, serialized as the response body (`null` when absent)
    pub output: Option<Box<dyn Payload>>,
    /// Error state; when set, the writer emits the error envelope instead
    pub errors: Option<ApiErrors>,
}

impl Context {
    /// Create a context for the given operation
    #[must_use]
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            method: Method::GET,
            count: Count::default(),
            origin: None,
            output: None,
            errors: None,
        }
    }

    /// Set the inbound HTTP method
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the request's origin
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the output payload
    pub fn set_output<T>(&mut self, data: T)
    where
        T: Serialize + Send + Sync + 'static,
    {
        self.output = Some(Box::new(data));
    }

    /// Record an error, replacing any previous error state
    pub fn set_error(&mut self, error: impl Into<ApiErrors>) {
        self.errors = Some(error.into());
    }

    /// Append an error entry, preserving order
    pub fn push_error(&mut self, error: ApiError) {
        match &mut self.errors {
            Some(errors) => errors.push(error),
            None => self.errors = Some(ApiErrors::new(error)),
        }
    }

    /// Whether an error has been recorded
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.errors.is_some()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("operation", &self.operation)
            .field("method", &self.method)
            .field("count", &self.count)
            .field("origin", &self.origin)
            .field("output", &self.output.as_ref().map(|_| "<payload>"))
            .field("errors", &self.errors)
            .finish()
    }
}
