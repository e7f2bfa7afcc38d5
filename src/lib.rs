//! # restgate
//!
//! Response emission and access-control gating for REST APIs built on axum.
//!
//! This crate owns the protocol-level contracts a REST server must keep
//! bit-exact for client compatibility: per-operation status code mapping,
//! the `X-Page-*` pagination headers, CORS negotiation, and the JSON error
//! envelope. It also provides the two-stage authentication/authorization
//! gate that runs before a business-logic handler executes.
//!
//! Transport lifecycle, routing, request parsing, and the concrete
//! authenticator/authorizer implementations stay outside; this crate
//! consumes their contracts.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use restgate::prelude::*;
//!
//! async fn list_users() -> Response {
//!     let mut ctx = Context::new(Operation::RetrieveMany);
//!     ctx.count.total = 40;
//!     ctx.count.page = 2;
//!     ctx.count.per_page = 10;
//!     ctx.set_output(vec!["alice", "bob"]);
//!     write_response(&ctx)
//! }
//!
//! let gate = AccessGate::new();
//! let app: Router = Router::new()
//!     .route("/users", get(list_users))
//!     .fallback(not_found_handler)
//!     .layer(middleware::from_fn_with_state(gate, AccessGate::middleware));
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod headers;
pub mod middleware;
pub mod observability;
pub mod pagination;
pub mod writer;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, ConfigError, ServiceConfig};
    pub use crate::context::{Context, Count, Operation, Payload, DEFAULT_PER_PAGE};
    pub use crate::error::{ApiError, ApiErrors, ERROR_SUBJECT};
    pub use crate::gate::{check_authentication, check_authorization, Authenticator, Authorizer};
    pub use crate::headers::{
        request_origin, set_common_headers, set_pagination_headers, ALLOWED_HEADERS,
        ALLOWED_METHODS, CONTENT_TYPE_JSON, EXPOSED_HEADERS,
    };
    pub use crate::middleware::AccessGate;
    pub use crate::observability::init_tracing;
    pub use crate::pagination::PageWindow;
    pub use crate::writer::{
        cors_handler, cors_response, not_found_handler, write_error, write_response,
    };

    pub use axum::{
        http::{HeaderMap, HeaderValue, Method, StatusCode},
        response::{IntoResponse, Response},
    };

    pub use serde::{Deserialize, Serialize};

    // Re-export tracing macros for handler code
    pub use tracing::{debug, error, info, trace, warn};

    // Re-export async-trait for capability implementations
    pub use async_trait::async_trait;
}
