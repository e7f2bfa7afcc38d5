//! Access gate as an axum middleware layer
//!
//! [`AccessGate`] packages the authentication/authorization gate for use
//! with `axum::middleware::from_fn_with_state`: it answers CORS preflights,
//! builds a per-request [`Context`] from the method and `Origin` header,
//! and converts gate rejections into the JSON error envelope. Generated or
//! specialized handlers that run the gate themselves can call
//! [`AccessGate::check`] directly instead.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::{
    context::{Context, Operation},
    error::ApiError,
    gate::{check_authentication, check_authorization, Authenticator, Authorizer},
    headers::request_origin,
    writer::{cors_response, write_error},
};

/// The two-stage access gate with its configured capabilities.
///
/// Both capabilities are optional; an unconfigured stage always passes
/// (open by default).
///
/// # Example
///
/// ```rust,ignore
/// use axum::{middleware, routing::get, Router};
/// use restgate::middleware::AccessGate;
///
/// let gate = AccessGate::new().with_authenticator(MyTokenChecker::new());
/// let app: Router = Router::new()
///     .route("/users", get(list_users))
///     .layer(middleware::from_fn_with_state(gate.clone(), AccessGate::middleware));
/// ```
#[derive(Clone, Default)]
pub struct AccessGate {
    authenticator: Option<Arc<dyn Authenticator>>,
    authorizer: Option<Arc<dyn Authorizer>>,
}

impl AccessGate {
    /// Create an open gate with no capabilities configured
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the authentication capability
    #[must_use]
    pub fn with_authenticator<A>(mut self, authenticator: A) -> Self
    where
        A: Authenticator + 'static,
    {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    /// Configure the authorization capability
    #[must_use]
    pub fn with_authorizer<Z>(mut self, authorizer: Z) -> Self
    where
        Z: Authorizer + 'static,
    {
        self.authorizer = Some(Arc::new(authorizer));
        self
    }

    /// Run authentication, then authorization, stopping at the first
    /// rejection.
    pub async fn check(&self, ctx: &Context) -> Result<(), ApiError> {
        check_authentication(self.authenticator.as_deref(), ctx).await?;
        check_authorization(self.authorizer.as_deref(), ctx).await
    }

    /// Middleware entry point for `axum::middleware::from_fn_with_state`.
    ///
    /// OPTIONS requests are answered directly as CORS probes and never reach
    /// the gate or the inner handler.
    pub async fn middleware(
        State(gate): State<Self>,
        request: Request<Body>,
        next: Next,
    ) -> Response {
        let origin = request_origin(request.headers());

        if request.method() == Method::OPTIONS {
            return cors_response(origin.as_deref());
        }

        let mut ctx = Context::new(Operation::from_method(request.method()))
            .with_method(request.method().clone());
        ctx.origin = origin.clone();

        if let Err(err) = gate.check(&ctx).await {
            return write_error(origin.as_deref(), err);
        }

        next.run(request).await
    }
}
