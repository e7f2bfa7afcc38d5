//! The access gate: authentication, then authorization
//!
//! Two pluggable capability contracts run in sequence before a handler
//! executes; authorization only runs once authentication has passed. The
//! gate never writes a response itself — it returns an [`ApiError`] value
//! for the caller to route through the envelope encoder, keeping the
//! response-writing boundary in one place.
//!
//! Capability implementations may block on I/O (remote token verification
//! and the like); their failures are propagated synchronously, without
//! retry. Retry policy belongs to the implementation, not the gate.

use async_trait::async_trait;

use crate::{context::Context, error::ApiError};

/// Authentication capability: decides who the caller is
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Whether the request carried by `ctx` is authenticated.
    ///
    /// An `Err` is treated as an upstream failure and propagated unchanged,
    /// whatever status it carries.
    async fn is_authenticated(&self, ctx: &Context) -> Result<bool, ApiError>;
}

/// Authorization capability: decides what the caller may do
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Whether the request carried by `ctx` is allowed to proceed.
    ///
    /// An `Err` is normalized to a 500 by the gate; only the message
    /// survives.
    async fn is_authorized(&self, ctx: &Context) -> Result<bool, ApiError>;
}

/// Run the authentication check.
///
/// With no authenticator configured the gate is open and always passes.
/// A `false` verdict becomes a 401; an upstream error passes through
/// unchanged.
pub async fn check_authentication(
    authenticator: Option<&dyn Authenticator>,
    ctx: &Context,
) -> Result<(), ApiError> {
    let Some(authenticator) = authenticator else {
        return Ok(());
    };

    if authenticator.is_authenticated(ctx).await? {
        Ok(())
    } else {
        tracing::debug!(operation = %ctx.operation, "request rejected by authenticator");
        Err(ApiError::unauthorized())
    }
}

/// Run the authorization check.
///
/// With no authorizer configured the gate is open and always passes. A
/// `false` verdict becomes a 403. An upstream error is never surfaced with
/// whatever status the plugin reported: it is wrapped into a 500 with the
/// cause's message preserved as the description.
pub async fn check_authorization(
    authorizer: Option<&dyn Authorizer>,
    ctx: &Context,
) -> Result<(), ApiError> {
    let Some(authorizer) = authorizer else {
        return Ok(());
    };

    match authorizer.is_authorized(ctx).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            tracing::debug!(operation = %ctx.operation, "request rejected by authorizer");
            Err(ApiError::forbidden())
        }
        Err(err) => {
            tracing::error!(operation = %ctx.operation, error = %err, "authorizer failed");
            Err(ApiError::internal(err.to_string()))
        }
    }
}
