//! Caller identity ingestion.
//!
//! The upstream authentication layer terminates the session token and
//! forwards the decoded caller as a JSON `x-caller-context` header. This
//! middleware turns it into a typed request extension; anything missing or
//! malformed fails closed with the generic unauthorized outcome.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::models::CallerIdentity;

pub const CALLER_CONTEXT_HEADER: &str = "x-caller-context";

pub async fn caller_identity_middleware(
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let raw = req
        .headers()
        .get(CALLER_CONTEXT_HEADER)
        .and_then(|value| value.to_str().ok());

    let raw = match raw {
        Some(raw) => raw,
        None => {
            tracing::warn!(reason = "missing caller context header", "request auth failed");
            return Err(AppError::Unauthorized(anyhow::anyhow!("unauthorized")));
        }
    };

    let identity: CallerIdentity = match serde_json::from_str(raw) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = %e, "malformed caller context header");
            return Err(AppError::Unauthorized(anyhow::anyhow!("unauthorized")));
        }
    };

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Extractor to easily get the authenticated caller in handlers.
pub struct Identity(pub CallerIdentity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<CallerIdentity>()
            .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("unauthorized")))?;

        Ok(Identity(identity.clone()))
    }
}
