//! Organization-scoped gate in front of the metrics backend.
//!
//! Authenticates the machine credential, stamps the tenant scope header and
//! hands the request to the configured upstream. The gate is the sole
//! authentication point on this path: no caller identity, no session token,
//! only the system credential.

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue},
    response::Response,
};

use crate::AppState;
use service_core::error::AppError;

/// Tenant scope header injected on the forwarded request.
pub const SCOPE_ORG_HEADER: &str = "x-scope-orgid";

/// Resolved organization scope, also exposed as a request extension for
/// in-process upstreams.
#[derive(Debug, Clone)]
pub struct ScopeOrg(pub String);

/// ANY /api/metrics/{*path}
///
/// On success exactly one upstream header conveys the resolved organization
/// id; on failure the response is the uniform unauthorized envelope.
pub async fn proxy_metrics(
    State(state): State<AppState>,
    mut req: Request,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let organization_id = state.system_auth.verify(authorization.as_deref()).await?;

    let scope = HeaderValue::from_str(&organization_id).map_err(|_| {
        AppError::InternalError(anyhow::anyhow!(
            "organization id is not a valid header value"
        ))
    })?;

    // The credential must not travel upstream.
    req.headers_mut().remove(header::AUTHORIZATION);
    req.headers_mut()
        .insert(HeaderName::from_static(SCOPE_ORG_HEADER), scope);
    req.extensions_mut().insert(ScopeOrg(organization_id));

    state.upstream.forward(req).await
}
