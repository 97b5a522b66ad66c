use axum::http::{header, HeaderMap};
use domain::{DomainError, Principal, UserRole};

use crate::AppState;

/// Pulls the bearer token out of the Authorization header and resolves it to
/// the session owner. Missing or stale tokens fail with `AuthenticationFailed`.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Principal, DomainError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(DomainError::AuthenticationFailed)?;

    state.app.auth_service.authenticate(token).await
}

/// Authenticates and then checks the caller holds one of the allowed roles.
pub async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    roles: &[UserRole],
) -> Result<Principal, DomainError> {
    let principal = authenticate(state, headers).await?;
    domain::check_authentication(&principal, roles)?;
    Ok(principal)
}
