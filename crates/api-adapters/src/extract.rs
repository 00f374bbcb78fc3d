//! Request extractors for the optional signed-in identity.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use domains::models::UserIdentity;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller's identity if a valid bearer token is present. A missing
/// header is anonymous (reads stay open); a present-but-invalid token is a
/// 401 rather than silent anonymity.
pub struct MaybeUser(pub Option<UserIdentity>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(MaybeUser(None));
        };
        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError(domains::DomainError::Unauthorized(
                    "malformed authorization header".into(),
                ))
            })?;
        let user = state.auth.authenticate(token).map_err(ApiError)?;
        Ok(MaybeUser(Some(user)))
    }
}
