use crate::state::AppState;
use crate::web::api::error::ApiError;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use notekeep_common::models::UserId;
use std::sync::Arc;

/// Extractor that validates a Bearer token and provides the caller's id.
///
/// Handlers that take `AuthUser` never run for unauthenticated requests; the
/// rejection is a 401 produced here.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                ApiError::Unauthorized("invalid authorization header".to_string())
            })?),
            None => None,
        };

        let token = bearer_token(auth_header)?;

        match state.identity.verify_token(token) {
            Ok(user_id) => {
                tracing::debug!(user_id = %user_id, "User identity found");
                Ok(AuthUser(user_id))
            }
            Err(e) => {
                tracing::info!("Rejected bearer token: {}", e);
                Err(e.into())
            }
        }
    }
}

/// Pull the token out of an `Authorization` value of the form `Bearer <token>`.
pub fn bearer_token(header: Option<&str>) -> Result<&str, ApiError> {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => {
            return Err(ApiError::Unauthorized(
                "empty authorization header".to_string(),
            ))
        }
    };

    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(*token)
        }
        _ => Err(ApiError::Unauthorized(
            "invalid authorization header".to_string(),
        )),
    }
}
