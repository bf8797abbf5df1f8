use crate::auth::AuthError;
use crate::state::AppState;
use crate::web::api::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/register
#[tracing::instrument(skip(state, payload))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let user_id = state
        .identity
        .register(&state.pool, &req.username, &req.password)
        .await
        .inspect_err(|e| match e {
            AuthError::Internal(e) => tracing::error!("Failed to register user: {:#}", e),
            other => tracing::info!("Registration rejected: {}", other),
        })?;

    tracing::info!(user_id = %user_id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({"status": "OK", "id": user_id})),
    ))
}

/// POST /auth/login
#[tracing::instrument(skip(state, payload))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let user_id = state
        .identity
        .authenticate(&state.pool, &req.username, &req.password)
        .await
        .inspect_err(|e| match e {
            AuthError::Internal(e) => tracing::error!("DB error during login: {:#}", e),
            other => tracing::info!("Login rejected: {}", other),
        })?;

    let token = state.identity.issue_token(user_id)?;

    tracing::info!(user_id = %user_id, "Token issued");
    Ok(Json(json!({"status": "OK", "token": token})))
}
