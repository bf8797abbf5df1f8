use crate::state::AppState;
use crate::web::api::error::ApiError;
use crate::web::api::middleware::AuthUser;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use notekeep_common::models::{Note, NoteUpdate, Page};
use notekeep_db::NoteRepo;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Raw query values; bad numbers fall back to defaults instead of rejecting.
#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
}

fn parse_note_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest("invalid note id".to_string()))
}

/// POST /users/notes
#[tracing::instrument(skip(state, payload))]
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let note_id = NoteRepo::create(&state.pool, user_id, &req.title, &req.content).await?;

    tracing::info!(note_id, "Note created");
    Ok((
        StatusCode::CREATED,
        Json(json!({"status": "OK", "userId": user_id, "noteId": note_id})),
    ))
}

/// GET /users/notes?limit=&offset=&sort=
#[tracing::instrument(skip(state, query))]
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let page = Page::from_params(
        query.limit.as_deref(),
        query.offset.as_deref(),
        query.sort.as_deref(),
    );

    let notes = NoteRepo::list(&state.pool, user_id, page).await?;

    tracing::debug!(count = notes.len(), "Notes listed");
    Ok(Json(
        json!({"status": "OK", "userID": user_id, "notes": notes}),
    ))
}

/// GET /users/notes/{note_id}
#[tracing::instrument(skip(state, note_id))]
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    note_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(note_id) = note_id?;
    let note_id = parse_note_id(&note_id)?;

    let note = Note::from(NoteRepo::get(&state.pool, user_id, note_id).await?);

    Ok(Json(json!({"status": "OK", "userID": user_id, "note": note})))
}

/// PUT /users/notes/{note_id}
#[tracing::instrument(skip(state, note_id, payload))]
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    note_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<NoteUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(note_id) = note_id?;
    let note_id = parse_note_id(&note_id)?;
    let Json(update) = payload?;

    NoteRepo::update(&state.pool, user_id, note_id, &update).await?;

    tracing::info!(note_id, fields_empty = update.is_empty(), "Note updated");
    Ok(Json(
        json!({"status": "OK", "userID": user_id, "noteID": note_id}),
    ))
}

/// DELETE /users/notes/{note_id}
#[tracing::instrument(skip(state, note_id))]
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    note_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(note_id) = note_id?;
    let note_id = parse_note_id(&note_id)?;

    NoteRepo::delete(&state.pool, user_id, note_id).await?;

    tracing::info!(note_id, "Note deleted");
    Ok(Json(
        json!({"status": "OK", "userID": user_id, "noteID": note_id}),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_id() {
        assert_eq!(parse_note_id("42").unwrap(), 42);
        assert!(matches!(parse_note_id("abc"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_note_id(""), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_note_id("4.2"), Err(ApiError::BadRequest(_))));
    }
}
