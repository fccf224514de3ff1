//! Note endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/notes/:id
pub async fn get(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<NoteResponse>> {
    let records = state
        .notes
        .records(&note_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("note {}", note_id)))?;
    Ok(Json(NoteResponse { note_id, records }))
}
