//! Dictionary lookup endpoints
//!
//! A lookup runs in the background. Clients poll the session and answer
//! `awaiting_choice` states through the choice endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use flashforge_core::ranking::{format_definitions, rank, DEFAULT_TOP_K};
use flashforge_core::refine::mark_selection;
use flashforge_core::{vocab_card, vocab_question};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/lookups
/// Starts a lookup session and returns its id
pub async fn start(
    State(state): State<AppState>,
    Json(payload): Json<StartLookupRequest>,
) -> Result<Json<StartLookupResponse>> {
    let word = payload.word.trim();
    if word.is_empty() {
        return Err(ApiError::BadRequest("word must not be empty".to_string()));
    }

    let session = state.lookups.start(state.dictionary.clone(), word).await;
    tracing::info!("Started lookup {} for {:?}", session.id, word);

    Ok(Json(StartLookupResponse {
        session_id: session.id,
    }))
}

/// GET /api/lookups/:id
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LookupSessionResponse>> {
    let session = state.lookups.get(id).await?;
    Ok(Json(session.snapshot()))
}

/// DELETE /api/lookups/:id
/// Drops the session; a pending choice is closed and the lookup ends
pub async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.lookups.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/lookups/:id/choice
/// Resolves the pending choice of a session
pub async fn choose(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChoiceRequest>,
) -> Result<Json<LookupSessionResponse>> {
    let session = state.lookups.get(id).await?;
    session.submit_choice(&payload.label)?;
    Ok(Json(session.snapshot()))
}

/// POST /api/lookups/:id/card
/// Builds a vocab card from a completed lookup and appends it to the note
pub async fn card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VocabCardRequest>,
) -> Result<Json<CardResponse>> {
    let session = state.lookups.get(id).await?;
    let outcome = session.outcome()?;

    let total = outcome.definitions.len();
    let all_options = format_definitions(&outcome.definitions);
    let answer = payload.answer.unwrap_or_else(|| all_options.clone());
    let options = if total > 1 {
        format_definitions(&rank(&outcome.definitions, &answer, DEFAULT_TOP_K))
    } else {
        all_options
    };

    let paragraph = match payload.selection {
        Some(range) => mark_selection(&payload.paragraph, range.from, range.to, &session.word),
        None => payload.paragraph,
    };
    let question = vocab_question(&paragraph, &options, total);
    let card = vocab_card(
        &session.word,
        &outcome.searched_key,
        &question,
        &answer,
        &state.config.palette,
    );
    let text = card.to_note_text();

    if let Some(note_id) = &payload.note_id {
        state.notes.append_record(note_id, &text).await?;
        tracing::info!("Appended vocab card for {:?} to note {}", session.word, note_id);
    }

    Ok(Json(CardResponse {
        card: text,
        record: card.record,
        note_id: payload.note_id,
    }))
}
