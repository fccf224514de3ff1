//! Polish-up card endpoints

use axum::{extract::State, Json};
use flashforge_core::polish_up_card;
use flashforge_core::refine::{refine_model_output, strip_links};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/cards/polish
/// Diffs the question against the cleaned answer and appends the card to the note
pub async fn polish(
    State(state): State<AppState>,
    Json(payload): Json<PolishCardRequest>,
) -> Result<Json<CardResponse>> {
    let question = strip_links(payload.question.trim());
    let answer = refine_model_output(&payload.answer);
    if question.is_empty() || answer.is_empty() {
        return Err(ApiError::BadRequest(
            "question and answer must not be empty".to_string(),
        ));
    }

    let card = polish_up_card(&question, &answer, &state.config.palette);
    let text = card.to_note_text();

    if let Some(note_id) = &payload.note_id {
        state.notes.append_record(note_id, &text).await?;
        tracing::info!("Appended polish-up card to note {}", note_id);
    }

    Ok(Json(CardResponse {
        card: text,
        record: card.record,
        note_id: payload.note_id,
    }))
}
