//! Definition ranking endpoint

use axum::Json;
use flashforge_core::ranking::{format_definitions, rank, DEFAULT_TOP_K};

use crate::error::{ApiError, Result};
use crate::models::*;

/// POST /api/definitions/rank
pub async fn rank_definitions(
    Json(payload): Json<RankDefinitionsRequest>,
) -> Result<Json<RankDefinitionsResponse>> {
    let k = payload.k.unwrap_or(DEFAULT_TOP_K);
    if k == 0 {
        return Err(ApiError::BadRequest("k must be at least 1".to_string()));
    }

    let definitions = rank(&payload.candidates, &payload.reference, k);
    Ok(Json(RankDefinitionsResponse {
        formatted: format_definitions(&definitions),
        definitions,
    }))
}
