//! Axum route handlers for the pre-pitch API. Thin wrappers: mint a session
//! id, run the pipeline, shape the response. No pipeline logic here.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::prepitch::models::{AnalysisContext, Driver, ResultBundle};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "drivers_list", default)]
    pub drivers: Vec<Driver>,
    #[serde(rename = "avatar_analysis", default)]
    pub avatar: Value,
    #[serde(rename = "context_data", default)]
    pub context: AnalysisContext,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    pub session_id: String,
    pub data: ResultBundle,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub status: String,
    pub session_id: String,
    pub data: BTreeMap<String, Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/prepitch
///
/// Runs the complete pre-pitch pipeline. Responds 400 only for the three
/// hard input errors; every other failure mode returns a fallback-tagged
/// bundle with 200.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let session_id = new_session_id();
    info!(
        "pre-pitch requested: session={session_id} segmento={:?} drivers={}",
        request.context.segment,
        request.drivers.len()
    );

    let bundle = state
        .architect
        .generate_complete_system(&session_id, &request.drivers, &request.avatar, &request.context)
        .await?;

    Ok(Json(GenerateResponse {
        success: true,
        message: "Pré-pitch gerado com sucesso".to_string(),
        session_id,
        data: bundle,
    }))
}

/// GET /api/prepitch/progress/:session_id
///
/// Reconstructs the saved stage snapshots for a session. 404 when the
/// session has none.
pub async fn handle_progress(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ProgressResponse>, AppError> {
    let stages = state.store.load_stages(&session_id).await?;

    if stages.is_empty() {
        return Err(AppError::NotFound("Sessão não encontrada".to_string()));
    }

    let status = if stages.contains_key("pre_pitch_final") {
        "completed"
    } else {
        "in_progress"
    };

    Ok(Json(ProgressResponse {
        status: status.to_string(),
        session_id,
        data: stages,
    }))
}

/// Session identifiers: millisecond timestamp plus a short random suffix.
fn new_session_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", Utc::now().timestamp_millis(), &suffix[..12])
}
