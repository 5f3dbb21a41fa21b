use std::sync::Arc;

use crate::audit::StageStore;
use crate::prepitch::architect::PrePitchArchitect;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub architect: Arc<PrePitchArchitect>,
    /// Same store the architect persists to; the progress endpoint reads it.
    pub store: Arc<dyn StageStore>,
}
