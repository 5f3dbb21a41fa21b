//! Stage persistence — the audit trail every pipeline stage writes to.
//!
//! Best-effort by contract: the pipeline logs store failures and keeps
//! going; a broken disk must never cost the caller their result. Snapshots
//! are append-only and keyed by session, so concurrent sessions never touch
//! each other's files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistence/audit collaborator. `save_stage` and `record_error` are
/// best-effort — callers log failures and continue; `load_stages` feeds the
/// progress endpoint.
#[async_trait]
pub trait StageStore: Send + Sync {
    async fn save_stage(
        &self,
        session_id: &str,
        stage: &str,
        payload: &Value,
        category: &str,
    ) -> Result<(), StoreError>;

    async fn record_error(
        &self,
        session_id: &str,
        stage: &str,
        error: &str,
        context: &Value,
    ) -> Result<(), StoreError>;

    /// Successfully saved stage payloads for a session, keyed by stage name.
    async fn load_stages(&self, session_id: &str) -> Result<BTreeMap<String, Value>, StoreError>;
}

/// Filesystem-backed [`StageStore`]. Layout:
/// `<base>/<session>/<category>/<stage>.json`, error records under the
/// `erros` category. Each file is a timestamped envelope around the payload.
pub struct FsStageStore {
    base_dir: PathBuf,
}

const ERROR_CATEGORY: &str = "erros";

impl FsStageStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn session_dir(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(sanitize(session_id))
    }

    async fn write_envelope(
        &self,
        session_id: &str,
        category: &str,
        stage: &str,
        envelope: &Value,
    ) -> Result<(), StoreError> {
        let dir = self.session_dir(session_id).join(sanitize(category));
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(format!("{}.json", sanitize(stage)));
        let bytes = serde_json::to_vec_pretty(envelope)?;
        tokio::fs::write(&path, bytes).await?;

        debug!("stage snapshot written: {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl StageStore for FsStageStore {
    async fn save_stage(
        &self,
        session_id: &str,
        stage: &str,
        payload: &Value,
        category: &str,
    ) -> Result<(), StoreError> {
        let envelope = json!({
            "etapa": stage,
            "status": "sucesso",
            "timestamp": Utc::now(),
            "dados": payload,
        });
        self.write_envelope(session_id, category, stage, &envelope)
            .await
    }

    async fn record_error(
        &self,
        session_id: &str,
        stage: &str,
        error: &str,
        context: &Value,
    ) -> Result<(), StoreError> {
        let envelope = json!({
            "etapa": stage,
            "status": "erro",
            "timestamp": Utc::now(),
            "erro": error,
            "contexto": context,
        });
        self.write_envelope(session_id, ERROR_CATEGORY, stage, &envelope)
            .await
    }

    async fn load_stages(&self, session_id: &str) -> Result<BTreeMap<String, Value>, StoreError> {
        let session_dir = self.session_dir(session_id);
        let mut stages = BTreeMap::new();

        if !session_dir.is_dir() {
            return Ok(stages);
        }

        let mut categories = tokio::fs::read_dir(&session_dir).await?;
        while let Some(category) = categories.next_entry().await? {
            if !category.file_type().await?.is_dir() {
                continue;
            }
            let mut files = tokio::fs::read_dir(category.path()).await?;
            while let Some(file) = files.next_entry().await? {
                let path = file.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let Some(stage) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let bytes = tokio::fs::read(&path).await?;
                let envelope: Value = match serde_json::from_slice(&bytes) {
                    Ok(v) => v,
                    Err(_) => continue, // unreadable snapshot; skip, don't fail the listing
                };
                if envelope["status"] == "sucesso" {
                    stages.insert(stage.to_string(), envelope["dados"].clone());
                }
            }
        }

        Ok(stages)
    }
}

/// Keeps session/category/stage names inside the store directory.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
