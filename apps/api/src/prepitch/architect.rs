//! Pre-Pitch Architect — orchestrates the full pipeline.
//!
//! Flow: validate input → select drivers → build orchestration →
//!       generate script (LLM) → validate → post-process → assemble bundle.
//!
//! Every stage snapshot is persisted (best-effort) before the next stage
//! runs. After input validation passes, the caller ALWAYS receives a
//! well-formed bundle: each stage degrades to its canned substitute on
//! failure, and anything unexpected converts to the full fallback bundle.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::audit::StageStore;
use crate::errors::AppError;
use crate::llm_client::ContentGenerator;
use crate::prepitch::fallback;
use crate::prepitch::models::{
    AnalysisContext, Driver, ResultBundle, ValidationStatus,
};
use crate::prepitch::orchestration::build_orchestration;
use crate::prepitch::postprocess;
use crate::prepitch::script::generate_script;
use crate::prepitch::selector::select_optimal_drivers;

/// Audit category for every stage snapshot of this pipeline.
const STAGE_CATEGORY: &str = "pre_pitch";

/// The pipeline component. Explicitly constructed with its two collaborator
/// ports; no process-wide state. All tables it consults are compile-time
/// constants in `phases`.
pub struct PrePitchArchitect {
    generator: Arc<dyn ContentGenerator>,
    store: Arc<dyn StageStore>,
}

impl PrePitchArchitect {
    pub fn new(generator: Arc<dyn ContentGenerator>, store: Arc<dyn StageStore>) -> Self {
        Self { generator, store }
    }

    /// Runs the complete pipeline for one request.
    ///
    /// The only surfaced errors are the input-validation ones: an absent
    /// avatar analysis or an absent segment. An empty driver list degrades
    /// to the canned basic set. Every other failure mode — generation,
    /// parsing, validation, persistence, anything unexpected — degrades to
    /// fallback content instead of propagating.
    pub async fn generate_complete_system(
        &self,
        session_id: &str,
        drivers: &[Driver],
        avatar: &serde_json::Value,
        context: &AnalysisContext,
    ) -> Result<ResultBundle, AppError> {
        if avatar_is_absent(avatar) {
            error!("pre-pitch rejected: avatar analysis missing");
            return Err(AppError::Validation(
                "PRÉ-PITCH FALHOU: Análise do avatar ausente".to_string(),
            ));
        }

        if context
            .segment
            .as_deref()
            .map_or(true, |s| s.trim().is_empty())
        {
            error!("pre-pitch rejected: segment missing");
            return Err(AppError::Validation(
                "PRÉ-PITCH FALHOU: Segmento obrigatório".to_string(),
            ));
        }

        match self.run_pipeline(session_id, drivers, avatar, context).await {
            Ok(bundle) => Ok(bundle),
            Err(err) => {
                error!("pre-pitch pipeline failed unexpectedly: {err:#}");
                self.record_error(session_id, "pre_pitch_sistema", &err.to_string(), context)
                    .await;
                warn!("returning full fallback pre-pitch bundle");
                Ok(fallback::fallback_bundle(context))
            }
        }
    }

    async fn run_pipeline(
        &self,
        session_id: &str,
        drivers: &[Driver],
        avatar: &serde_json::Value,
        context: &AnalysisContext,
    ) -> anyhow::Result<ResultBundle> {
        info!(
            "generating pre-pitch for session {session_id} with {} drivers",
            drivers.len()
        );

        self.persist(
            session_id,
            "pre_pitch_entrada",
            &json!({
                "drivers_list": drivers,
                "avatar_analysis": avatar,
                "context_data": context,
            }),
        )
        .await;

        // Stage 1: driver selection, canned set when nothing qualifies
        let mut selected = select_optimal_drivers(drivers);
        if selected.is_empty() {
            warn!("no suitable drivers selected — using basic driver set");
            selected = fallback::basic_drivers();
        }
        self.persist(session_id, "drivers_selecionados", &selected).await;

        // Stage 2: orchestration, canned sequence when no driver mapped
        let mut orchestration = build_orchestration(&selected);
        if orchestration.sequence.is_empty() {
            warn!("emotional orchestration came back empty — using basic orchestration");
            orchestration = fallback::basic_orchestration();
        }
        self.persist(session_id, "orquestracao_emocional", &orchestration)
            .await;

        // Stage 3: the single generation attempt; any failure means the
        // whole AI script is discarded for the canned one
        let (script, validation_status) =
            match generate_script(self.generator.as_ref(), &orchestration, context).await {
                Ok(script) => {
                    info!("AI script generated and validated");
                    (script, ValidationStatus::Valid)
                }
                Err(failure) => {
                    warn!("AI script discarded ({failure}) — using basic script");
                    self.record_error(session_id, "pre_pitch_roteiro", &failure.to_string(), context)
                        .await;
                    (fallback::basic_script(context), ValidationStatus::FallbackValid)
                }
            };
        self.persist(session_id, "roteiro_completo", &script).await;

        // Stage 4: post-processing and assembly
        let bundle = ResultBundle {
            total_duration: postprocess::total_duration(&orchestration),
            max_intensity: postprocess::max_intensity(&orchestration),
            format_variations: postprocess::format_variations(),
            success_metrics: postprocess::success_metrics(),
            drivers_used: selected.iter().map(|d| d.name.clone()).collect(),
            orchestration,
            script,
            validation_status,
            generation_timestamp: Utc::now(),
            fallback_mode: false,
        };
        self.persist(session_id, "pre_pitch_final", &bundle).await;

        info!("pre-pitch generated for session {session_id}");
        Ok(bundle)
    }

    /// Best-effort stage snapshot; failures are logged, never propagated.
    async fn persist<T: Serialize>(&self, session_id: &str, stage: &str, payload: &T) {
        let value = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(err) => {
                warn!("stage '{stage}' could not be serialized for audit: {err}");
                return;
            }
        };
        if let Err(err) = self
            .store
            .save_stage(session_id, stage, &value, STAGE_CATEGORY)
            .await
        {
            warn!("stage '{stage}' could not be saved: {err}");
        }
    }

    /// Best-effort error record with the segment context attached.
    async fn record_error(
        &self,
        session_id: &str,
        stage: &str,
        message: &str,
        context: &AnalysisContext,
    ) {
        if let Err(err) = self
            .store
            .record_error(session_id, stage, message, &fallback::error_context(context))
            .await
        {
            warn!("error record for '{stage}' could not be saved: {err}");
        }
    }
}

/// An avatar analysis is absent when it is null or an empty object.
fn avatar_is_absent(avatar: &serde_json::Value) -> bool {
    match avatar {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::audit::StoreError;
    use crate::llm_client::GenerationError;
    use crate::prepitch::validation::{
        validate_script, BASIC_SCRIPT_SECTIONS, MASSIVE_SCRIPT_SECTIONS,
    };

    // ── test doubles ────────────────────────────────────────────────────────

    /// Generator stub returning a fixed response (or error) for every call.
    struct StubGenerator {
        response: Result<String, fn() -> GenerationError>,
    }

    impl StubGenerator {
        fn returning(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
            }
        }

        fn failing(make: fn() -> GenerationError) -> Self {
            Self { response: Err(make) }
        }
    }

    #[async_trait]
    impl ContentGenerator for StubGenerator {
        async fn generate(&self, _: &str, _: u32) -> Result<String, GenerationError> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    /// In-memory store recording every save/error call in order.
    #[derive(Default)]
    struct MemoryStore {
        stages: Mutex<Vec<(String, String, Value)>>,
        errors: Mutex<Vec<(String, String, Value)>>,
    }

    #[async_trait]
    impl StageStore for MemoryStore {
        async fn save_stage(
            &self,
            session_id: &str,
            stage: &str,
            payload: &Value,
            _category: &str,
        ) -> Result<(), StoreError> {
            self.stages.lock().unwrap().push((
                session_id.to_string(),
                stage.to_string(),
                payload.clone(),
            ));
            Ok(())
        }

        async fn record_error(
            &self,
            session_id: &str,
            stage: &str,
            error: &str,
            context: &Value,
        ) -> Result<(), StoreError> {
            self.errors.lock().unwrap().push((
                session_id.to_string(),
                stage.to_string(),
                json!({ "erro": error, "contexto": context }),
            ));
            Ok(())
        }

        async fn load_stages(&self, _: &str) -> Result<BTreeMap<String, Value>, StoreError> {
            Ok(BTreeMap::new())
        }
    }

    // ── fixtures ────────────────────────────────────────────────────────────

    fn architect_with(generator: StubGenerator) -> (Arc<MemoryStore>, PrePitchArchitect) {
        let store = Arc::new(MemoryStore::default());
        let architect = PrePitchArchitect::new(Arc::new(generator), store.clone());
        (store, architect)
    }

    fn context() -> AnalysisContext {
        AnalysisContext {
            segment: Some("fitness".to_string()),
            product: Some("Programa Elite".to_string()),
        }
    }

    fn avatar() -> Value {
        json!({"x": 1})
    }

    fn drivers() -> Vec<Driver> {
        vec![Driver::named("Diagnóstico Brutal")]
    }

    /// A generator response that satisfies the six-beat contract.
    fn valid_ai_response() -> String {
        let body = "Roteiro detalhado o suficiente para passar na validação estrutural, \
                    com conteúdo específico do segmento e chamada para a próxima seção.";
        let mut sections = serde_json::Map::new();
        for name in MASSIVE_SCRIPT_SECTIONS {
            sections.insert(
                name.to_string(),
                json!({ "tempo": "4-6 minutos", "script": body }),
            );
        }
        format!("```json\n{}\n```", Value::Object(sections))
    }

    // ── input validation ────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_empty_avatar_raises_input_error() {
        let (_, architect) = architect_with(StubGenerator::returning("ignored"));
        let result = architect
            .generate_complete_system("s", &[], &json!({}), &context())
            .await;
        match result {
            Err(AppError::Validation(message)) => assert!(message.contains("avatar")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_segment_raises_input_error() {
        let (_, architect) = architect_with(StubGenerator::returning("ignored"));
        let result = architect
            .generate_complete_system("s", &drivers(), &avatar(), &AnalysisContext::default())
            .await;
        match result {
            Err(AppError::Validation(message)) => assert!(message.contains("Segmento")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_drivers_degrade_to_basic_set_not_error() {
        let (_, architect) = architect_with(StubGenerator::returning(&valid_ai_response()));
        let bundle = architect
            .generate_complete_system("s", &[], &avatar(), &context())
            .await
            .unwrap();
        assert_eq!(
            bundle.drivers_used,
            vec!["Diagnóstico Brutal", "Relógio Psicológico", "Método vs Sorte"]
        );
    }

    // ── happy path ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_valid_generation_yields_valid_bundle() {
        let (_, architect) = architect_with(StubGenerator::returning(&valid_ai_response()));
        let bundle = architect
            .generate_complete_system("s", &drivers(), &avatar(), &context())
            .await
            .unwrap();

        assert_eq!(bundle.validation_status, ValidationStatus::Valid);
        assert!(!bundle.fallback_mode);
        assert!(validate_script(&bundle.script, &MASSIVE_SCRIPT_SECTIONS).is_empty());
        assert_eq!(bundle.drivers_used, vec!["Diagnóstico Brutal"]);
    }

    #[tokio::test]
    async fn test_every_stage_is_persisted_in_order() {
        let (store, architect) = architect_with(StubGenerator::returning(&valid_ai_response()));
        architect
            .generate_complete_system("sess", &drivers(), &avatar(), &context())
            .await
            .unwrap();

        let stages = store.stages.lock().unwrap();
        let names: Vec<&str> = stages.iter().map(|(_, stage, _)| stage.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "pre_pitch_entrada",
                "drivers_selecionados",
                "orquestracao_emocional",
                "roteiro_completo",
                "pre_pitch_final"
            ]
        );
        assert!(stages.iter().all(|(session, _, _)| session == "sess"));
    }

    // ── degraded paths ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_malformed_response_falls_back_to_basic_script() {
        let (_, architect) =
            architect_with(StubGenerator::returning("this is not json at all {{{"));
        let bundle = architect
            .generate_complete_system("s", &drivers(), &avatar(), &context())
            .await
            .unwrap();

        assert_eq!(bundle.validation_status, ValidationStatus::FallbackValid);
        assert!(validate_script(&bundle.script, &BASIC_SCRIPT_SECTIONS).is_empty());
        for section in BASIC_SCRIPT_SECTIONS {
            let body = &bundle.script.get(section).unwrap().body;
            assert!(body.chars().count() >= 50, "{section} too short");
        }
        // The orchestration stage succeeded and is kept as-is
        assert!(!bundle.orchestration.sequence.is_empty());
    }

    #[tokio::test]
    async fn test_short_sections_fail_validation_and_fall_back() {
        let mut sections = serde_json::Map::new();
        for name in MASSIVE_SCRIPT_SECTIONS {
            sections.insert(name.to_string(), json!({ "script": "curto" }));
        }
        let response = Value::Object(sections).to_string();
        let (_, architect) = architect_with(StubGenerator::returning(&response));

        let bundle = architect
            .generate_complete_system("s", &drivers(), &avatar(), &context())
            .await
            .unwrap();
        assert_eq!(bundle.validation_status, ValidationStatus::FallbackValid);
    }

    #[tokio::test]
    async fn test_network_error_is_recorded_and_not_propagated() {
        let (store, architect) = architect_with(StubGenerator::failing(|| {
            GenerationError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            }
        }));

        let bundle = architect
            .generate_complete_system("s", &drivers(), &avatar(), &context())
            .await
            .unwrap();

        assert_eq!(bundle.validation_status, ValidationStatus::FallbackValid);
        let errors = store.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].1, "pre_pitch_roteiro");
        assert_eq!(errors[0].2["contexto"]["segmento"], "fitness");
    }

    #[tokio::test]
    async fn test_empty_response_falls_back() {
        let (_, architect) = architect_with(StubGenerator::returning("   "));
        let bundle = architect
            .generate_complete_system("s", &drivers(), &avatar(), &context())
            .await
            .unwrap();
        assert_eq!(bundle.validation_status, ValidationStatus::FallbackValid);
    }

    #[tokio::test]
    async fn test_unmappable_drivers_use_basic_orchestration() {
        // Selected via backfill but mapping to no phase at all
        let input = vec![Driver::named("Gatilho Completamente Neutro")];
        let (_, architect) = architect_with(StubGenerator::returning(&valid_ai_response()));
        let bundle = architect
            .generate_complete_system("s", &input, &avatar(), &context())
            .await
            .unwrap();

        let phases: Vec<_> = bundle
            .orchestration
            .sequence
            .iter()
            .map(|p| p.phase)
            .collect();
        assert_eq!(phases.len(), 3, "basic orchestration has three phases");
    }

    #[tokio::test]
    async fn test_avatar_must_be_object_or_null_check() {
        assert!(avatar_is_absent(&Value::Null));
        assert!(avatar_is_absent(&json!({})));
        assert!(!avatar_is_absent(&json!({"x": 1})));
        assert!(!avatar_is_absent(&json!("texto livre")));
    }
}
