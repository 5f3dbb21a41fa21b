//! Data model for the pre-pitch pipeline.
//!
//! Rust types carry English names; the wire format keeps the Portuguese keys
//! the downstream consumers already speak (`nome`, `segmento`, `fase`,
//! `roteiro_completo`, …) via serde renames. Every value here is built once
//! per request and never mutated afterwards.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prepitch::phases::{Intensity, Phase};

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// A named psychological trigger supplied by the caller. Names are unique
/// within a request; `tags` are optional category labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categorias", default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Driver {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tags: Vec::new(),
        }
    }
}

/// Campaign context for one pipeline run. `segment` is the only required
/// field; it is validated at the entry point, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisContext {
    #[serde(rename = "segmento", default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(rename = "produto", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl AnalysisContext {
    pub fn segment_or_default(&self) -> &str {
        self.segment.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or("negócios")
    }

    pub fn product_or_default(&self) -> &str {
        self.product.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or("solução")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestration
// ────────────────────────────────────────────────────────────────────────────

/// One phase of the emotional sequence with its static profile, the drivers
/// assigned to it, and the techniques to deliver it with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratedPhase {
    #[serde(rename = "fase")]
    pub phase: Phase,
    #[serde(rename = "objetivo")]
    pub objective: String,
    #[serde(rename = "duracao")]
    pub duration: String,
    #[serde(rename = "intensidade")]
    pub intensity: Intensity,
    #[serde(rename = "drivers_utilizados")]
    pub drivers: Vec<String>,
    #[serde(rename = "resultado_esperado")]
    pub expected_outcome: String,
    #[serde(rename = "tecnicas")]
    pub techniques: Vec<String>,
}

/// Phase-by-phase intensity curve plus its peaks and relief moments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalEscalation {
    #[serde(rename = "curva_intensidade")]
    pub curve: Vec<IntensityPoint>,
    #[serde(rename = "pontos_pico")]
    pub peaks: Vec<Phase>,
    #[serde(rename = "momentos_alivio")]
    pub relief: Vec<Phase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityPoint {
    #[serde(rename = "fase")]
    pub phase: Phase,
    #[serde(rename = "intensidade")]
    pub intensity: Intensity,
}

/// A moment where the sequence risks losing the audience if pushed too hard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalPoint {
    #[serde(rename = "fase")]
    pub phase: Phase,
    #[serde(rename = "momento")]
    pub moment: String,
    #[serde(rename = "risco")]
    pub risk: String,
    #[serde(rename = "oportunidade")]
    pub opportunity: String,
    #[serde(rename = "gestao")]
    pub management: String,
}

/// Spoken bridge between two adjacent phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTransition {
    #[serde(rename = "de")]
    pub from: Phase,
    #[serde(rename = "para")]
    pub to: Phase,
    #[serde(rename = "script")]
    pub script: String,
    #[serde(rename = "tempo")]
    pub timing: String,
    #[serde(rename = "tecnica")]
    pub technique: String,
}

/// The assembled emotional orchestration. Immutable once built; all summary
/// fields are derived from `sequence` at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orchestration {
    #[serde(rename = "sequencia_psicologica")]
    pub sequence: Vec<OrchestratedPhase>,
    #[serde(rename = "escalada_emocional")]
    pub escalation: EmotionalEscalation,
    #[serde(rename = "pontos_criticos")]
    pub critical_points: Vec<CriticalPoint>,
    #[serde(rename = "transicoes")]
    pub transitions: Vec<PhaseTransition>,
}

// ────────────────────────────────────────────────────────────────────────────
// Script
// ────────────────────────────────────────────────────────────────────────────

/// One named section of a script. The generator is free to attach
/// section-specific auxiliary keys (`calculo_perda`, `ponte_oferta`, …);
/// those ride along in `extra` untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptSection {
    #[serde(rename = "tempo", default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
    #[serde(rename = "objetivo", default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(
        rename = "drivers_ativados",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub activated_drivers: Vec<String>,
    #[serde(rename = "script", default)]
    pub body: String,
    #[serde(
        rename = "frases_chave",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub key_phrases: Vec<String>,
    #[serde(rename = "transicao", default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A script: named sections mapped to their content. Which section names
/// must be present is the caller's contract (see `validation`), not the
/// map's. BTreeMap keeps serialization deterministic so identical inputs
/// produce byte-identical output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script(pub BTreeMap<String, ScriptSection>);

impl Script {
    pub fn get(&self, section: &str) -> Option<&ScriptSection> {
        self.0.get(section)
    }

    pub fn insert(&mut self, section: &str, content: ScriptSection) {
        self.0.insert(section.to_string(), content);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Post-processing outputs
// ────────────────────────────────────────────────────────────────────────────

/// Channel-specific timing and adaptation notes. Static content — no
/// per-request substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatVariation {
    #[serde(rename = "duracao_total")]
    pub total_duration: String,
    #[serde(rename = "adaptacoes")]
    pub adaptations: Vec<String>,
    #[serde(rename = "timing")]
    pub timing: String,
}

/// One variation record per delivery channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatVariations {
    pub webinar: FormatVariation,
    #[serde(rename = "evento_presencial")]
    pub live_event: FormatVariation,
    #[serde(rename = "cpl_3_aulas")]
    pub course_sessions: FormatVariation,
    #[serde(rename = "lives_aquecimento")]
    pub warmup_lives: FormatVariation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionMetrics {
    #[serde(rename = "engajamento")]
    pub engagement: String,
    #[serde(rename = "emocional")]
    pub emotional: String,
    #[serde(rename = "comportamental")]
    pub behavioral: String,
    #[serde(rename = "conversao")]
    pub conversion: String,
}

/// Observable indicators for judging whether the pre-pitch landed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessMetrics {
    #[serde(rename = "indicadores_durante")]
    pub during: Vec<String>,
    #[serde(rename = "indicadores_apos")]
    pub after: Vec<String>,
    #[serde(rename = "sinais_resistencia")]
    pub resistance: Vec<String>,
    #[serde(rename = "metricas_conversao")]
    pub conversion: ConversionMetrics,
}

// ────────────────────────────────────────────────────────────────────────────
// Result bundle
// ────────────────────────────────────────────────────────────────────────────

/// Provenance of a bundle: fully AI-sourced or fully canned. Never a silent
/// mix — a bundle whose script fell back is tagged `FallbackValid` even when
/// the orchestration succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    #[serde(rename = "VALID")]
    Valid,
    #[serde(rename = "FALLBACK_VALID")]
    FallbackValid,
}

/// Final output of one pipeline run. Written once to the audit store,
/// returned to the caller, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultBundle {
    #[serde(rename = "orquestracao_emocional")]
    pub orchestration: Orchestration,
    #[serde(rename = "roteiro_completo")]
    pub script: Script,
    #[serde(rename = "variacoes_formato")]
    pub format_variations: FormatVariations,
    #[serde(rename = "metricas_sucesso")]
    pub success_metrics: SuccessMetrics,
    #[serde(rename = "drivers_utilizados")]
    pub drivers_used: Vec<String>,
    #[serde(rename = "duracao_total")]
    pub total_duration: String,
    #[serde(rename = "intensidade_maxima")]
    pub max_intensity: Intensity,
    pub validation_status: ValidationStatus,
    pub generation_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub fallback_mode: bool,
}
