//! Fallback Synthesizer — statically authored substitutes for every stage
//! that can fail.
//!
//! Four tiers, one per stage: drivers, orchestration, script, and the full
//! bundle (top-level catch-all, which discards all prior stage outputs).
//! Everything here is a pure function of the request context; the only
//! non-determinism in the whole module is the bundle timestamp.

use chrono::Utc;
use serde_json::{json, Value};

use crate::prepitch::models::{
    AnalysisContext, Driver, Orchestration, OrchestratedPhase, ResultBundle, Script,
    ScriptSection, ValidationStatus,
};
use crate::prepitch::orchestration::from_sequence;
use crate::prepitch::phases::{Intensity, Phase};
use crate::prepitch::postprocess;

/// Canned driver set used when selection comes back empty.
pub fn basic_drivers() -> Vec<Driver> {
    vec![
        Driver::named("Diagnóstico Brutal"),
        Driver::named("Relógio Psicológico"),
        Driver::named("Método vs Sorte"),
    ]
}

/// Canned three-phase orchestration (quebra, vislumbre, necessidade) used
/// when no driver mapped to any phase. Runs through the same summary
/// builders as a real orchestration.
pub fn basic_orchestration() -> Orchestration {
    from_sequence(vec![
        OrchestratedPhase {
            phase: Phase::Break,
            objective: "Quebrar padrão e despertar consciência".to_string(),
            duration: "3-5 minutos".to_string(),
            intensity: Intensity::High,
            drivers: vec!["Diagnóstico Brutal".to_string()],
            expected_outcome: "Desconforto produtivo".to_string(),
            techniques: Phase::Break.techniques().iter().map(|t| t.to_string()).collect(),
        },
        OrchestratedPhase {
            phase: Phase::Glimpse,
            objective: "Mostrar possibilidades".to_string(),
            duration: "5-7 minutos".to_string(),
            intensity: Intensity::Hopeful,
            drivers: vec!["Método vs Sorte".to_string()],
            expected_outcome: "Desejo de mudança".to_string(),
            techniques: Phase::Glimpse.techniques().iter().map(|t| t.to_string()).collect(),
        },
        OrchestratedPhase {
            phase: Phase::Necessity,
            objective: "Criar urgência".to_string(),
            duration: "3-4 minutos".to_string(),
            intensity: Intensity::Definitive,
            drivers: vec!["Relógio Psicológico".to_string()],
            expected_outcome: "Urgência de ação".to_string(),
            techniques: Phase::Necessity.techniques().iter().map(|t| t.to_string()).collect(),
        },
    ])
}

/// Canned three-section script (abertura, desenvolvimento, fechamento) used
/// when the generated script is discarded. Every body clears the validator's
/// minimum with room to spare.
pub fn basic_script(context: &AnalysisContext) -> Script {
    let segment = context.segment_or_default();
    let mut script = Script::default();

    script.insert(
        "abertura",
        ScriptSection {
            timing: Some("3-5 minutos".to_string()),
            objective: Some("Quebrar padrão e despertar consciência".to_string()),
            activated_drivers: vec!["Diagnóstico Brutal".to_string()],
            body: format!(
                "Deixa eu te fazer uma pergunta sobre {segment}... Há quanto tempo você \
                 está no mesmo nível? A verdade é que a maioria dos profissionais trabalha \
                 muito mas não sai do lugar. Sabe quando você fala 'ah, está indo', mas no \
                 fundo sabe que está estagnado? Quando olha pros seus números e sente \
                 aquele aperto no estômago? Essa é a ferida que você está tentando ignorar."
            ),
            key_phrases: vec![
                format!("A verdade sobre {segment} que ninguém te conta"),
                "Isso vai doer, mas precisa ser dito".to_string(),
            ],
            transition: Some("E sabe por que isso acontece?".to_string()),
            extra: Default::default(),
        },
    );

    script.insert(
        "desenvolvimento",
        ScriptSection {
            timing: Some("8-12 minutos".to_string()),
            objective: Some("Amplificar dor e mostrar possibilidades".to_string()),
            activated_drivers: vec!["Relógio Psicológico".to_string()],
            body: format!(
                "Cada dia que passa sem otimizar {segment} é dinheiro saindo do seu bolso. \
                 Enquanto você está 'pensando', seus concorrentes estão agindo. Aquele que \
                 começou depois de você já está na sua frente — não por talento, mas porque \
                 parou de esperar condições perfeitas e começou a executar. Você pode \
                 recuperar dinheiro, mas tempo perdido não volta. Mas existe um caminho \
                 diferente, e ele não depende de sorte."
            ),
            key_phrases: Vec::new(),
            transition: None,
            extra: [
                (
                    "momentos_criticos".to_string(),
                    json!([
                        "Cálculo da perda financeira por inação",
                        "Comparação com concorrentes que agem"
                    ]),
                ),
                (
                    "escalada_emocional".to_string(),
                    json!("Aumentar pressão gradualmente, depois mostrar esperança"),
                ),
            ]
            .into_iter()
            .collect(),
        },
    );

    script.insert(
        "fechamento",
        ScriptSection {
            timing: Some("2-3 minutos".to_string()),
            objective: Some("Transição para solução".to_string()),
            activated_drivers: vec!["Método vs Sorte".to_string()],
            body: format!(
                "Agora você tem duas escolhas em {segment}: continuar como está ou seguir \
                 um método comprovado. Sozinho você até chega lá — em anos, errando muito, \
                 pagando caro por cada tentativa. Com orientação, o caminho encurta. Eu vou \
                 te mostrar exatamente como sair dessa situação..."
            ),
            key_phrases: Vec::new(),
            transition: None,
            extra: [
                (
                    "ponte_oferta".to_string(),
                    json!("Mas antes, preciso saber se você está realmente pronto para mudar..."),
                ),
                (
                    "estado_mental_ideal".to_string(),
                    json!("Ansioso pela solução, pronto para agir"),
                ),
            ]
            .into_iter()
            .collect(),
        },
    );

    script
}

/// Complete canned bundle — the top-level catch-all. Discards every prior
/// stage output and returns a self-consistent `FALLBACK_VALID` result.
pub fn fallback_bundle(context: &AnalysisContext) -> ResultBundle {
    let orchestration = basic_orchestration();
    let script = basic_script(context);
    let drivers_used = basic_drivers().into_iter().map(|d| d.name).collect();

    ResultBundle {
        total_duration: postprocess::total_duration(&orchestration),
        max_intensity: postprocess::max_intensity(&orchestration),
        format_variations: postprocess::format_variations(),
        success_metrics: postprocess::success_metrics(),
        drivers_used,
        orchestration,
        script,
        validation_status: ValidationStatus::FallbackValid,
        generation_timestamp: Utc::now(),
        fallback_mode: true,
    }
}

/// Error-record context payload shared by the fallback paths.
pub(crate) fn error_context(context: &AnalysisContext) -> Value {
    json!({ "segmento": context.segment_or_default() })
}
