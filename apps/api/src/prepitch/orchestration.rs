//! Orchestration Builder — maps selected drivers onto the fixed phase
//! sequence and derives the escalation/critical-point/transition summaries.
//!
//! Phases with no assigned driver are omitted, never synthesized empty.
//! An all-empty sequence is the caller's cue to substitute the canned basic
//! orchestration.

use crate::prepitch::models::{
    CriticalPoint, Driver, EmotionalEscalation, IntensityPoint, Orchestration, OrchestratedPhase,
    PhaseTransition,
};
use crate::prepitch::phases::{bridge_between, Intensity, Phase};

const TRANSITION_TIMING: &str = "15-30 segundos";
const TRANSITION_TECHNIQUE: &str = "Ponte emocional suave";

/// Builds the emotional orchestration for the selected drivers. Each driver
/// lands in at most one phase (first canonical phase whose mapping keywords
/// hit); drivers matching nothing are dropped.
pub fn build_orchestration(drivers: &[Driver]) -> Orchestration {
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); Phase::ALL.len()];

    for driver in drivers {
        if let Some(phase) = phase_for_driver(driver) {
            buckets[phase as usize].push(driver.name.clone());
        }
    }

    let sequence: Vec<OrchestratedPhase> = Phase::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, names)| !names.is_empty())
        .map(|(phase, names)| orchestrated_phase(phase, names))
        .collect();

    from_sequence(sequence)
}

/// Assembles an [`Orchestration`] from an already-ordered phase sequence,
/// deriving every summary. Shared with the fallback synthesizer so canned
/// sequences carry the same summaries as built ones.
pub(crate) fn from_sequence(sequence: Vec<OrchestratedPhase>) -> Orchestration {
    let escalation = build_escalation(&sequence);
    let critical_points = identify_critical_points(&sequence);
    let transitions = build_transitions(&sequence);
    Orchestration {
        sequence,
        escalation,
        critical_points,
        transitions,
    }
}

/// An orchestrated phase with its static profile, assigned drivers, and
/// techniques filled in.
pub(crate) fn orchestrated_phase(phase: Phase, drivers: Vec<String>) -> OrchestratedPhase {
    let profile = phase.profile();
    OrchestratedPhase {
        phase,
        objective: profile.objective.to_string(),
        duration: profile.duration.to_string(),
        intensity: profile.intensity,
        drivers,
        expected_outcome: profile.expected_outcome.to_string(),
        techniques: phase.techniques().iter().map(|t| t.to_string()).collect(),
    }
}

/// First canonical phase whose mapping keywords match the driver name.
fn phase_for_driver(driver: &Driver) -> Option<Phase> {
    let name = driver.name.to_lowercase();
    Phase::ALL.into_iter().find(|phase| {
        phase
            .mapping_keywords()
            .iter()
            .any(|keyword| name.contains(keyword))
    })
}

fn build_escalation(sequence: &[OrchestratedPhase]) -> EmotionalEscalation {
    EmotionalEscalation {
        curve: sequence
            .iter()
            .map(|p| IntensityPoint {
                phase: p.phase,
                intensity: p.intensity,
            })
            .collect(),
        peaks: sequence
            .iter()
            .filter(|p| matches!(p.intensity, Intensity::Maximum | Intensity::Definitive))
            .map(|p| p.phase)
            .collect(),
        relief: sequence
            .iter()
            .filter(|p| p.intensity == Intensity::Hopeful)
            .map(|p| p.phase)
            .collect(),
    }
}

fn identify_critical_points(sequence: &[OrchestratedPhase]) -> Vec<CriticalPoint> {
    sequence
        .iter()
        .filter(|p| matches!(p.intensity, Intensity::Maximum | Intensity::Definitive))
        .map(|p| CriticalPoint {
            phase: p.phase,
            moment: format!("Durante {}", p.objective.to_lowercase()),
            risk: "Perda de audiência se muito intenso".to_string(),
            opportunity: "Máximo impacto emocional".to_string(),
            management: "Monitorar reações e ajustar intensidade".to_string(),
        })
        .collect()
}

fn build_transitions(sequence: &[OrchestratedPhase]) -> Vec<PhaseTransition> {
    sequence
        .windows(2)
        .map(|pair| PhaseTransition {
            from: pair[0].phase,
            to: pair[1].phase,
            script: bridge_between(pair[0].phase, pair[1].phase),
            timing: TRANSITION_TIMING.to_string(),
            technique: TRANSITION_TECHNIQUE.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drivers(names: &[&str]) -> Vec<Driver> {
        names.iter().map(|n| Driver::named(n)).collect()
    }

    #[test]
    fn test_phases_appear_in_canonical_order() {
        // Deliberately out of canonical order on input
        let input = drivers(&["Método vs Sorte", "Diagnóstico Brutal", "Ambição Expandida"]);
        let orchestration = build_orchestration(&input);
        let phases: Vec<Phase> = orchestration.sequence.iter().map(|p| p.phase).collect();
        assert_eq!(phases, vec![Phase::Break, Phase::Glimpse, Phase::Necessity]);
    }

    #[test]
    fn test_no_phase_with_empty_driver_list() {
        let input = drivers(&["Diagnóstico Brutal"]);
        let orchestration = build_orchestration(&input);
        assert!(orchestration.sequence.iter().all(|p| !p.drivers.is_empty()));
        assert_eq!(orchestration.sequence.len(), 1);
    }

    #[test]
    fn test_unmatched_drivers_are_dropped() {
        let input = drivers(&["Gatilho Sem Fase Nenhuma"]);
        let orchestration = build_orchestration(&input);
        assert!(orchestration.sequence.is_empty());
    }

    #[test]
    fn test_driver_maps_to_first_matching_phase_only() {
        // "brutal" (quebra) and "custo" (exposicao) both match; quebra wins.
        let input = drivers(&["Custo Brutal"]);
        let orchestration = build_orchestration(&input);
        assert_eq!(orchestration.sequence.len(), 1);
        assert_eq!(orchestration.sequence[0].phase, Phase::Break);
    }

    #[test]
    fn test_phase_carries_static_profile() {
        let input = drivers(&["Diagnóstico Brutal"]);
        let orchestration = build_orchestration(&input);
        let quebra = &orchestration.sequence[0];
        assert_eq!(quebra.objective, "Destruir a ilusão confortável");
        assert_eq!(quebra.duration, "3-5 minutos");
        assert_eq!(quebra.intensity, Intensity::High);
        assert!(!quebra.techniques.is_empty());
    }

    #[test]
    fn test_escalation_peaks_and_relief() {
        let input = drivers(&[
            "Relógio Psicológico", // indignacao — Máxima
            "Ambição Expandida",   // vislumbre — Esperançosa
            "Método vs Sorte",     // necessidade — Definitiva
        ]);
        let orchestration = build_orchestration(&input);
        assert_eq!(
            orchestration.escalation.peaks,
            vec![Phase::Indignation, Phase::Necessity]
        );
        assert_eq!(orchestration.escalation.relief, vec![Phase::Glimpse]);
        assert_eq!(orchestration.escalation.curve.len(), 3);
    }

    #[test]
    fn test_critical_points_only_for_peak_intensities() {
        let input = drivers(&["Diagnóstico Brutal", "Método vs Sorte"]);
        let orchestration = build_orchestration(&input);
        // quebra is Alta (no critical point); necessidade is Definitiva
        assert_eq!(orchestration.critical_points.len(), 1);
        assert_eq!(orchestration.critical_points[0].phase, Phase::Necessity);
        assert!(orchestration.critical_points[0]
            .moment
            .starts_with("Durante "));
    }

    #[test]
    fn test_one_transition_per_adjacent_pair() {
        let input = drivers(&[
            "Diagnóstico Brutal",
            "Custo Invisível",
            "Relógio Psicológico",
        ]);
        let orchestration = build_orchestration(&input);
        assert_eq!(orchestration.sequence.len(), 3);
        assert_eq!(orchestration.transitions.len(), 2);
        assert_eq!(orchestration.transitions[0].from, Phase::Break);
        assert_eq!(orchestration.transitions[0].to, Phase::Exposure);
    }

    #[test]
    fn test_transition_uses_bridge_table_when_mapped() {
        let input = drivers(&["Diagnóstico Brutal", "Custo Invisível"]);
        let orchestration = build_orchestration(&input);
        assert!(orchestration.transitions[0].script.contains("dói ouvir"));
    }

    #[test]
    fn test_transition_falls_back_to_template_for_unmapped_pair() {
        // quebra → necessidade skips every mapped pair
        let input = drivers(&["Diagnóstico Brutal", "Método vs Sorte"]);
        let orchestration = build_orchestration(&input);
        assert_eq!(
            orchestration.transitions[0].script,
            "Transição de quebra para necessidade"
        );
    }

    #[test]
    fn test_single_phase_has_no_transitions() {
        let input = drivers(&["Diagnóstico Brutal"]);
        let orchestration = build_orchestration(&input);
        assert!(orchestration.transitions.is_empty());
    }
}
