//! Driver Selector — picks a bounded, prioritized subset of the caller's
//! drivers for the pre-pitch.
//!
//! Priority order: phase-keyword buckets first (up to 2 per bucket), then
//! critical-keyword matches (first 5 considered), then raw input order as
//! backfill. Deduplicated by name preserving first-seen order, capped at 10.

use std::collections::HashSet;

use crate::prepitch::models::Driver;
use crate::prepitch::phases::{CRITICAL_KEYWORDS, SELECTION_KEYWORD_SETS};

/// Hard cap on selected drivers.
const MAX_SELECTED: usize = 10;
/// At most this many drivers per phase bucket.
const MAX_PER_PHASE: usize = 2;
/// At most this many critical-keyword matches are considered.
const MAX_CRITICAL: usize = 5;
/// Backfill kicks in only below this count.
const BACKFILL_THRESHOLD: usize = 8;
/// Backfill draws from the first N input drivers only.
const BACKFILL_POOL: usize = 12;

/// Selects up to [`MAX_SELECTED`] drivers for the pre-pitch. An empty result
/// (no bucket, critical, or backfill match — only possible on empty input)
/// is the caller's cue to substitute the canned basic set.
pub fn select_optimal_drivers(drivers: &[Driver]) -> Vec<Driver> {
    let mut selected: Vec<Driver> = Vec::new();

    // Phase buckets: up to 2 matches each, in bucket order.
    for (_, keywords) in SELECTION_KEYWORD_SETS {
        let matches = drivers
            .iter()
            .filter(|d| matches_any(d, keywords))
            .take(MAX_PER_PHASE);
        selected.extend(matches.cloned());
    }

    // Critical keywords: the first 5 matches are considered, each added only
    // if a same-named driver is not already in.
    let critical = drivers
        .iter()
        .filter(|d| matches_any(d, CRITICAL_KEYWORDS))
        .take(MAX_CRITICAL);
    for driver in critical {
        if !contains_name(&selected, &driver.name) {
            selected.push(driver.clone());
        }
    }

    // Backfill from the head of the input list, in original order.
    if selected.len() < BACKFILL_THRESHOLD {
        for driver in drivers.iter().take(BACKFILL_POOL) {
            if selected.len() >= MAX_SELECTED {
                break;
            }
            if !contains_name(&selected, &driver.name) {
                selected.push(driver.clone());
            }
        }
    }

    // Phase buckets can claim the same driver twice; dedupe by name keeping
    // first-seen order, then cap.
    let mut seen = HashSet::new();
    selected.retain(|d| seen.insert(d.name.clone()));
    selected.truncate(MAX_SELECTED);
    selected
}

/// Case-insensitive substring match of any keyword against the driver's
/// name or tags.
fn matches_any(driver: &Driver, keywords: &[&str]) -> bool {
    let name = driver.name.to_lowercase();
    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        name.contains(&keyword)
            || driver
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&keyword))
    })
}

fn contains_name(drivers: &[Driver], name: &str) -> bool {
    drivers.iter().any(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drivers(names: &[&str]) -> Vec<Driver> {
        names.iter().map(|n| Driver::named(n)).collect()
    }

    #[test]
    fn test_empty_input_selects_nothing() {
        assert!(select_optimal_drivers(&[]).is_empty());
    }

    #[test]
    fn test_output_never_exceeds_ten() {
        let input = drivers(&[
            "Diagnóstico Brutal",
            "Ferida Exposta",
            "Custo Invisível",
            "Ambiente Vampiro",
            "Relógio Psicológico",
            "Inveja Produtiva",
            "Ambição Expandida",
            "Troféu Secreto",
            "Identidade Aprisionada",
            "Oportunidade Oculta",
            "Método vs Sorte",
            "Mentor Salvador",
            "Decisão Binária",
            "Coragem Necessária",
        ]);
        let selected = select_optimal_drivers(&input);
        assert!(selected.len() <= 10, "got {}", selected.len());
    }

    #[test]
    fn test_no_duplicate_names_in_output() {
        // "Diagnóstico Brutal" matches the quebra bucket AND the critical list
        let input = drivers(&["Diagnóstico Brutal", "Gatilho Qualquer", "Outro Gatilho"]);
        let selected = select_optimal_drivers(&input);
        let mut names: Vec<&str> = selected.iter().map(|d| d.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), selected.len());
    }

    #[test]
    fn test_phase_bucket_capped_at_two() {
        let input = drivers(&[
            "Diagnóstico Brutal A",
            "Diagnóstico Brutal B",
            "Diagnóstico Brutal C",
        ]);
        let selected = select_optimal_drivers(&input);
        // Bucket keeps A and B; C re-enters via the critical-keyword pass,
        // so all three survive, with the bucket pair first.
        assert_eq!(selected[0].name, "Diagnóstico Brutal A");
        assert_eq!(selected[1].name, "Diagnóstico Brutal B");
    }

    #[test]
    fn test_keyword_matched_drivers_rank_before_raw_order() {
        let input = drivers(&["Gatilho Neutro", "Método vs Sorte"]);
        let selected = select_optimal_drivers(&input);
        assert_eq!(selected[0].name, "Método vs Sorte");
        assert_eq!(selected[1].name, "Gatilho Neutro");
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let input = drivers(&["o RELÓGIO psicológico do mercado"]);
        let selected = select_optimal_drivers(&input);
        assert_eq!(selected[0].name, "o RELÓGIO psicológico do mercado");
    }

    #[test]
    fn test_tags_participate_in_matching() {
        let mut driver = Driver::named("Gatilho Sem Nome Óbvio");
        driver.tags = vec!["urgência".to_string()];
        let selected = select_optimal_drivers(&[driver]);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_backfill_preserves_original_order() {
        let input = drivers(&["Neutro 1", "Neutro 2", "Neutro 3"]);
        let selected = select_optimal_drivers(&input);
        let names: Vec<&str> = selected.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Neutro 1", "Neutro 2", "Neutro 3"]);
    }

    #[test]
    fn test_backfill_draws_only_from_first_twelve() {
        let names: Vec<String> = (1..=15).map(|i| format!("Neutro {i}")).collect();
        let input: Vec<Driver> = names.iter().map(|n| Driver::named(n)).collect();
        let selected = select_optimal_drivers(&input);
        assert_eq!(selected.len(), 10);
        assert!(!selected.iter().any(|d| d.name == "Neutro 13"));
    }

    #[test]
    fn test_no_backfill_when_buckets_fill_eight() {
        let input = drivers(&[
            "Diagnóstico Brutal",
            "Ferida Exposta",
            "Custo Invisível",
            "Ambiente Vampiro",
            "Relógio Psicológico",
            "Inveja Produtiva",
            "Ambição Expandida",
            "Troféu Secreto",
            "Gatilho Neutro Fora do Pool",
        ]);
        let selected = select_optimal_drivers(&input);
        assert!(selected.len() >= 8);
        assert!(
            !selected.iter().any(|d| d.name == "Gatilho Neutro Fora do Pool"),
            "backfill must not run once eight drivers are selected"
        );
    }
}
