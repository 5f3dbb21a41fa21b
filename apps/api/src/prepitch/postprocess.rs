//! Post-processing — summary metrics over a finished orchestration plus the
//! static per-channel format variations and success metrics.

use crate::prepitch::models::{
    ConversionMetrics, FormatVariation, FormatVariations, Orchestration, SuccessMetrics,
};
use crate::prepitch::phases::Intensity;

/// Sums the numeric bounds of every phase duration into a
/// `"<min>-<max> minutos"` range. A duration with a single number ("10
/// minutos") contributes it to both bounds; durations with no number
/// contribute nothing.
pub fn total_duration(orchestration: &Orchestration) -> String {
    let mut total_min = 0u32;
    let mut total_max = 0u32;

    for phase in &orchestration.sequence {
        let numbers = extract_numbers(&phase.duration);
        match numbers.as_slice() {
            [] => {}
            [only] => {
                total_min += only;
                total_max += only;
            }
            [low, high, ..] => {
                total_min += low;
                total_max += high;
            }
        }
    }

    format!("{total_min}-{total_max} minutos")
}

/// Highest intensity present, by fixed rank: Máxima > Alta > Crescente,
/// defaulting to Média. Esperançosa and Definitiva do not participate in
/// the ranking.
pub fn max_intensity(orchestration: &Orchestration) -> Intensity {
    let present =
        |intensity: Intensity| orchestration.sequence.iter().any(|p| p.intensity == intensity);

    if present(Intensity::Maximum) {
        Intensity::Maximum
    } else if present(Intensity::High) {
        Intensity::High
    } else if present(Intensity::Rising) {
        Intensity::Rising
    } else {
        Intensity::Medium
    }
}

/// Decimal runs in the text, in order of appearance.
fn extract_numbers(text: &str) -> Vec<u32> {
    let mut numbers = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            numbers.extend(current.parse::<u32>().ok());
            current.clear();
        }
    }
    if !current.is_empty() {
        numbers.extend(current.parse::<u32>().ok());
    }

    numbers
}

/// Static per-channel adaptation records. No context substitution.
pub fn format_variations() -> FormatVariations {
    FormatVariations {
        webinar: FormatVariation {
            total_duration: "15-20 minutos".to_string(),
            adaptations: vec![
                "Usar chat para engajamento".to_string(),
                "Pausas para perguntas retóricas".to_string(),
                "Slides de apoio visual".to_string(),
            ],
            timing: "Últimos 20 minutos antes da oferta".to_string(),
        },
        live_event: FormatVariation {
            total_duration: "25-35 minutos".to_string(),
            adaptations: vec![
                "Interação direta com audiência".to_string(),
                "Movimentação no palco".to_string(),
                "Provas visuais físicas".to_string(),
            ],
            timing: "Distribuído ao longo do evento".to_string(),
        },
        course_sessions: FormatVariation {
            total_duration: "10-15 minutos".to_string(),
            adaptations: vec![
                "Construção gradual ao longo das aulas".to_string(),
                "Callbacks entre aulas".to_string(),
                "Intensificação na aula 3".to_string(),
            ],
            timing: "Final da aula 3".to_string(),
        },
        warmup_lives: FormatVariation {
            total_duration: "5-8 minutos por live".to_string(),
            adaptations: vec![
                "Sementes em cada live".to_string(),
                "Preparação subliminar".to_string(),
                "Crescimento de intensidade".to_string(),
            ],
            timing: "Distribuído nas lives".to_string(),
        },
    }
}

/// Static success-indicator lists for the delivery team.
pub fn success_metrics() -> SuccessMetrics {
    SuccessMetrics {
        during: vec![
            "Silêncio absoluto durante ativação".to_string(),
            "Comentários emocionais no chat".to_string(),
            "Perguntas sobre quando abre inscrições".to_string(),
            "Concordância física (acenar cabeça)".to_string(),
        ],
        after: vec![
            "Ansiedade visível para a oferta".to_string(),
            "Perguntas sobre preço/formato".to_string(),
            "Comentários 'já quero comprar'".to_string(),
            "Objeções minimizadas".to_string(),
        ],
        resistance: vec![
            "Questionamentos técnicos excessivos".to_string(),
            "Mudança de assunto".to_string(),
            "Objeções imediatas".to_string(),
            "Linguagem corporal fechada".to_string(),
        ],
        conversion: ConversionMetrics {
            engagement: "Tempo de atenção por fase".to_string(),
            emotional: "Reações emocionais geradas".to_string(),
            behavioral: "Ações tomadas após ativação".to_string(),
            conversion: "Taxa de conversão pós-pré-pitch".to_string(),
        },
    }
}
