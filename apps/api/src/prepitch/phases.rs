//! Phase taxonomy — the fixed six-stage emotional sequence and every static
//! table keyed by it: per-phase profiles, selection keywords, driver→phase
//! mapping rules, delivery techniques, and hand-written transition bridges.
//!
//! All of this is immutable configuration data. Classification is plain
//! substring lookup against these tables — no dynamic dispatch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One stage of the fixed emotional sequence. Declaration order IS the
/// canonical presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "quebra")]
    Break,
    #[serde(rename = "exposicao")]
    Exposure,
    #[serde(rename = "indignacao")]
    Indignation,
    #[serde(rename = "vislumbre")]
    Glimpse,
    #[serde(rename = "tensao")]
    Tension,
    #[serde(rename = "necessidade")]
    Necessity,
}

/// Emotional intensity label attached to each phase.
/// `Medium` never appears in a profile — it is the rank-lookup default only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Crescente")]
    Rising,
    #[serde(rename = "Máxima")]
    Maximum,
    #[serde(rename = "Esperançosa")]
    Hopeful,
    #[serde(rename = "Definitiva")]
    Definitive,
    #[serde(rename = "Média")]
    Medium,
}

/// Static metadata for a phase: what it is for, how long it runs, how hard
/// it pushes, and what state it should leave the audience in.
#[derive(Debug, Clone, Copy)]
pub struct PhaseProfile {
    pub objective: &'static str,
    pub duration: &'static str,
    pub intensity: Intensity,
    pub expected_outcome: &'static str,
}

impl Phase {
    /// Canonical phase order. Orchestrations emit phases in this order only.
    pub const ALL: [Phase; 6] = [
        Phase::Break,
        Phase::Exposure,
        Phase::Indignation,
        Phase::Glimpse,
        Phase::Tension,
        Phase::Necessity,
    ];

    /// Wire identifier, identical to the serde rename.
    pub fn wire_name(self) -> &'static str {
        match self {
            Phase::Break => "quebra",
            Phase::Exposure => "exposicao",
            Phase::Indignation => "indignacao",
            Phase::Glimpse => "vislumbre",
            Phase::Tension => "tensao",
            Phase::Necessity => "necessidade",
        }
    }

    pub fn profile(self) -> &'static PhaseProfile {
        match self {
            Phase::Break => &PhaseProfile {
                objective: "Destruir a ilusão confortável",
                duration: "3-5 minutos",
                intensity: Intensity::High,
                expected_outcome: "Desconforto produtivo",
            },
            Phase::Exposure => &PhaseProfile {
                objective: "Revelar a ferida real",
                duration: "4-6 minutos",
                intensity: Intensity::Rising,
                expected_outcome: "Consciência da dor",
            },
            Phase::Indignation => &PhaseProfile {
                objective: "Criar revolta produtiva",
                duration: "3-4 minutos",
                intensity: Intensity::Maximum,
                expected_outcome: "Urgência de mudança",
            },
            Phase::Glimpse => &PhaseProfile {
                objective: "Mostrar o possível",
                duration: "5-7 minutos",
                intensity: Intensity::Hopeful,
                expected_outcome: "Desejo amplificado",
            },
            Phase::Tension => &PhaseProfile {
                objective: "Amplificar o gap",
                duration: "2-3 minutos",
                intensity: Intensity::Rising,
                expected_outcome: "Tensão máxima",
            },
            Phase::Necessity => &PhaseProfile {
                objective: "Tornar a mudança inevitável",
                duration: "3-4 minutos",
                intensity: Intensity::Definitive,
                expected_outcome: "Necessidade de solução",
            },
        }
    }

    /// Keywords that assign a driver to this phase when building an
    /// orchestration. A driver maps to the FIRST canonical phase that
    /// matches; unmatched drivers are dropped.
    pub fn mapping_keywords(self) -> &'static [&'static str] {
        match self {
            Phase::Break => &["diagnóstico", "brutal", "ferida"],
            Phase::Exposure => &["custo", "ambiente", "vampiro"],
            Phase::Indignation => &["relógio", "urgência", "inveja"],
            Phase::Glimpse => &["ambição", "troféu", "expandida"],
            Phase::Tension => &["identidade", "oportunidade"],
            Phase::Necessity => &["método", "mentor", "salvador"],
        }
    }

    /// Delivery techniques attached to the phase in the orchestration output.
    pub fn techniques(self) -> &'static [&'static str] {
        match self {
            Phase::Break => &[
                "Confronto direto",
                "Pergunta desconfortável",
                "Estatística chocante",
            ],
            Phase::Exposure => &[
                "Cálculo de perdas",
                "Visualização da dor",
                "Comparação cruel",
            ],
            Phase::Indignation => &[
                "Urgência temporal",
                "Comparação social",
                "Consequências futuras",
            ],
            Phase::Glimpse => &[
                "Visualização do sucesso",
                "Casos de transformação",
                "Possibilidades expandidas",
            ],
            Phase::Tension => &[
                "Gap atual vs ideal",
                "Identidade limitante",
                "Oportunidade única",
            ],
            Phase::Necessity => &["Caminho claro", "Mentor necessário", "Método vs caos"],
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Selection keyword tables (driver selector, §selector)
// ────────────────────────────────────────────────────────────────────────────

/// Per-phase driver-name keywords used by the selector. Seven buckets: the
/// six orchestration phases plus the closing "decisao" bucket, which feeds
/// selection but has no phase of its own in the sequence.
pub const SELECTION_KEYWORD_SETS: [(&str, &[&str]); 7] = [
    (
        "quebra",
        &["Diagnóstico Brutal", "Ferida Exposta", "Realidade Brutal"],
    ),
    (
        "exposicao",
        &["Custo Invisível", "Ambiente Vampiro", "Sangria Invisível"],
    ),
    (
        "indignacao",
        &["Relógio Psicológico", "Inveja Produtiva", "Urgência"],
    ),
    (
        "vislumbre",
        &["Ambição Expandida", "Troféu Secreto", "Potencial"],
    ),
    (
        "tensao",
        &["Identidade Aprisionada", "Oportunidade Oculta", "Gap"],
    ),
    (
        "necessidade",
        &["Método vs Sorte", "Mentor Salvador", "Sistema"],
    ),
    (
        "decisao",
        &["Decisão Binária", "Coragem Necessária", "Momento"],
    ),
];

/// Drivers matching any of these are pulled in even when no phase bucket
/// claimed them.
pub const CRITICAL_KEYWORDS: &[&str] = &[
    "brutal",
    "diagnóstico",
    "realidade",
    "custo",
    "perda",
    "urgência",
    "tempo",
    "ambição",
    "potencial",
    "método",
    "sistema",
    "decisão",
    "binária",
];

// ────────────────────────────────────────────────────────────────────────────
// Transition bridges
// ────────────────────────────────────────────────────────────────────────────

/// Hand-written bridge sentences keyed `<fase>_para_<fase>`. The final
/// `necessidade_para_logica` entry bridges into the logical pitch that
/// follows the pre-pitch; it is never produced by adjacent-pair lookup.
pub const TRANSITION_BRIDGES: [(&str, &str); 6] = [
    (
        "quebra_para_exposicao",
        "Eu sei que isso dói ouvir... Mas sabe o que dói mais?",
    ),
    (
        "exposicao_para_indignacao",
        "E o pior de tudo é que isso não precisa ser assim...",
    ),
    (
        "indignacao_para_vislumbre",
        "Mas calma, não vim aqui só para abrir feridas...",
    ),
    (
        "vislumbre_para_tensao",
        "Agora você vê a diferença entre onde está e onde poderia estar...",
    ),
    (
        "tensao_para_necessidade",
        "A pergunta não é SE você vai mudar, é COMO...",
    ),
    (
        "necessidade_para_logica",
        "Eu sei que você está sentindo isso agora... Mas seu cérebro racional \
         está gritando: 'Será que funciona mesmo?' Então deixa eu te mostrar os números...",
    ),
];

/// Bridge sentence for an adjacent phase pair, falling back to a generic
/// templated line for unmapped pairs.
pub fn bridge_between(from: Phase, to: Phase) -> String {
    let key = format!("{}_para_{}", from.wire_name(), to.wire_name());
    TRANSITION_BRIDGES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, bridge)| (*bridge).to_string())
        .unwrap_or_else(|| format!("Transição de {from} para {to}"))
}
