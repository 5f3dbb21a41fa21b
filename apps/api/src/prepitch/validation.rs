//! Script validation — structural checks over a parsed script.
//!
//! Returns a list of typed issues instead of a bare boolean so callers and
//! tests can see WHAT failed. An empty list means the script is acceptable.
//! Callers discard a script wholesale on any issue — there is no
//! partial-section repair.

use serde::Serialize;

use crate::prepitch::models::Script;

/// Section names the generator is asked to produce (the six narrative beats).
pub const MASSIVE_SCRIPT_SECTIONS: [&str; 6] = [
    "abertura_impacto",
    "exposicao_ferida",
    "indignacao_revolta",
    "vislumbre_possibilidade",
    "tensao_maxima",
    "necessidade_inevitavel",
];

/// Section names of the canned basic script shape.
pub const BASIC_SCRIPT_SECTIONS: [&str; 3] = ["abertura", "desenvolvimento", "fechamento"];

/// A section body shorter than this is rejected.
const MIN_SECTION_CHARS: usize = 50;
/// Marker phrase of an unfilled template...
const GENERIC_MARKER: &str = "customizado para";
/// ...which only condemns a section when the body is also under this length.
const GENERIC_MAX_CHARS: usize = 100;

/// One structural defect found in a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScriptIssue {
    /// A required section is absent.
    MissingSection { section: String },
    /// The section body is under [`MIN_SECTION_CHARS`] characters.
    ShortSection { section: String, chars: usize },
    /// The body carries the generic placeholder marker and is under
    /// [`GENERIC_MAX_CHARS`] characters — an unfilled template.
    GenericSection { section: String, chars: usize },
}

/// Checks that every `required` section exists with a substantial,
/// non-placeholder body. Lengths are counted in characters, not bytes —
/// the content is accented Portuguese.
pub fn validate_script(script: &Script, required: &[&str]) -> Vec<ScriptIssue> {
    let mut issues = Vec::new();

    for &section in required {
        let Some(content) = script.get(section) else {
            issues.push(ScriptIssue::MissingSection {
                section: section.to_string(),
            });
            continue;
        };

        let chars = content.body.chars().count();
        if chars < MIN_SECTION_CHARS {
            issues.push(ScriptIssue::ShortSection {
                section: section.to_string(),
                chars,
            });
        } else if chars < GENERIC_MAX_CHARS && content.body.to_lowercase().contains(GENERIC_MARKER)
        {
            issues.push(ScriptIssue::GenericSection {
                section: section.to_string(),
                chars,
            });
        }
    }

    issues
}
