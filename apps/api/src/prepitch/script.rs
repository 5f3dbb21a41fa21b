//! Script generation — builds the master prompt, makes the single
//! generation call, and parses/validates the response.
//!
//! Any failure here (transport, empty response, bad JSON, structural
//! rejection) is terminal for the AI path: the caller discards the attempt
//! and substitutes the canned basic script. Nothing is retried or repaired.

use thiserror::Error;
use tracing::debug;

use crate::llm_client::{ContentGenerator, GenerationError};
use crate::prepitch::models::{AnalysisContext, Orchestration, Script};
use crate::prepitch::prompts::{
    ORCHESTRATION_CHAR_BUDGET, SCRIPT_MAX_TOKENS, SCRIPT_PROMPT_TEMPLATE,
};
use crate::prepitch::validation::{validate_script, ScriptIssue, MASSIVE_SCRIPT_SECTIONS};

/// Why a generated script was discarded. Routed to fallback by the pipeline,
/// never surfaced to callers.
#[derive(Debug, Error)]
pub enum ScriptFailure {
    #[error("generation call failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("generator returned an empty response")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("script rejected by validation: {0:?}")]
    Invalid(Vec<ScriptIssue>),
}

/// Generates the complete script for an orchestration. Exactly one
/// generation call; the result must parse as JSON and carry all six
/// narrative beats with substantial bodies.
pub async fn generate_script(
    generator: &dyn ContentGenerator,
    orchestration: &Orchestration,
    context: &AnalysisContext,
) -> Result<Script, ScriptFailure> {
    let prompt = build_script_prompt(orchestration, context);
    let raw = generator.generate(&prompt, SCRIPT_MAX_TOKENS).await?;

    if raw.trim().is_empty() {
        return Err(ScriptFailure::EmptyResponse);
    }

    let block = extract_json_block(&raw);
    let script: Script = serde_json::from_str(block)?;

    let issues = validate_script(&script, &MASSIVE_SCRIPT_SECTIONS);
    if !issues.is_empty() {
        return Err(ScriptFailure::Invalid(issues));
    }

    debug!("generated script parsed and validated");
    Ok(script)
}

/// Fills the master template with segment, product, and the serialized
/// orchestration (truncated to the prompt character budget).
pub fn build_script_prompt(orchestration: &Orchestration, context: &AnalysisContext) -> String {
    let serialized =
        serde_json::to_string_pretty(orchestration).unwrap_or_else(|_| "{}".to_string());
    let truncated: String = serialized
        .chars()
        .take(ORCHESTRATION_CHAR_BUDGET)
        .collect();

    SCRIPT_PROMPT_TEMPLATE
        .replace("{segmento}", context.segment_or_default())
        .replace("{produto}", context.product_or_default())
        .replace("{orquestracao}", &truncated)
}

/// Extracts the JSON payload from a possibly fenced response: the substring
/// between the first ```` ```json ```` marker and the last ```` ``` ````.
/// Tolerates preamble text before the fence. Bare fences and unfenced text
/// pass through with markers stripped.
pub fn extract_json_block(text: &str) -> &str {
    let text = text.trim();

    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        return match rest.rfind("```") {
            Some(end) => rest[..end].trim(),
            None => rest.trim(),
        };
    }

    if let Some(stripped) = text.strip_prefix("```") {
        return stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| stripped.trim());
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prepitch::models::Driver;
    use crate::prepitch::orchestration::build_orchestration;

    fn context() -> AnalysisContext {
        AnalysisContext {
            segment: Some("fitness".to_string()),
            product: Some("Programa Elite".to_string()),
        }
    }

    fn orchestration() -> Orchestration {
        build_orchestration(&[
            Driver::named("Diagnóstico Brutal"),
            Driver::named("Método vs Sorte"),
        ])
    }

    #[test]
    fn test_prompt_embeds_segment_and_product() {
        let prompt = build_script_prompt(&orchestration(), &context());
        assert!(prompt.contains("Segmento: fitness"));
        assert!(prompt.contains("Produto: Programa Elite"));
        assert!(!prompt.contains("{segmento}"));
        assert!(!prompt.contains("{orquestracao}"));
    }

    #[test]
    fn test_prompt_embeds_orchestration_within_budget() {
        let prompt = build_script_prompt(&orchestration(), &context());
        assert!(prompt.contains("sequencia_psicologica"));
        // The serialized orchestration for two drivers fits the budget whole
        assert!(prompt.contains("Diagnóstico Brutal"));
    }

    #[test]
    fn test_prompt_defaults_missing_product() {
        let ctx = AnalysisContext {
            segment: Some("fitness".to_string()),
            product: None,
        };
        let prompt = build_script_prompt(&orchestration(), &ctx);
        assert!(prompt.contains("Produto: solução"));
    }

    #[test]
    fn test_extract_json_block_with_json_fence() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_with_preamble_before_fence() {
        let input = "Claro! Aqui está o roteiro:\n```json\n{\"key\": \"value\"}\n```\nEspero que ajude.";
        // rfind of the closing fence cuts the trailing chatter too
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_bare_fence() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_unfenced_passthrough() {
        let input = "  {\"key\": \"value\"}  ";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_unclosed_fence() {
        let input = "```json\n{\"key\": \"value\"}";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }
}
