use sdnrag_core::error::AppError;

use crate::index::RetrievedUnit;
use crate::llm::Llm;

mod prompts;

/// Fixed fallback returned when retrieval produced nothing to ground on.
pub const NO_EVIDENCE_ANSWER: &str = "No relevant evidence found in the indexed artifacts.";

/// Deterministic-leaning decoding for grounded synthesis.
const ANSWER_TEMPERATURE: f32 = 0.0;

/// Synthesize a grounded answer for `query` from the retrieved evidence.
///
/// An empty retrieval short-circuits to [`NO_EVIDENCE_ANSWER`] without
/// invoking the language model. Otherwise every hit is rendered into the
/// prompt's context block (rank-prefixed, 1-based) and the model's text is
/// returned verbatim. Model failures propagate unchanged to the caller.
pub fn answer_query(
    llm: &dyn Llm,
    model: &str,
    hits: &[RetrievedUnit],
    query: &str,
) -> Result<String, AppError> {
    if hits.is_empty() {
        return Ok(NO_EVIDENCE_ANSWER.to_string());
    }

    let context = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| format!("[{}] {}", i + 1, hit.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = prompts::grounded_answer(&context, query);
    llm.generate(model, &prompt, ANSWER_TEMPERATURE)
}
