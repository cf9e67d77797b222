use sdnrag_core::error::AppError;

/// Opaque prompt-to-text seam. One blocking call, final text only; the
/// synthesizer passes temperature 0 for deterministic-leaning decoding.
pub trait Llm {
    fn generate(&self, model: &str, prompt: &str, temperature: f32) -> Result<String, AppError>;
}

pub mod ollama_llm;
