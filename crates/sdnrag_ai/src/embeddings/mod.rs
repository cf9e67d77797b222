use sdnrag_core::error::AppError;

/// Opaque text-to-vector seam. The same implementation must embed both the
/// indexed content and the queries; mixing embedding spaces silently
/// degrades retrieval.
pub trait Embedder {
    fn embed(&self, model: &str, input: &str) -> Result<Vec<f32>, AppError>;
}

pub mod ollama_embed;
