pub mod answer;
pub mod embeddings;
pub mod index;
pub mod llm;
pub mod ollama;
