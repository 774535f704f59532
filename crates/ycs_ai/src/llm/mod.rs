use ycs_core::error::AppError;

/// Single-shot text generation: one free-text prompt in, one free-text response out.
pub trait Llm {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, AppError>;
}

pub mod gemini_llm;
