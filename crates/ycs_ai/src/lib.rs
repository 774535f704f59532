pub mod classify;
pub mod gemini;
pub mod llm;
