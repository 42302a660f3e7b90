//! Provider wire formats

pub mod gemini;

pub use gemini::{GenerateContentRequest, GenerateContentResponse};
