pub mod client;
pub mod error;
pub mod types;

pub use client::{GeminiClient, GenerateContent};
pub use error::GeminiError;
pub use types::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
