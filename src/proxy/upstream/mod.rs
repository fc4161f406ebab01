pub mod client;
pub mod error;

pub use client::{ChatBackend, GeminiClient};
pub use error::UpstreamError;
