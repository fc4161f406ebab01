pub mod gemini;
pub mod history;
pub mod sanitizer;
