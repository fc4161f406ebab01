// Gemini mapper module
// Builds generateContent bodies and reads text back out of responses.

pub mod models;
pub mod wrapper;

pub use models::*;
pub use wrapper::*;
