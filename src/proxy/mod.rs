pub mod handlers;
pub mod health;
pub mod mappers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod upstream;

pub use server::AxumServer;
pub use state::{AppState, ChatState, SiteState};
pub use upstream::{ChatBackend, GeminiClient};
