//! HTTP surface of the redaction service

pub mod handlers;
pub mod server;

pub use handlers::ApiError;
pub use server::{API_PATH, AppState, HEALTH_PATH, ScrubServer, router};
