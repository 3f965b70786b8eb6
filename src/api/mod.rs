pub mod client;
pub mod models;
pub mod response;
pub mod service;

pub use client::GeminiClient;
pub use models::GenerateRequest;
pub use service::CompletionService;
