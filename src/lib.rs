pub mod api;
pub mod bot;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod language;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod telegram;
pub mod transport;
