pub mod client;
pub mod commands;
pub mod models;

pub use client::{split_message, TelegramClient, DEFAULT_TELEGRAM_API, MAX_MESSAGE_CHARS};
pub use commands::{parse_command, Command};
pub use models::{ApiResponse, Chat, Message, Update, User};
