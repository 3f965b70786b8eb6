use crate::history::DEFAULT_MAX_TURNS;
use crate::language::DEFAULT_LANGUAGE;
use crate::orchestrator::{DEFAULT_FALLBACK_REPLY, DEFAULT_TYPING_DELAY_MS};

pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

pub fn default_max_turns() -> usize {
    DEFAULT_MAX_TURNS
}

pub fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

pub fn default_typing_delay_ms() -> u64 {
    DEFAULT_TYPING_DELAY_MS
}

pub fn default_poll_timeout() -> u64 {
    30
}

pub fn default_fallback_reply() -> String {
    DEFAULT_FALLBACK_REPLY.to_string()
}
