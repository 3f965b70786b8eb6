mod memory;
mod storage;

pub use memory::{EvictionPolicy, InMemoryHistoryStore};
pub use storage::{HistoryStore, UserId};

use crate::models::Turn;
use std::collections::VecDeque;

pub const DEFAULT_MAX_TURNS: usize = 5;

/// Drop turns from the front until at most `max_turns` remain
pub fn trim_to_window(turns: &mut VecDeque<Turn>, max_turns: usize) {
    while turns.len() > max_turns {
        turns.pop_front();
    }
}

/// Join turns into `"<Label>: <text>"` lines, oldest first
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(Turn::render)
        .collect::<Vec<_>>()
        .join("\n")
}
