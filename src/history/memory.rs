use super::storage::{HistoryStore, UserId};
use super::{trim_to_window, DEFAULT_MAX_TURNS};
use crate::models::Turn;
use chrono::{Duration, Local};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// When a user's whole history may be thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Keep every user's window for the life of the process.
    #[default]
    Never,
    /// Discard a history once its newest turn is older than this many minutes.
    IdleExpiry(i64),
}

impl EvictionPolicy {
    fn is_expired(&self, turns: &VecDeque<Turn>) -> bool {
        match self {
            EvictionPolicy::Never => false,
            EvictionPolicy::IdleExpiry(minutes) => {
                match (turns.back(), Duration::try_minutes(*minutes)) {
                    (Some(newest), Some(limit)) => {
                        Local::now().signed_duration_since(newest.created_at) >= limit
                    }
                    _ => false,
                }
            }
        }
    }
}

/// Process-lifetime history table keyed by user id.
///
/// All access goes through one mutex, so an append and its trim are never
/// observed half-done by a concurrent task.
pub struct InMemoryHistoryStore {
    max_turns: usize,
    eviction: EvictionPolicy,
    entries: Mutex<HashMap<UserId, VecDeque<Turn>>>,
}

impl InMemoryHistoryStore {
    pub fn new(max_turns: usize) -> Self {
        Self::with_eviction(max_turns, EvictionPolicy::Never)
    }

    pub fn with_eviction(max_turns: usize, eviction: EvictionPolicy) -> Self {
        Self {
            max_turns: max_turns.max(1),
            eviction,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, VecDeque<Turn>>> {
        // A panic while holding the lock cannot leave a window longer than max_turns
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append_turn(&self, user_id: UserId, turn: Turn) {
        let mut entries = self.lock();
        let history = entries.entry(user_id).or_default();

        if self.eviction.is_expired(history) {
            history.clear();
        }

        history.push_back(turn);
        trim_to_window(history, self.max_turns);
    }

    fn turns(&self, user_id: UserId) -> Vec<Turn> {
        let mut entries = self.lock();

        let expired = match entries.get(&user_id) {
            Some(history) => self.eviction.is_expired(history),
            None => return Vec::new(),
        };
        if expired {
            entries.remove(&user_id);
            return Vec::new();
        }

        entries
            .get(&user_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn user_count(&self) -> usize {
        self.lock().len()
    }

    fn purge_expired(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, history| !self.eviction.is_expired(history));
        before - entries.len()
    }
}
