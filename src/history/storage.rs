use crate::models::{Role, Turn};

/// Platform-supplied user identity.
pub type UserId = i64;

/// Trait for conversation history backends
pub trait HistoryStore: Send + Sync {
    /// Append a turn, trimming the user's history back to the window in the same step
    fn append_turn(&self, user_id: UserId, turn: Turn);

    /// Snapshot of a user's turns, oldest first
    fn turns(&self, user_id: UserId) -> Vec<Turn>;

    /// Number of users with a live history entry
    fn user_count(&self) -> usize;

    /// Drop every history the eviction policy considers stale, returning how many went
    fn purge_expired(&self) -> usize;

    fn append(&self, user_id: UserId, role: Role, text: &str) {
        self.append_turn(user_id, Turn::new(role, text));
    }

    /// Render a user's history as a transcript, empty when the user has none
    fn render(&self, user_id: UserId) -> String {
        super::render_transcript(&self.turns(user_id))
    }
}
