use super::defaults::default_max_turns;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Drop a user's history after this many idle minutes; unset keeps it forever
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_expiry_minutes: Option<i64>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            idle_expiry_minutes: None,
        }
    }
}
