use super::Config;
use crate::error::{RelayError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

/// Expand `${VAR_NAME}` references using `lookup`; unknown variables are left as written
pub fn expand_env_var_in_string<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    env_var_pattern()
        .replace_all(value, |cap: &regex::Captures| {
            lookup(&cap[1]).unwrap_or_else(|| cap[0].to_string())
        })
        .into_owned()
}

/// Reject settings the bot cannot run with
pub fn validate(config: &Config) -> Result<()> {
    if config.max_turns == 0 {
        return Err(RelayError::ConfigError(
            "history.max_turns must be at least 1".to_string(),
        ));
    }
    if config.request_timeout == 0 {
        return Err(RelayError::ConfigError(
            "api.request_timeout must be greater than 0".to_string(),
        ));
    }
    if let Some(minutes) = config.idle_expiry_minutes {
        if minutes <= 0 {
            return Err(RelayError::ConfigError(
                "history.idle_expiry_minutes must be positive".to_string(),
            ));
        }
    }
    if config.default_language.trim().is_empty() {
        return Err(RelayError::ConfigError(
            "bot.default_language must not be empty".to_string(),
        ));
    }
    if config.fallback_reply.trim().is_empty() {
        return Err(RelayError::ConfigError(
            "bot.fallback_reply must not be empty".to_string(),
        ));
    }
    Ok(())
}
