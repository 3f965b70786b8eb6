mod api;
mod bot;
mod defaults;
mod history;
mod validation;

use crate::api::client::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL};
use crate::cli::Args;
use crate::error::{RelayError, Result};
use crate::history::EvictionPolicy;
use crate::orchestrator::RelaySettings;
use crate::telegram::DEFAULT_TELEGRAM_API;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use api::ApiConfig;
pub use bot::BotConfig;
pub use defaults::DEFAULT_REQUEST_TIMEOUT;
pub use history::HistoryConfig;
pub use validation::{expand_env_var_in_string, validate};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub name: Option<String>,
}

/// Settings read from `.relaybot.yaml` (or `.json`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

/// Fully resolved runtime configuration.
#[derive(Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub telegram_token: String,
    pub api_endpoint: String,
    pub telegram_api: String,
    pub model: String,
    pub request_timeout: u64,
    pub max_turns: usize,
    pub idle_expiry_minutes: Option<i64>,
    pub default_language: String,
    pub typing_delay_ms: u64,
    pub poll_timeout: u64,
    pub fallback_reply: String,
    pub verbose: bool,
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let lookup = |key: &str| env::var(key).ok();

        let mut file_config = FileConfig::load(args.config.as_deref())
            .map_err(|e| RelayError::ConfigError(format!("{:#}", e)))?;
        file_config.expand_env(&lookup);

        let config = Self::resolve(args, &file_config, &lookup)?;
        validate(&config)?;
        Ok(config)
    }

    /// Merge CLI args > environment > config file > defaults
    pub fn resolve<F>(args: &Args, file_config: &FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Secrets only ever come from the environment
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                RelayError::ConfigError("GEMINI_API_KEY environment variable not set".to_string())
            })?;
        let telegram_token = lookup("TELEGRAM_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                RelayError::ConfigError("TELEGRAM_TOKEN environment variable not set".to_string())
            })?;

        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| lookup("RELAYBOT_API_ENDPOINT"))
            .or_else(|| file_config.api.endpoint.clone())
            .map(|endpoint| endpoint.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let model = args
            .model
            .clone()
            .or_else(|| lookup("RELAYBOT_MODEL"))
            .or_else(|| file_config.model.name.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let request_timeout = lookup("RELAYBOT_REQUEST_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.api.request_timeout)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let max_turns = args
            .max_turns
            .or_else(|| lookup("RELAYBOT_MAX_TURNS").and_then(|s| s.parse::<usize>().ok()))
            .unwrap_or(file_config.history.max_turns);

        let default_language = lookup("RELAYBOT_DEFAULT_LANGUAGE")
            .unwrap_or_else(|| file_config.bot.default_language.clone());

        let verbose = args.verbose
            || lookup("RELAYBOT_VERBOSE")
                .map(|v| parse_flag(&v))
                .or(file_config.bot.verbose)
                .unwrap_or(false);

        Ok(Config {
            gemini_api_key,
            telegram_token,
            api_endpoint,
            telegram_api: file_config
                .bot
                .telegram_api
                .clone()
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API.to_string()),
            model,
            request_timeout,
            max_turns,
            idle_expiry_minutes: file_config.history.idle_expiry_minutes,
            default_language,
            typing_delay_ms: file_config.bot.typing_delay_ms,
            poll_timeout: file_config.bot.poll_timeout,
            fallback_reply: file_config.bot.fallback_reply.clone(),
            verbose,
        })
    }

    pub fn eviction_policy(&self) -> EvictionPolicy {
        match self.idle_expiry_minutes {
            Some(minutes) => EvictionPolicy::IdleExpiry(minutes),
            None => EvictionPolicy::Never,
        }
    }

    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            default_language: self.default_language.clone(),
            typing_delay: Duration::from_millis(self.typing_delay_ms),
            fallback_reply: self.fallback_reply.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Key/value view for `--check-config`, secrets masked
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("GEMINI_API_KEY", mask_secret(&self.gemini_api_key)),
            ("TELEGRAM_TOKEN", mask_secret(&self.telegram_token)),
            ("api.endpoint", self.api_endpoint.clone()),
            ("api.request_timeout", format!("{}s", self.request_timeout)),
            ("model.name", self.model.clone()),
            ("history.max_turns", self.max_turns.to_string()),
            (
                "history.idle_expiry_minutes",
                self.idle_expiry_minutes
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "never".to_string()),
            ),
            ("bot.default_language", self.default_language.clone()),
            ("bot.typing_delay_ms", self.typing_delay_ms.to_string()),
            ("bot.poll_timeout", format!("{}s", self.poll_timeout)),
            ("bot.fallback_reply", self.fallback_reply.clone()),
            ("bot.telegram_api", self.telegram_api.clone()),
            ("bot.verbose", self.verbose.to_string()),
        ]
    }
}

/// Keep the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

impl FileConfig {
    /// Load the first config file found; an explicit path must exist
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let config = if extension == Some("json") {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".relaybot.yaml"),
            PathBuf::from(".relaybot.yml"),
            PathBuf::from(".relaybot.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let config_dir = config_dir.join("relaybot");
            paths.push(config_dir.join("relaybot.yaml"));
            paths.push(config_dir.join("relaybot.yml"));
            paths.push(config_dir.join("relaybot.json"));
        }

        paths
    }

    /// Expand `${VAR}` references in string settings
    pub fn expand_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let expand = |value: &str| expand_env_var_in_string(value, lookup);

        self.api.endpoint = self.api.endpoint.as_deref().map(expand);
        self.model.name = self.model.name.as_deref().map(expand);
        self.bot.telegram_api = self.bot.telegram_api.as_deref().map(expand);
        self.bot.default_language = expand(&self.bot.default_language);
        self.bot.fallback_reply = expand(&self.bot.fallback_reply);
    }
}
