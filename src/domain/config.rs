//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix login, the bot identity, and the help catalog settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_REPLY_IN_PRIVATE: &str = "HUBOT_HELP_REPLY_IN_PRIVATE";
pub const ENV_DISABLE_HTTP: &str = "HUBOT_HELP_DISABLE_HTTP";
pub const ENV_HIDDEN_COMMANDS: &str = "HUBOT_HELP_HIDDEN_COMMANDS";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub help: HelpConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    /// Reads the YAML file at `path`, then applies the environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies `HUBOT_HELP_*` style overrides looked up through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if lookup(ENV_REPLY_IN_PRIVATE).is_some() {
            self.help.reply_in_private = true;
        }
        if lookup(ENV_DISABLE_HTTP).is_some() {
            self.help.disable_http = true;
        }
        if let Some(hidden) = lookup(ENV_HIDDEN_COMMANDS) {
            self.help.hidden_commands = hidden
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
        }
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServicesConfig {
    #[serde(default)]
    pub matrix: Option<MatrixConfig>,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Identity of the assistant as it appears in command documentation.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_bot_name")]
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            alias: None,
        }
    }
}

impl BotConfig {
    /// The name substituted into command lines: alias first, then name.
    pub fn display_name(&self) -> &str {
        self.alias
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.name)
    }
}

fn default_bot_name() -> String {
    "hubot".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct HelpConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog: PathBuf,
    #[serde(default)]
    pub reply_in_private: bool,
    #[serde(default)]
    pub disable_http: bool,
    #[serde(default)]
    pub hidden_commands: Vec<String>,
    /// Regexes of commands handled by other features; matching messages get no suggestion.
    #[serde(default)]
    pub listeners: Vec<String>,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog_path(),
            reply_in_private: false,
            disable_http: false,
            hidden_commands: Vec::new(),
            listeners: Vec::new(),
            suggestions: SuggestionsConfig::default(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/commands.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct SuggestionsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_excluded_rooms")]
    pub excluded_rooms: Vec<String>,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            excluded_rooms: default_excluded_rooms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_excluded_rooms() -> Vec<String> {
    vec!["general".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// System-level settings for the bot.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default)]
    pub admin: Vec<String>,
}
