//! # Help Catalog Source
//!
//! Loads the documentation lines contributed by every feature and prepares
//! them for the help pipeline: hidden commands are dropped and the `hubot`
//! placeholder is replaced with the assistant's display name.
//!
//! The file is read on every call, so edits show up without a restart.

use crate::application::render::{PLACEHOLDER, substitute_name};
use crate::domain::config::AppConfig;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Documentation contributed by one feature.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureDoc {
    pub name: String,
    #[serde(default)]
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub features: Vec<FeatureDoc>,
}

pub fn load_features(path: &Path) -> Result<Vec<FeatureDoc>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Command catalog {} not found, only built-in help is listed", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    let file: CatalogFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(file.features)
}

/// Matches raw lines of the configured hidden commands (`hubot <cmd> - ...`).
pub fn hidden_commands_pattern(hidden: &[String]) -> Option<Regex> {
    if hidden.is_empty() {
        return None;
    }
    let alternatives = hidden
        .iter()
        .map(|c| regex::escape(c))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("^{PLACEHOLDER} (?:{alternatives}) - ")).ok()
}

#[derive(Debug, Clone)]
pub struct HelpCatalog {
    path: PathBuf,
    builtin: Vec<String>,
    display_name: String,
    hidden: Option<Regex>,
}

impl HelpCatalog {
    pub fn new(path: PathBuf, display_name: &str, hidden_commands: &[String]) -> Self {
        Self {
            path,
            builtin: crate::strings::help::COMMANDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            display_name: display_name.to_string(),
            hidden: hidden_commands_pattern(hidden_commands),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.help.catalog.clone(),
            config.bot.display_name(),
            &config.help.hidden_commands,
        )
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Built-in lines followed by every feature's lines, in file order.
    pub fn raw_commands(&self) -> Result<Vec<String>> {
        let features = load_features(&self.path)?;
        let mut lines = self.builtin.clone();
        for feature in features {
            tracing::trace!("Catalog feature '{}' contributes {} lines", feature.name, feature.commands.len());
            lines.extend(feature.commands);
        }
        Ok(lines)
    }

    /// Raw lines with hidden commands removed and the placeholder substituted.
    pub fn help_commands(&self) -> Result<Vec<String>> {
        let lines = self.raw_commands()?;
        Ok(lines
            .into_iter()
            .filter(|line| !self.hidden.as_ref().is_some_and(|re| re.is_match(line)))
            .map(|line| substitute_name(&line, &self.display_name))
            .collect())
    }
}
