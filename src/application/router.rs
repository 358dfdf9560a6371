//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! Messages addressed to the bot are matched against `help`; anything no listener
//! claims is answered with suggestions.

use anyhow::Result;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use crate::application::catalog::HelpCatalog;
use crate::domain::config::AppConfig;
use crate::domain::traits::{AdminDirectory, ChatProvider};
use crate::interface::commands;

pub struct CommandRouter {
    config: AppConfig,
    catalog: Arc<HelpCatalog>,
    admins: Arc<dyn AdminDirectory>,
    address: Option<Regex>,
    help: Regex,
    listeners: Vec<Regex>,
}

impl CommandRouter {
    pub fn new(config: AppConfig, catalog: Arc<HelpCatalog>, admins: Arc<dyn AdminDirectory>) -> Self {
        let listeners = config
            .help
            .listeners
            .iter()
            .filter_map(|pattern| match RegexBuilder::new(pattern).case_insensitive(true).build() {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Ignoring invalid listener pattern '{}': {}", pattern, e);
                    None
                }
            })
            .collect();

        Self {
            address: address_pattern(&config),
            help: RegexBuilder::new(r"^help(?:\s+(.*))?$")
                .case_insensitive(true)
                .build()
                .expect("help pattern is a valid regex"),
            listeners,
            config,
            catalog,
            admins,
        }
    }

    /// The message with the bot's name stripped, if it was addressed to the bot.
    fn addressed<'a>(&self, message: &'a str) -> Option<&'a str> {
        let re = self.address.as_ref()?;
        let found = re.find(message)?;
        Some(message[found.end()..].trim())
    }

    fn is_excluded_room(&self, chat: &impl ChatProvider) -> bool {
        let room_id = chat.room_id();
        let room_name = chat.room_name();
        self.config
            .help
            .suggestions
            .excluded_rooms
            .iter()
            .any(|r| *r == room_id || room_name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(r)))
    }

    pub async fn route<C>(&self, chat: &C, message: &str, sender: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let msg = message.trim();
        let body = match self.addressed(msg) {
            Some(body) => body,
            None => {
                if !chat.is_direct().await {
                    return Ok(());
                }
                msg
            }
        };

        tracing::info!("Router dispatching '{}' sender='{}'", body, sender);

        if let Some(caps) = self.help.captures(body) {
            let query = caps.get(1).map(|m| m.as_str().trim()).filter(|q| !q.is_empty());
            return commands::help::handle_help(
                &self.config,
                &self.catalog,
                self.admins.as_ref(),
                chat,
                sender,
                query,
            )
            .await;
        }

        if self
            .listeners
            .iter()
            .any(|re| re.is_match(body) || re.is_match(msg))
        {
            tracing::debug!("Message claimed by another listener");
            return Ok(());
        }

        if body.is_empty() || !self.config.help.suggestions.enabled || self.is_excluded_room(chat) {
            return Ok(());
        }

        commands::suggest::handle_unmatched(&self.catalog, self.admins.as_ref(), chat, sender, body).await
    }
}

/// Matches `name`, `@name`, `name:` or `name,` at the start of a message.
/// A single-character alias (e.g. `!`) needs no separator.
fn address_pattern(config: &AppConfig) -> Option<Regex> {
    let mut names = vec![config.bot.name.clone()];
    if let Some(alias) = config.bot.alias.as_ref().filter(|a| !a.is_empty()) {
        names.push(alias.clone());
    }
    if let Some(display) = config
        .services
        .matrix
        .as_ref()
        .and_then(|m| m.display_name.clone())
    {
        names.push(display);
    }

    let alternatives = names
        .iter()
        .filter(|n| !n.is_empty())
        .map(|n| {
            if n.chars().count() == 1 {
                format!(r"{}\s*", regex::escape(n))
            } else {
                format!(r"@?{}(?:[:,]\s*|\s+|$)", regex::escape(n))
            }
        })
        .collect::<Vec<_>>()
        .join("|");
    if alternatives.is_empty() {
        return None;
    }
    RegexBuilder::new(&format!("^(?:{alternatives})"))
        .case_insensitive(true)
        .build()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::admin::ConfigAdminDirectory;
    use crate::infrastructure::mock::{MockChat, Sent};
    use crate::strings::messages;
    use std::path::PathBuf;

    fn router(config: AppConfig) -> CommandRouter {
        let catalog = Arc::new(HelpCatalog::new(
            PathBuf::from("/nonexistent/commands.yaml"),
            config.bot.display_name(),
            &[],
        ));
        CommandRouter::new(config, catalog, Arc::new(ConfigAdminDirectory::default()))
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.bot.name = "rocketbot".to_string();
        config
    }

    #[tokio::test]
    async fn test_help_is_routed() {
        let chat = MockChat::new();
        router(config()).route(&chat, "rocketbot help", "@bob:example.org").await.unwrap();
        assert!(matches!(chat.sent()[0], Sent::Attachments(_)));
    }

    #[tokio::test]
    async fn test_help_with_query_and_mention_forms() {
        let chat = MockChat::new();
        router(config())
            .route(&chat, "@RocketBot: help nothing-here", "@bob:example.org")
            .await
            .unwrap();
        assert_eq!(
            chat.sent(),
            vec![Sent::Message(messages::no_matching_commands("nothing-here"))]
        );
    }

    #[tokio::test]
    async fn test_unaddressed_chatter_is_ignored() {
        let chat = MockChat::new();
        router(config()).route(&chat, "helo everyone", "@bob:example.org").await.unwrap();
        assert!(chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_direct_room_needs_no_address() {
        let chat = MockChat::direct();
        router(config()).route(&chat, "help", "@bob:example.org").await.unwrap();
        assert!(matches!(chat.sent()[0], Sent::Attachments(_)));
    }

    #[tokio::test]
    async fn test_typo_gets_suggestion() {
        let chat = MockChat::new();
        router(config()).route(&chat, "rocketbot helo", "@bob:example.org").await.unwrap();
        let Sent::Message(text) = &chat.sent()[0] else {
            panic!("expected a message");
        };
        assert!(text.starts_with("Did you mean:\nrocketbot help"));
    }

    #[tokio::test]
    async fn test_excluded_room_gets_no_suggestion() {
        let chat = MockChat::named("General");
        router(config()).route(&chat, "rocketbot helo", "@bob:example.org").await.unwrap();
        assert!(chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_other_listener_claims_message() {
        let mut config = config();
        config.help.listeners = vec![r"^ping$".to_string(), "(".to_string()];
        let chat = MockChat::new();
        router(config).route(&chat, "rocketbot ping", "@bob:example.org").await.unwrap();
        assert!(chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_single_character_alias() {
        let mut config = config();
        config.bot.alias = Some("!".to_string());
        let chat = MockChat::new();
        router(config).route(&chat, "!hlep", "@bob:example.org").await.unwrap();
        let Sent::Message(text) = &chat.sent()[0] else {
            panic!("expected a message");
        };
        assert_eq!(text, "Did you mean:\n!help\n!help <query>");
    }

    #[tokio::test]
    async fn test_suggestions_disabled() {
        let mut config = config();
        config.help.suggestions.enabled = false;
        let chat = MockChat::new();
        router(config).route(&chat, "rocketbot helo", "@bob:example.org").await.unwrap();
        assert!(chat.sent().is_empty());
    }
}
