//! # Suggestion Handler
//!
//! Answers messages addressed to the bot that no listener handled,
//! offering the commands the user probably meant.

use crate::application::catalog::HelpCatalog;
use crate::application::suggest;
use crate::domain::traits::{AdminDirectory, ChatProvider};
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_unmatched(
    catalog: &HelpCatalog,
    admins: &dyn AdminDirectory,
    chat: &impl ChatProvider,
    sender: &str,
    utterance: &str,
) -> Result<()> {
    let lines = catalog.help_commands()?;
    let is_admin = admins.is_admin(sender).await;
    let suggestions = suggest::suggest(utterance, &lines, is_admin, catalog.display_name());

    tracing::info!(
        "No listener for '{}' from {}, {} suggestion(s)",
        utterance,
        sender,
        suggestions.len()
    );

    let reply = if suggestions.is_empty() {
        messages::UNKNOWN_COMMAND.to_string()
    } else {
        messages::did_you_mean(&suggestions)
    };
    chat.send_message(&reply)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::admin::ConfigAdminDirectory;
    use crate::infrastructure::mock::{MockChat, Sent};
    use std::path::PathBuf;

    fn builtin_only() -> HelpCatalog {
        HelpCatalog::new(PathBuf::from("/nonexistent/commands.yaml"), "bot", &[])
    }

    #[tokio::test]
    async fn test_typo_gets_suggestions() {
        let chat = MockChat::new();
        handle_unmatched(&builtin_only(), &ConfigAdminDirectory::default(), &chat, "@bob:example.org", "hlep")
            .await
            .unwrap();

        assert_eq!(
            chat.sent(),
            vec![Sent::Message("Did you mean:\nbot help\nbot help <query>".to_string())]
        );
    }

    #[tokio::test]
    async fn test_gibberish_is_unknown() {
        let chat = MockChat::new();
        handle_unmatched(&builtin_only(), &ConfigAdminDirectory::default(), &chat, "@bob:example.org", "banana")
            .await
            .unwrap();

        assert_eq!(chat.sent(), vec![Sent::Message(messages::UNKNOWN_COMMAND.to_string())]);
    }
}
