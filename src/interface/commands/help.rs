//! # Help Command
//!
//! Handles `help [query]`.
//! Assembles the grouped catalog for the requester and sends it as rich attachments,
//! or as a private markdown list when private replies are configured.

use crate::application::assembler::CatalogAssembler;
use crate::application::catalog::HelpCatalog;
use crate::application::markers::is_marker;
use crate::application::render;
use crate::domain::config::AppConfig;
use crate::domain::traits::{AdminDirectory, ChatProvider};
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_help(
    config: &AppConfig,
    catalog: &HelpCatalog,
    admins: &dyn AdminDirectory,
    chat: &impl ChatProvider,
    sender: &str,
    query: Option<&str>,
) -> Result<()> {
    let lines = match catalog.help_commands() {
        Ok(lines) => lines,
        Err(e) => {
            tracing::error!("Failed to load command catalog: {:#}", e);
            chat.send_message(&messages::catalog_unavailable(&e.to_string()))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(());
        }
    };

    // Markers survive the filter so the remaining blocks stay balanced.
    let lines: Vec<String> = lines
        .into_iter()
        .filter(|line| is_marker(line) || render::matches_query(line, query))
        .collect();

    let is_admin = admins.is_admin(sender).await;
    let grouped = match CatalogAssembler::new().assemble(&lines, is_admin) {
        Ok(grouped) => grouped,
        Err(e) => {
            tracing::error!("{}", crate::strings::logs::catalog_error(&chat.room_id(), e.keyword(), &e.to_string()));
            chat.send_message(&messages::catalog_broken(&e.to_string()))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(());
        }
    };

    if let Some(q) = query
        && grouped.line_count() == 0
    {
        chat.send_message(&messages::no_matching_commands(q))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    if config.help.reply_in_private && !chat.is_direct().await {
        chat.reply(sender, messages::REPLIED_IN_PRIVATE)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        chat.send_private(sender, &render::markdown(&grouped.flatten()))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let message = render::rich(&grouped.map_lines(render::emphasize));
    chat.send_attachments(&message)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
