//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`.
//! This module acts as the bridge between the generic `ChatProvider` interface used by the bot's core logic
//! and the specific implementation details of the Matrix SDK.

use crate::application::render::escape_html;
use crate::domain::traits::ChatProvider;
use crate::domain::types::RichMessage;
use anyhow::Result;
use async_trait::async_trait;
use matrix_sdk::Client;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::UserId;
use matrix_sdk::ruma::events::room::message::{FormattedBody, RoomMessageEventContent};

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
    client: Client,
}

impl MatrixService {
    pub fn new(room: Room, client: Client) -> Self {
        Self { room, client }
    }

    /// Finds the existing direct room with `user`, or opens one.
    async fn direct_room(&self, user: &str) -> Result<Room> {
        let user_id = UserId::parse(user)?;
        if let Some(room) = self.client.get_dm_room(&user_id) {
            return Ok(room);
        }
        tracing::info!("Opening direct room with {}", user);
        Ok(self.client.create_dm(&user_id).await?)
    }
}

/// Plain and HTML bodies for a list of attachments.
///
/// Each attachment becomes a `<details>` block, open unless collapsed, with the
/// title in the attachment colour.
pub fn attachments_body(message: &RichMessage) -> (String, String) {
    let mut plain = Vec::new();
    let mut html = String::new();

    for attachment in &message.attachments {
        plain.push(format!("{}\n{}", attachment.title, attachment.text));

        // Hard line breaks keep one command per line.
        let text = attachment.text.replace('\n', "  \n");
        let body = FormattedBody::markdown(&text)
            .map(|f| f.body)
            .unwrap_or_else(|| escape_html(&attachment.text).replace('\n', "<br>"));
        let open = if attachment.collapsed { "" } else { " open" };
        html.push_str(&format!(
            "<details{open}><summary><font color=\"{}\"><b>{}</b></font></summary>{body}</details>",
            attachment.color,
            escape_html(&attachment.title),
        ));
    }

    (plain.join("\n\n"), html)
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    fn room_name(&self) -> Option<String> {
        self.room.name()
    }

    async fn is_direct(&self) -> bool {
        self.room.is_direct().await.unwrap_or(false)
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_attachments(&self, message: &RichMessage) -> Result<String, String> {
        tracing::info!(
            "Bot sending {} help attachments to {}",
            message.attachments.len(),
            self.room_id()
        );
        let (plain, html) = attachments_body(message);
        self.room
            .send(RoomMessageEventContent::text_html(plain, html))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn reply(&self, user: &str, content: &str) -> Result<String, String> {
        self.send_message(&format!("{user}: {content}")).await
    }

    async fn send_private(&self, user: &str, content: &str) -> Result<(), String> {
        let room = self.direct_room(user).await.map_err(|e| e.to_string())?;
        room.send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
