//! # Domain Traits
//!
//! Abstract interfaces for the collaborators the help pipeline talks to (chat, admin lookup).
//! Allows for pluggable implementations in the Infrastructure layer.

use crate::domain::types::RichMessage;
use async_trait::async_trait;

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a markdown message to the room
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a list of collapsible attachments to the room
    async fn send_attachments(&self, message: &RichMessage) -> Result<String, String>;

    /// Send a message addressed to `user` in the current room
    async fn reply(&self, user: &str, content: &str) -> Result<String, String>;

    /// Send a direct message to `user`, outside the current room
    async fn send_private(&self, user: &str, content: &str) -> Result<(), String>;

    /// Whether the current room is a one-to-one conversation
    async fn is_direct(&self) -> bool;

    /// Get the current room ID
    fn room_id(&self) -> String;

    /// Human readable room name, if the room has one
    fn room_name(&self) -> Option<String>;
}

/// Answers whether a user may see admin-only commands.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn is_admin(&self, user: &str) -> bool;
}
