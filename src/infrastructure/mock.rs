//! In-memory chat provider for handler tests.

use crate::domain::traits::ChatProvider;
use crate::domain::types::RichMessage;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Message(String),
    Attachments(RichMessage),
    Reply(String, String),
    Private(String, String),
}

pub struct MockChat {
    direct: bool,
    name: Option<String>,
    sent: Mutex<Vec<Sent>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self {
            direct: false,
            name: Some("dev".to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn direct() -> Self {
        Self {
            direct: true,
            ..Self::new()
        }
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, item: Sent) {
        self.sent.lock().unwrap().push(item);
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        self.record(Sent::Message(content.to_string()));
        Ok("$event".to_string())
    }

    async fn send_attachments(&self, message: &RichMessage) -> Result<String, String> {
        self.record(Sent::Attachments(message.clone()));
        Ok("$event".to_string())
    }

    async fn reply(&self, user: &str, content: &str) -> Result<String, String> {
        self.record(Sent::Reply(user.to_string(), content.to_string()));
        Ok("$event".to_string())
    }

    async fn send_private(&self, user: &str, content: &str) -> Result<(), String> {
        self.record(Sent::Private(user.to_string(), content.to_string()));
        Ok(())
    }

    async fn is_direct(&self) -> bool {
        self.direct
    }

    fn room_id(&self) -> String {
        "!room:example.org".to_string()
    }

    fn room_name(&self) -> Option<String> {
        self.name.clone()
    }
}
