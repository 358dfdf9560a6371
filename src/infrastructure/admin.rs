//! # Admin Directory
//!
//! Resolves admin membership from the `system.admin` list in `config.yaml`.
//! User ids are compared case-insensitively.

use crate::domain::traits::AdminDirectory;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct ConfigAdminDirectory {
    admins: Vec<String>,
}

impl ConfigAdminDirectory {
    pub fn new(admins: Vec<String>) -> Self {
        Self { admins }
    }
}

#[async_trait]
impl AdminDirectory for ConfigAdminDirectory {
    async fn is_admin(&self, user: &str) -> bool {
        let is_admin = self.admins.iter().any(|a| a.to_lowercase() == user.to_lowercase());
        tracing::debug!("Admin check for {}: {}", user, is_admin);
        is_admin
    }
}
