//! # Access Tiers
//!
//! Separates the entries of one group into the public subset and the subset
//! wrapped in `begin admin` / `end admin`.

use crate::application::markers::{ADMIN_KEYWORD, MarkerError, MarkerGroupParser};
use crate::domain::types::{AccessSplit, OTHER_COMMANDS};

#[derive(Debug, Clone)]
pub struct AccessTierSplitter {
    parser: MarkerGroupParser,
}

impl Default for AccessTierSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessTierSplitter {
    pub fn new() -> Self {
        Self {
            parser: MarkerGroupParser::new(ADMIN_KEYWORD),
        }
    }

    pub fn split<S: AsRef<str>>(&self, group_entries: &[S]) -> Result<AccessSplit, MarkerError> {
        let mut buckets = self.parser.parse(group_entries)?;
        let public = buckets.remove(OTHER_COMMANDS).unwrap_or_default();
        // Admin blocks are unlabeled; a stray label still counts as admin-only.
        let admin_only = buckets.into_iter().flat_map(|(_, lines)| lines).collect();
        Ok(AccessSplit { public, admin_only })
    }
}
