//! # Catalog Assembly
//!
//! Groups the raw catalog by `group` markers, then splits each group into
//! access tiers. The requester's admin status is resolved by the caller
//! before assembly starts.

use crate::application::access::AccessTierSplitter;
use crate::application::markers::{GROUP_KEYWORD, MarkerError, MarkerGroupParser};
use crate::domain::types::{ADMIN_SEPARATOR, AccessSplit, GroupedCatalog};

#[derive(Debug, Clone)]
pub struct CatalogAssembler {
    groups: MarkerGroupParser,
    access: AccessTierSplitter,
}

impl Default for CatalogAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogAssembler {
    pub fn new() -> Self {
        Self {
            groups: MarkerGroupParser::new(GROUP_KEYWORD),
            access: AccessTierSplitter::new(),
        }
    }

    pub fn assemble<S: AsRef<str>>(
        &self,
        raw_catalog: &[S],
        is_requester_admin: bool,
    ) -> Result<GroupedCatalog, MarkerError> {
        let groups = self.groups.parse(raw_catalog)?;
        let mut assembled = GroupedCatalog::new();

        for (name, entries) in groups {
            let AccessSplit { mut public, admin_only } = self.access.split(&entries)?;
            if is_requester_admin && !admin_only.is_empty() {
                public.push(ADMIN_SEPARATOR.to_string());
                public.extend(admin_only);
            }
            assembled.insert(name, public);
        }

        tracing::debug!(
            "Assembled help catalog: {} groups, {} lines (admin={})",
            assembled.len(),
            assembled.line_count(),
            is_requester_admin
        );
        Ok(assembled)
    }
}
