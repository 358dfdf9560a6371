//! # Domain Types
//!
//! Common data structures passed between the catalog pipeline and the transports.

use serde::{Deserialize, Serialize};

/// Bucket name for entries that sit outside any marker block.
pub const OTHER_COMMANDS: &str = "Other commands";

/// Separator line placed in front of a group's admin-only entries.
pub const ADMIN_SEPARATOR: &str = "Admin only:";

/// Ordered mapping of bucket name to catalog lines.
///
/// Buckets keep the order in which they were first seen, and lines keep their
/// authoring order inside each bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedCatalog {
    groups: Vec<(String, Vec<String>)>,
}

impl GroupedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line to `group`, creating the bucket on first use.
    pub fn push(&mut self, group: &str, line: &str) {
        match self.groups.iter_mut().find(|(name, _)| name == group) {
            Some((_, lines)) => lines.push(line.to_string()),
            None => self
                .groups
                .push((group.to_string(), vec![line.to_string()])),
        }
    }

    /// Sets the lines of `group`, keeping its position if it already exists.
    pub fn insert(&mut self, group: String, lines: Vec<String>) {
        match self.groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, existing)) => *existing = lines,
            None => self.groups.push((group, lines)),
        }
    }

    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, lines)| lines.as_slice())
    }

    pub fn remove(&mut self, group: &str) -> Option<Vec<String>> {
        let idx = self.groups.iter().position(|(name, _)| name == group)?;
        Some(self.groups.remove(idx).1)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.get(group).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, lines)| (name.as_str(), lines.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of lines across all buckets.
    pub fn line_count(&self) -> usize {
        self.groups.iter().map(|(_, lines)| lines.len()).sum()
    }

    /// Applies `f` to every line, keeping bucket and line order.
    pub fn map_lines(self, f: impl Fn(&str) -> String) -> Self {
        Self {
            groups: self
                .groups
                .into_iter()
                .map(|(name, lines)| (name, lines.iter().map(|l| f(l)).collect()))
                .collect(),
        }
    }

    /// Named groups in first-seen order, followed by `Other commands`.
    pub fn in_render_order(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.iter()
            .filter(|(name, _)| *name != OTHER_COMMANDS)
            .chain(self.iter().filter(|(name, _)| *name == OTHER_COMMANDS))
    }

    /// All lines in render order, without group titles.
    pub fn flatten(&self) -> Vec<String> {
        self.in_render_order()
            .flat_map(|(_, lines)| lines.iter().cloned())
            .collect()
    }
}

impl IntoIterator for GroupedCatalog {
    type Item = (String, Vec<String>);
    type IntoIter = std::vec::IntoIter<(String, Vec<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Public and admin-only entries of a single group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessSplit {
    pub public: Vec<String>,
    pub admin_only: Vec<String>,
}

/// One collapsible block of a rich chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub title: String,
    pub color: String,
    pub text: String,
    pub collapsed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichMessage {
    pub attachments: Vec<Attachment>,
}
