//! # Command Suggestions
//!
//! Builds the "did you mean" list for a message no listener handled.
//! Candidates come from the flat help command list; admin-only commands are
//! offered to admins only.

use crate::application::markers::{ADMIN_KEYWORD, LineKind, MarkerGroupParser, is_marker};
use crate::application::matcher::is_probable_match;
use regex::Regex;

/// Command invocations visible to the requester, in catalog order.
///
/// Marker lines are dropped, and so is everything inside `begin admin` /
/// `end admin` unless the requester is an admin.
pub fn visible_invocations(lines: &[String], is_admin: bool) -> Vec<String> {
    let admin = MarkerGroupParser::new(ADMIN_KEYWORD);
    let mut in_admin = false;
    let mut invocations = Vec::new();

    for line in lines {
        match admin.classify(line) {
            LineKind::Begin(_) => in_admin = true,
            LineKind::End => in_admin = false,
            LineKind::Plain if is_marker(line) => {}
            LineKind::Plain if in_admin && !is_admin => {}
            LineKind::Plain => {
                let invocation = line.split_once(" - ").map_or(line.as_str(), |(inv, _)| inv);
                invocations.push(invocation.trim().to_string());
            }
        }
    }
    invocations
}

/// Strips the parts of an invocation a user would not type: the assistant's
/// name, `<placeholders>`, `@mention` tails and markdown stars.
pub fn command_name(invocation: &str, display_name: &str) -> String {
    let separator = if display_name.chars().count() == 1 { r"\s*" } else { r"\s+" };
    let pattern = format!(
        r"(?i)^{}{separator}|\s<.*>|\s@.*|\*",
        regex::escape(display_name)
    );
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(invocation, "").trim().to_string(),
        Err(_) => invocation.trim().to_string(),
    }
}

/// Invocations that `utterance` probably meant, deduplicated, catalog order kept.
pub fn suggest(utterance: &str, lines: &[String], is_admin: bool, display_name: &str) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();
    for invocation in visible_invocations(lines, is_admin) {
        if suggestions.contains(&invocation) {
            continue;
        }
        if is_probable_match(utterance, &command_name(&invocation, display_name)) {
            suggestions.push(invocation);
        }
    }
    suggestions
}
