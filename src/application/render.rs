//! # Catalog Rendering
//!
//! Presentation forms for the help catalog:
//! - rich attachments for chat (one collapsible block per group)
//! - an escaped HTML fragment for the web page
//! - markdown-emphasized lines for plain text replies
//!
//! Also owns the placeholder substitution applied to raw lines before any of these.

use crate::application::markers::is_marker;
use crate::domain::types::{Attachment, GroupedCatalog, RichMessage};
use regex::{NoExpand, Regex, RegexBuilder};
use std::sync::LazyLock;

/// Placeholder invocation used by command documentation.
pub const PLACEHOLDER: &str = "hubot";
pub const ATTACHMENT_COLOR: &str = "#459d87";

static PLACEHOLDER_TIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{PLACEHOLDER}\s*")).expect("valid placeholder regex")
});
static PLACEHOLDER_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i)^{PLACEHOLDER}")).expect("valid placeholder regex"));
static MARKER_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(begin|end)\b").expect("valid marker regex"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:amp|lt|gt|quot|apos|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("valid entity regex")
});

/// Replaces the leading `hubot` placeholder with the assistant's display name.
///
/// A single-character name (e.g. `!`) is glued to the command verb.
pub fn substitute_name(line: &str, display_name: &str) -> String {
    let pattern = if display_name.chars().count() == 1 {
        &*PLACEHOLDER_TIGHT
    } else {
        &*PLACEHOLDER_WORD
    };
    pattern.replace(line, NoExpand(display_name)).into_owned()
}

/// Case-insensitive substring filter. `None` keeps everything.
pub fn matches_query(line: &str, query: Option<&str>) -> bool {
    match query {
        Some(q) => line.to_lowercase().contains(&q.to_lowercase()),
        None => true,
    }
}

pub fn rich(catalog: &GroupedCatalog) -> RichMessage {
    let attachments = catalog
        .in_render_order()
        .filter(|(_, lines)| !lines.is_empty())
        .map(|(title, lines)| Attachment {
            title: title.to_string(),
            color: ATTACHMENT_COLOR.to_string(),
            text: lines.join("\n"),
            collapsed: true,
        })
        .collect();
    RichMessage { attachments }
}

/// Escapes `&`, `<` and `>`. Existing entity references are left untouched,
/// so escaping twice yields the same text as escaping once.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        match ch {
            '&' if ENTITY.is_match(&text[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `<p>`-wrapped, escaped command lines with the assistant name in bold.
pub fn html(lines: &[String], bot_name: &str, query: Option<&str>) -> String {
    let name_pattern = (!bot_name.is_empty())
        .then(|| {
            RegexBuilder::new(&regex::escape(bot_name))
                .case_insensitive(true)
                .build()
                .ok()
        })
        .flatten();
    let bold_name = format!("<b>{}</b>", escape_html(bot_name));

    lines
        .iter()
        .filter(|line| !is_marker(line))
        .filter(|line| matches_query(line, query))
        .map(|line| {
            let body = match &name_pattern {
                Some(re) => bold_matches(line, re, &bold_name),
                None => escape_html(line),
            };
            format!("<p>{body}</p>")
        })
        .collect()
}

/// Escapes the text around each match and puts `bold` in place of the match.
fn bold_matches(line: &str, pattern: &Regex, bold: &str) -> String {
    let mut out = String::with_capacity(line.len() + bold.len());
    let mut last = 0;
    for m in pattern.find_iter(line) {
        out.push_str(&escape_html(&line[last..m.start()]));
        out.push_str(bold);
        last = m.end();
    }
    out.push_str(&escape_html(&line[last..]));
    out
}

/// Bolds the invocation part of a command line (everything before the first ` - `).
pub fn emphasize(line: &str) -> String {
    if MARKER_WORD.is_match(line) {
        return line.to_string();
    }
    match line.split_once(" - ") {
        Some((invocation, description)) => format!("**{invocation}** - {description}"),
        None => format!("**{line}**"),
    }
}

pub fn markdown(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| emphasize(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::OTHER_COMMANDS;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_substitute_name() {
        assert_eq!(substitute_name("hubot ping - pong", "rocketbot"), "rocketbot ping - pong");
        assert_eq!(substitute_name("Hubot ping - pong", "rocketbot"), "rocketbot ping - pong");
        assert_eq!(substitute_name("hubot ping - pong", "!"), "!ping - pong");
        assert_eq!(substitute_name("ping hubot - x", "bot"), "ping hubot - x");
        assert_eq!(substitute_name("hubot cost - $5", "$bot"), "$bot cost - $5");
    }

    #[test]
    fn test_rich_puts_other_commands_last() {
        let mut catalog = GroupedCatalog::new();
        catalog.push(OTHER_COMMANDS, "bot ping - pong");
        catalog.push("Alpha", "bot a - a");
        catalog.push("Alpha", "bot b - b");

        let message = rich(&catalog);
        assert_eq!(message.attachments.len(), 2);
        assert_eq!(message.attachments[0].title, "Alpha");
        assert_eq!(message.attachments[0].text, "bot a - a\nbot b - b");
        assert_eq!(message.attachments[0].color, ATTACHMENT_COLOR);
        assert!(message.attachments[0].collapsed);
        assert_eq!(message.attachments[1].title, OTHER_COMMANDS);
    }

    #[test]
    fn test_rich_skips_empty_groups() {
        let mut catalog = GroupedCatalog::new();
        catalog.insert("Admin tools".to_string(), Vec::new());
        catalog.push("Alpha", "bot a - a");
        let message = rich(&catalog);
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(message.attachments[0].title, "Alpha");
    }

    #[test]
    fn test_escape_once_per_character() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_html("&"), "&amp;");
        assert_eq!(escape_html("&amp;"), "&amp;");
        assert_eq!(escape_html("&#39; &x"), "&#39; &amp;x");
    }

    #[test]
    fn test_escape_is_idempotent() {
        for raw in ["<script>", "tom & jerry", "a &amp; b", "x <y> & z"] {
            let once = escape_html(raw);
            assert_eq!(escape_html(&once), once);
        }
        assert!(!escape_html(&escape_html("&")).contains("&amp;amp;"));
    }

    #[test]
    fn test_html_wraps_escapes_and_bolds_name() {
        let input = lines(&["rocketbot echo <text> - Reply back with <text>"]);
        let out = html(&input, "rocketbot", None);
        assert_eq!(
            out,
            "<p><b>rocketbot</b> echo &lt;text&gt; - Reply back with &lt;text&gt;</p>"
        );
    }

    #[test]
    fn test_html_name_inside_entity_names() {
        let input = lines(&["gt echo <x> - y"]);
        assert_eq!(html(&input, "gt", None), "<p><b>gt</b> echo &lt;x&gt; - y</p>");

        let input = lines(&["a & b"]);
        assert_eq!(html(&input, "a", None), "<p><b>a</b> &amp; b</p>");

        let input = lines(&["<b> - tag"]);
        assert_eq!(html(&input, "<b>", None), "<p><b>&lt;b&gt;</b> - tag</p>");
    }

    #[test]
    fn test_html_filter_and_marker_guard() {
        let input = lines(&[
            "begin group Alpha",
            "bot ping - pong",
            "bot deploy - ship",
            "end group",
        ]);
        let out = html(&input, "bot", Some("PING"));
        assert_eq!(out, "<p><b>bot</b> ping - pong</p>");
        let all = html(&input, "bot", None);
        assert_eq!(all.matches("<p>").count(), 2);
    }

    #[test]
    fn test_emphasize() {
        assert_eq!(emphasize("bot ping - pong"), "**bot ping** - pong");
        assert_eq!(emphasize("bot a - b - c"), "**bot a** - b - c");
        assert_eq!(emphasize("Admin only:"), "**Admin only:**");
        assert_eq!(emphasize("begin group Alpha"), "begin group Alpha");
        assert_eq!(emphasize("End admin"), "End admin");
        assert_eq!(emphasize("endpoint list - urls"), "**endpoint list** - urls");
    }

    #[test]
    fn test_markdown_joins_lines() {
        let input = lines(&["bot a - a", "bot b - b"]);
        assert_eq!(markdown(&input), "**bot a** - a\n**bot b** - b");
    }

    #[test]
    fn test_matches_query() {
        assert!(matches_query("bot Deploy - ship", Some("deploy")));
        assert!(!matches_query("bot ping - pong", Some("deploy")));
        assert!(matches_query("anything", None));
    }
}
