//! # Marker Grouping
//!
//! Splits an ordered list of catalog lines into named buckets using paired
//! `begin <keyword> <label>` / `end <keyword>` sentinel lines.
//!
//! The scan is a two-state machine (`Idle`, `InBlock`). Each line is first
//! classified for the parser's keyword, then fed through [`transition`], so
//! both structural errors are single entries of the transition table.

use crate::domain::types::{GroupedCatalog, OTHER_COMMANDS};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use thiserror::Error;

pub const GROUP_KEYWORD: &str = "group";
pub const ADMIN_KEYWORD: &str = "admin";

static ANY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    marker_pattern(&format!("{GROUP_KEYWORD}|{ADMIN_KEYWORD}"))
});

/// Structural errors in contributed command documentation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("In some script the opening marker was not found.")]
    OpeningMarkerMissing { keyword: String },
    #[error("{} the closing marker was not found.", script_ref(.label))]
    ClosingMarkerMissing { keyword: String, label: String },
}

impl MarkerError {
    pub fn keyword(&self) -> &str {
        match self {
            MarkerError::OpeningMarkerMissing { keyword } => keyword,
            MarkerError::ClosingMarkerMissing { keyword, .. } => keyword,
        }
    }
}

fn script_ref(label: &str) -> String {
    if label.is_empty() {
        "In some script".to_string()
    } else {
        format!("In the script \"{label}\"")
    }
}

/// How a single line relates to the parser's keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Begin(&'a str),
    End,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParserState {
    Idle,
    InBlock { label: String },
}

fn marker_pattern(keywords: &str) -> Regex {
    RegexBuilder::new(&format!(r"^\s*(begin|end)\s*(?:{keywords})\s*(.*)$"))
        .case_insensitive(true)
        .build()
        .expect("marker pattern is a valid regex")
}

/// True for any `begin/end group` or `begin/end admin` line.
pub fn is_marker(line: &str) -> bool {
    ANY_MARKER.is_match(line)
}

#[derive(Debug, Clone)]
pub struct MarkerGroupParser {
    keyword: String,
    pattern: Regex,
}

impl MarkerGroupParser {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            pattern: marker_pattern(&regex::escape(keyword)),
        }
    }

    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let Some(caps) = self.pattern.captures(line) else {
            return LineKind::Plain;
        };
        let label = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
            Some("begin") => LineKind::Begin(label),
            _ => LineKind::End,
        }
    }

    /// Groups `entries` by the labels of this parser's markers.
    ///
    /// Lines outside any block land in `Other commands`. Marker lines are
    /// consumed; lines carrying another keyword's markers are kept as plain
    /// lines. Either the complete mapping or a single error is returned.
    pub fn parse<S: AsRef<str>>(&self, entries: &[S]) -> Result<GroupedCatalog, MarkerError> {
        let mut buckets = GroupedCatalog::new();
        let mut state = ParserState::Idle;

        for entry in entries {
            let line = entry.as_ref();
            state = self.transition(state, self.classify(line), line, &mut buckets)?;
        }

        match state {
            ParserState::Idle => Ok(buckets),
            ParserState::InBlock { label } => Err(self.closing_missing(label)),
        }
    }

    fn transition(
        &self,
        state: ParserState,
        kind: LineKind<'_>,
        line: &str,
        buckets: &mut GroupedCatalog,
    ) -> Result<ParserState, MarkerError> {
        match (state, kind) {
            (ParserState::InBlock { label }, LineKind::Begin(_)) => {
                Err(self.closing_missing(label))
            }
            (ParserState::Idle, LineKind::End) => Err(MarkerError::OpeningMarkerMissing {
                keyword: self.keyword.clone(),
            }),
            (ParserState::Idle, LineKind::Begin(label)) => Ok(ParserState::InBlock {
                label: label.to_string(),
            }),
            (ParserState::InBlock { .. }, LineKind::End) => Ok(ParserState::Idle),
            (ParserState::InBlock { label }, LineKind::Plain) => {
                buckets.push(&label, line);
                Ok(ParserState::InBlock { label })
            }
            (ParserState::Idle, LineKind::Plain) => {
                buckets.push(OTHER_COMMANDS, line);
                Ok(ParserState::Idle)
            }
        }
    }

    fn closing_missing(&self, label: String) -> MarkerError {
        MarkerError::ClosingMarkerMissing {
            keyword: self.keyword.clone(),
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input_has_no_buckets() {
        let parser = MarkerGroupParser::new(GROUP_KEYWORD);
        let empty: Vec<String> = Vec::new();
        assert!(parser.parse(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_partition_preserves_order() {
        let parser = MarkerGroupParser::new(GROUP_KEYWORD);
        let entries = lines(&[
            "hubot a - a",
            "begin group Alpha",
            "hubot b - b",
            "hubot c - c",
            "end group",
            "hubot d - d",
            "begin group Beta",
            "hubot e - e",
            "end group",
        ]);
        let grouped = parser.parse(&entries).unwrap();

        let names: Vec<&str> = grouped.names().collect();
        assert_eq!(names, vec![OTHER_COMMANDS, "Alpha", "Beta"]);
        assert_eq!(grouped.get(OTHER_COMMANDS).unwrap(), ["hubot a - a", "hubot d - d"]);
        assert_eq!(grouped.get("Alpha").unwrap(), ["hubot b - b", "hubot c - c"]);
        assert_eq!(grouped.get("Beta").unwrap(), ["hubot e - e"]);
        assert_eq!(grouped.line_count(), 5);
    }

    #[test]
    fn test_other_commands_absent_when_everything_grouped() {
        let parser = MarkerGroupParser::new(GROUP_KEYWORD);
        let entries = lines(&["begin group Alpha", "hubot a - a", "end group"]);
        let grouped = parser.parse(&entries).unwrap();
        assert!(!grouped.contains(OTHER_COMMANDS));
    }

    #[test]
    fn test_lone_end_is_opening_marker_missing() {
        let parser = MarkerGroupParser::new(GROUP_KEYWORD);
        let entries = lines(&["hubot a - a", "end group", "hubot b - b"]);
        let err = parser.parse(&entries).unwrap_err();
        assert_eq!(
            err,
            MarkerError::OpeningMarkerMissing {
                keyword: "group".to_string()
            }
        );
        assert_eq!(err.to_string(), "In some script the opening marker was not found.");
    }

    #[test]
    fn test_second_begin_names_first_label() {
        let parser = MarkerGroupParser::new(GROUP_KEYWORD);
        let entries = lines(&["begin group A", "hubot a - a", "begin group B", "end group"]);
        let err = parser.parse(&entries).unwrap_err();
        assert_eq!(
            err,
            MarkerError::ClosingMarkerMissing {
                keyword: "group".to_string(),
                label: "A".to_string()
            }
        );
        assert_eq!(err.to_string(), "In the script \"A\" the closing marker was not found.");
    }

    #[test]
    fn test_unclosed_block_at_end_of_input() {
        let parser = MarkerGroupParser::new(GROUP_KEYWORD);
        let entries = lines(&["begin group A", "hubot a - a"]);
        let err = parser.parse(&entries).unwrap_err();
        assert!(matches!(err, MarkerError::ClosingMarkerMissing { ref label, .. } if label == "A"));
    }

    #[test]
    fn test_unlabeled_block_reports_some_script() {
        let parser = MarkerGroupParser::new(ADMIN_KEYWORD);
        let err = parser.parse(&lines(&["begin admin", "x"])).unwrap_err();
        assert_eq!(err.to_string(), "In some script the closing marker was not found.");
        assert_eq!(err.keyword(), "admin");
    }

    #[test]
    fn test_other_keyword_markers_are_plain() {
        let parser = MarkerGroupParser::new(GROUP_KEYWORD);
        let entries = lines(&[
            "begin group Alpha",
            "begin admin",
            "hubot secret - s",
            "end admin",
            "end group",
        ]);
        let grouped = parser.parse(&entries).unwrap();
        assert_eq!(
            grouped.get("Alpha").unwrap(),
            ["begin admin", "hubot secret - s", "end admin"]
        );
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let parser = MarkerGroupParser::new(GROUP_KEYWORD);
        let entries = lines(&["BEGIN Group  Deploy tools ", "hubot deploy - d", "End GROUP"]);
        let grouped = parser.parse(&entries).unwrap();
        assert_eq!(grouped.get("Deploy tools").unwrap(), ["hubot deploy - d"]);
    }

    #[test]
    fn test_classify() {
        let parser = MarkerGroupParser::new(ADMIN_KEYWORD);
        assert_eq!(parser.classify("begin admin"), LineKind::Begin(""));
        assert_eq!(parser.classify("end admin"), LineKind::End);
        assert_eq!(parser.classify("hubot weekend admin - x"), LineKind::Plain);
        assert_eq!(parser.classify("begin group X"), LineKind::Plain);
    }

    #[test]
    fn test_is_marker() {
        assert!(is_marker("begin group Alpha"));
        assert!(is_marker("end admin"));
        assert!(!is_marker("hubot begin - starts things"));
    }
}
