//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes help replies, suggestion replies, and catalog diagnostics.

pub const REPLIED_IN_PRIVATE: &str = "I just replied to you in private.";
pub const UNKNOWN_COMMAND: &str = "I don't know that command.";

pub fn no_matching_commands(query: &str) -> String {
    format!("No available commands match {query}")
}

pub fn did_you_mean(commands: &[String]) -> String {
    format!("Did you mean:\n{}", commands.join("\n"))
}

pub fn catalog_broken(err: &str) -> String {
    format!("⚠️ Help is unavailable: {err}")
}

pub fn catalog_unavailable(err: &str) -> String {
    format!("⚠️ Could not load the command catalog: {err}")
}
