//! # Help Text
//!
//! Documentation lines for the help feature itself.
//! Contributed to the catalog ahead of every other feature.

pub const COMMANDS: &[&str] = &[
    "hubot help - Displays all of the help commands that this bot knows about.",
    "hubot help <query> - Displays all help commands that match <query>.",
];
