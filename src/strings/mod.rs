//! # Strings Module
//!
//! Centralizes user-facing strings, log lines, and the help page template.

pub mod help;
pub mod logs;
pub mod messages;
pub mod templates;
