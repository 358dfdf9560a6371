//! # Application Layer
//!
//! Contains the help catalog pipeline and the orchestration of the bot.
//! This includes marker grouping, access tiers, rendering, suggestions, and command routing.

pub mod access;
pub mod assembler;
pub mod catalog;
pub mod markers;
pub mod matcher;
pub mod render;
pub mod router;
pub mod suggest;
