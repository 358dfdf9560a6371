//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, AdminDirectory)
//! and serves the HTML help page.

pub mod admin;
pub mod http;
pub mod matrix;

#[cfg(test)]
pub mod mock;
