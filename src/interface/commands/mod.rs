//! # Command Handlers
//!
//! Handler functions for the help command and for unmatched messages.
//! These handlers are invoked by the Router.

pub mod help;
pub mod suggest;
