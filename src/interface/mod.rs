//! # Interface Layer
//!
//! User-facing entry points invoked by the Router.

pub mod commands;
