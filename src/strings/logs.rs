//! # Log Strings
//!
//! Format helpers for log lines emitted by the bot runtime.

pub fn config_loaded(path: &str) -> String {
    format!("Loaded configuration from {path}")
}

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn setting_display_name(name: &str) -> String {
    format!("Setting display name to: {name}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub fn http_listening(addr: &str, path: &str) -> String {
    format!("Serving help page on http://{addr}{path}")
}

pub fn http_fail(err: &str) -> String {
    format!("Help page server stopped: {err}")
}

pub fn invite_received(room_id: &str) -> String {
    format!("💌 Received invite for room {room_id:?}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}

pub fn catalog_error(room: &str, keyword: &str, err: &str) -> String {
    format!("Help catalog for room {room} has unbalanced '{keyword}' markers: {err}")
}
