//! Dialog Commands

use super::{js_error, window};

/// Blocking notification
pub fn alert(message: &str) -> Result<(), String> {
    window()?.alert_with_message(message).map_err(js_error)
}

/// Blocking yes/no question
pub fn confirm(message: &str) -> Result<bool, String> {
    window()?.confirm_with_message(message).map_err(js_error)
}
