//! Lifecycle events shared by every front end.
//!
//! The app events bracket one CLI invocation. The session events bracket a
//! window session driven line by line, so its log can be read without the
//! rendered frames.

use tracing::{error, info, warn};

use crate::config::EscapeScope;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_app_shutdown() {
    info!(event = "core.app.shutdown_started");
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}

pub fn log_session_started(json_output: bool, escape_scope: EscapeScope, show_minimize: bool) {
    info!(
        event = "core.session.started",
        json_output = json_output,
        escape_scope = escape_scope.as_str(),
        show_minimize = show_minimize
    );
}

/// `line` is 1-based.
pub fn log_session_line_rejected(line: usize, message: &str) {
    warn!(event = "core.session.line_rejected", line = line, error = message);
}

/// A well-formed line whose action failed, such as a bad invite.
pub fn log_session_action_failed(action: &str, message: &str) {
    warn!(
        event = "core.session.action_failed",
        action = action,
        error = message
    );
}

pub fn log_session_completed(steps: usize, open_windows: usize) {
    info!(
        event = "core.session.completed",
        steps = steps,
        open_windows = open_windows
    );
}
