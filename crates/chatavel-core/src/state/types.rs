use serde::{Deserialize, Serialize};

use crate::windows::{WindowId, WindowSpec};

/// All window operations that can be dispatched through the store.
///
/// Commands own their data so they can be serialized, queued, and sent
/// across boundaries. `C` is the opaque window content payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command<C> {
    /// Open a window, or refresh and un-minimize the one with the same id.
    OpenWindow(WindowSpec<C>),
    /// Remove a window (visible or minimized).
    CloseWindow { id: WindowId },
    /// Move a window from the surface to the taskbar.
    MinimizeWindow { id: WindowId },
    /// Move a window from the taskbar back to the surface.
    RestoreWindow { id: WindowId },
    /// Remove every window.
    ClearAllWindows,
}

impl<C> Command<C> {
    pub fn close(id: impl Into<WindowId>) -> Self {
        Command::CloseWindow { id: id.into() }
    }

    pub fn minimize(id: impl Into<WindowId>) -> Self {
        Command::MinimizeWindow { id: id.into() }
    }

    pub fn restore(id: impl Into<WindowId>) -> Self {
        Command::RestoreWindow { id: id.into() }
    }

    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Command::OpenWindow(_) => "open_window",
            Command::CloseWindow { .. } => "close_window",
            Command::MinimizeWindow { .. } => "minimize_window",
            Command::RestoreWindow { .. } => "restore_window",
            Command::ClearAllWindows => "clear_all_windows",
        }
    }
}
