use serde::{Deserialize, Serialize};

use crate::windows::{Transition, WindowId};

/// Window state changes that resulted from a dispatched command.
///
/// Each variant describes _what happened_. A command that changed nothing
/// produces no event at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A new window was appended to the stack.
    WindowOpened { id: WindowId },
    /// An existing window was refreshed in place and is visible again.
    WindowReopened { id: WindowId },
    WindowClosed { id: WindowId },
    WindowMinimized { id: WindowId },
    WindowRestored { id: WindowId },
    /// Every window was removed.
    WindowsCleared { count: usize },
}

impl Event {
    /// Translate a manager transition into an event for `id`.
    pub fn from_transition(transition: Transition, id: Option<&WindowId>) -> Option<Self> {
        let event = match (transition, id) {
            (Transition::Opened, Some(id)) => Event::WindowOpened { id: id.clone() },
            (Transition::Reopened, Some(id)) => Event::WindowReopened { id: id.clone() },
            (Transition::Closed, Some(id)) => Event::WindowClosed { id: id.clone() },
            (Transition::Minimized, Some(id)) => Event::WindowMinimized { id: id.clone() },
            (Transition::Restored, Some(id)) => Event::WindowRestored { id: id.clone() },
            (Transition::Cleared { count }, _) => Event::WindowsCleared { count },
            _ => return None,
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_roundtrip() {
        let event = Event::WindowOpened {
            id: WindowId::from("map"),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }

    #[test]
    fn test_unchanged_transition_has_no_event() {
        let id = WindowId::from("map");
        assert_eq!(Event::from_transition(Transition::Unchanged, Some(&id)), None);
    }

    #[test]
    fn test_cleared_transition_needs_no_id() {
        assert_eq!(
            Event::from_transition(Transition::Cleared { count: 3 }, None),
            Some(Event::WindowsCleared { count: 3 })
        );
    }
}
