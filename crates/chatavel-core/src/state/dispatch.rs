use std::convert::Infallible;

use tracing::debug;

use crate::state::events::Event;
use crate::state::store::Store;
use crate::state::types::Command;
use crate::windows::{SharedWindowManager, Transition, WindowId, WindowManager};

fn apply<C>(manager: &mut WindowManager<C>, cmd: Command<C>) -> Vec<Event> {
    let name = cmd.name();
    let (transition, id): (Transition, Option<WindowId>) = match cmd {
        Command::OpenWindow(spec) => {
            let id = spec.id.clone();
            (manager.open(spec), Some(id))
        }
        Command::CloseWindow { id } => (manager.close(id.as_str()), Some(id)),
        Command::MinimizeWindow { id } => (manager.minimize(id.as_str()), Some(id)),
        Command::RestoreWindow { id } => (manager.restore(id.as_str()), Some(id)),
        Command::ClearAllWindows => (manager.clear_all(), None),
    };

    let events: Vec<Event> = Event::from_transition(transition, id.as_ref())
        .into_iter()
        .collect();

    debug!(
        event = "core.state.dispatch_completed",
        command = name,
        event_count = events.len()
    );

    events
}

/// Window operations cannot fail, so neither can dispatching them.
impl<C> Store<C> for WindowManager<C> {
    type Error = Infallible;

    fn dispatch(&mut self, cmd: Command<C>) -> Result<Vec<Event>, Infallible> {
        Ok(apply(self, cmd))
    }
}

impl<C> Store<C> for SharedWindowManager<C> {
    type Error = Infallible;

    fn dispatch(&mut self, cmd: Command<C>) -> Result<Vec<Event>, Infallible> {
        Ok(self.with_manager(|manager| apply(manager, cmd)))
    }
}

/// Dispatch on a store whose error type is uninhabited.
pub fn dispatch_infallible<C, S>(store: &mut S, cmd: Command<C>) -> Vec<Event>
where
    S: Store<C, Error = Infallible>,
{
    match store.dispatch(cmd) {
        Ok(events) => events,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::WindowSpec;

    fn open(id: &str) -> Command<&'static str> {
        Command::OpenWindow(WindowSpec::new(id, id.to_uppercase(), "body"))
    }

    #[test]
    fn test_event_contract_per_command() {
        let mut manager = WindowManager::new();

        assert_eq!(
            dispatch_infallible(&mut manager, open("map")),
            vec![Event::WindowOpened { id: "map".into() }]
        );
        assert_eq!(
            dispatch_infallible(&mut manager, open("map")),
            vec![Event::WindowReopened { id: "map".into() }]
        );
        assert_eq!(
            dispatch_infallible(&mut manager, Command::minimize("map")),
            vec![Event::WindowMinimized { id: "map".into() }]
        );
        assert_eq!(
            dispatch_infallible(&mut manager, Command::restore("map")),
            vec![Event::WindowRestored { id: "map".into() }]
        );
        assert_eq!(
            dispatch_infallible(&mut manager, Command::close("map")),
            vec![Event::WindowClosed { id: "map".into() }]
        );
    }

    #[test]
    fn test_noop_commands_emit_no_events() {
        let mut manager: WindowManager<&'static str> = WindowManager::new();
        assert!(dispatch_infallible(&mut manager, Command::close("ghost")).is_empty());
        assert!(dispatch_infallible(&mut manager, Command::minimize("ghost")).is_empty());
        assert!(dispatch_infallible(&mut manager, Command::restore("ghost")).is_empty());
        assert!(dispatch_infallible(&mut manager, Command::ClearAllWindows).is_empty());
    }

    #[test]
    fn test_clear_all_reports_count() {
        let mut manager = WindowManager::new();
        dispatch_infallible(&mut manager, open("a"));
        dispatch_infallible(&mut manager, open("b"));
        assert_eq!(
            dispatch_infallible(&mut manager, Command::ClearAllWindows),
            vec![Event::WindowsCleared { count: 2 }]
        );
    }

    #[test]
    fn test_shared_manager_dispatch() {
        let mut shared = SharedWindowManager::new();
        let events = dispatch_infallible(&mut shared, open("chat"));
        assert_eq!(events, vec![Event::WindowOpened { id: "chat".into() }]);
        assert_eq!(shared.snapshot().len(), 1);
    }
}
