use super::events::Event;
use super::types::Command;

/// Trait for dispatching window commands.
///
/// Decouples command definitions from their execution. Front ends (CLI,
/// GUI shells) send commands here instead of calling the manager directly,
/// and react to the returned events instead of diffing snapshots.
///
/// # Semantics
///
/// - **Ordering**: Commands execute in the order received. No implicit batching.
/// - **Idempotency**: Repeating a close/minimize/restore is harmless; the
///   repeat simply produces no events.
/// - **Events**: On success, dispatch returns the events describing what
///   changed, in order. An empty vector means the command was a no-op.
pub trait Store<C> {
    type Error;
    fn dispatch(&mut self, cmd: Command<C>) -> Result<Vec<Event>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_trait_is_implementable() {
        struct RecordingStore {
            seen: Vec<&'static str>,
        }
        impl Store<()> for RecordingStore {
            type Error = String;
            fn dispatch(&mut self, cmd: Command<()>) -> Result<Vec<Event>, String> {
                self.seen.push(cmd.name());
                Ok(vec![])
            }
        }

        let mut store = RecordingStore { seen: vec![] };
        store.dispatch(Command::ClearAllWindows).unwrap();
        store.dispatch(Command::close("x")).unwrap();
        assert_eq!(store.seen, vec!["clear_all_windows", "close_window"]);
    }

    #[test]
    fn test_store_impl_can_return_error() {
        struct FailingStore;
        impl Store<()> for FailingStore {
            type Error = String;
            fn dispatch(&mut self, _cmd: Command<()>) -> Result<Vec<Event>, String> {
                Err("not implemented".to_string())
            }
        }
        let mut store = FailingStore;
        assert!(store.dispatch(Command::ClearAllWindows).is_err());
    }
}
