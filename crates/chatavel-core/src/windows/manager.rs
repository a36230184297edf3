use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use super::stack::WindowStack;
use super::types::{Transition, WindowSpec};

/// Single writer of the window stack.
///
/// Holds the current snapshot behind an `Arc` and replaces it wholesale on
/// every effective mutation. Anyone holding a snapshot from [`snapshot`]
/// keeps seeing exactly that state; there is no partially-applied update to
/// observe. Operations that change nothing keep the current snapshot, so
/// `Arc::ptr_eq` on two snapshots tells whether anything happened.
///
/// Every operation is total: unknown ids are no-ops, never errors.
///
/// [`snapshot`]: WindowManager::snapshot
#[derive(Debug)]
pub struct WindowManager<C> {
    current: Arc<WindowStack<C>>,
}

impl<C> Default for WindowManager<C> {
    fn default() -> Self {
        Self {
            current: Arc::new(WindowStack::default()),
        }
    }
}

impl<C> WindowManager<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, cheap to clone and safe to hold across mutations.
    pub fn snapshot(&self) -> Arc<WindowStack<C>> {
        Arc::clone(&self.current)
    }

    /// Borrow the current snapshot.
    pub fn windows(&self) -> &WindowStack<C> {
        &self.current
    }

    /// Open a window, or refresh and un-minimize an existing one in place.
    pub fn open(&mut self, spec: WindowSpec<C>) -> Transition {
        let id = spec.id.clone();
        let (next, created) = self.current.with_opened(spec);
        self.current = Arc::new(next);

        if created {
            info!(
                event = "core.windows.opened",
                window_id = %id,
                window_count = self.current.len()
            );
            Transition::Opened
        } else {
            info!(
                event = "core.windows.reopened",
                window_id = %id,
                position = ?self.current.position(id.as_str())
            );
            Transition::Reopened
        }
    }

    /// Remove a window, whether it is visible or minimized.
    pub fn close(&mut self, id: &str) -> Transition {
        match self.current.with_closed(id) {
            Some(next) => {
                self.current = Arc::new(next);
                info!(
                    event = "core.windows.closed",
                    window_id = id,
                    window_count = self.current.len()
                );
                Transition::Closed
            }
            None => self.unchanged("close", id),
        }
    }

    pub fn minimize(&mut self, id: &str) -> Transition {
        match self.current.with_minimized(id) {
            Some(next) => {
                self.current = Arc::new(next);
                info!(event = "core.windows.minimized", window_id = id);
                Transition::Minimized
            }
            None => self.unchanged("minimize", id),
        }
    }

    pub fn restore(&mut self, id: &str) -> Transition {
        match self.current.with_restored(id) {
            Some(next) => {
                self.current = Arc::new(next);
                info!(event = "core.windows.restored", window_id = id);
                Transition::Restored
            }
            None => self.unchanged("restore", id),
        }
    }

    /// Drop every window unconditionally.
    pub fn clear_all(&mut self) -> Transition {
        let count = self.current.len();
        match self.current.with_cleared() {
            Some(next) => {
                self.current = Arc::new(next);
                info!(event = "core.windows.cleared", count = count);
                Transition::Cleared { count }
            }
            None => {
                debug!(event = "core.windows.clear_skipped", reason = "already_empty");
                Transition::Unchanged
            }
        }
    }

    fn unchanged(&self, operation: &'static str, id: &str) -> Transition {
        debug!(
            event = "core.windows.operation_skipped",
            operation = operation,
            window_id = id,
            present = self.current.get(id).is_some()
        );
        Transition::Unchanged
    }
}

/// Thread-safe handle around a [`WindowManager`] for hosts with more than
/// one event source (multiple native windows, worker threads).
///
/// Writers serialize through the mutex; readers only hold the lock long
/// enough to clone the current `Arc`, so they always get a whole snapshot.
#[derive(Debug)]
pub struct SharedWindowManager<C> {
    inner: Arc<Mutex<WindowManager<C>>>,
}

impl<C> Clone for SharedWindowManager<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> Default for SharedWindowManager<C> {
    fn default() -> Self {
        Self::from_manager(WindowManager::default())
    }
}

impl<C> SharedWindowManager<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manager(manager: WindowManager<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn snapshot(&self) -> Arc<WindowStack<C>> {
        self.lock().snapshot()
    }

    pub fn open(&self, spec: WindowSpec<C>) -> Transition {
        self.lock().open(spec)
    }

    pub fn close(&self, id: &str) -> Transition {
        self.lock().close(id)
    }

    pub fn minimize(&self, id: &str) -> Transition {
        self.lock().minimize(id)
    }

    pub fn restore(&self, id: &str) -> Transition {
        self.lock().restore(id)
    }

    pub fn clear_all(&self) -> Transition {
        self.lock().clear_all()
    }

    /// Run several operations as one critical section.
    pub fn with_manager<R>(&self, f: impl FnOnce(&mut WindowManager<C>) -> R) -> R {
        f(&mut self.lock())
    }

    // A panic can only interrupt a writer before its single `Arc` swap, so
    // the stored snapshot is always whole and a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, WindowManager<C>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
