//! Identity service seam.
//!
//! The window stack and the views never touch this module. Anything that
//! needs the signed-in user goes through [`AuthSession`](super::AuthSession),
//! which sits on top of an [`AuthBackend`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::errors::AuthError;
use super::types::{AuthIdentity, ProviderProfile, User, UserProfileUpdate};

/// Callback for identity changes. Receives `None` on sign-out.
pub type AuthListener = Box<dyn FnMut(Option<&AuthIdentity>)>;

/// Account creation, sign-in and user documents.
///
/// Single-threaded: listeners are plain closures invoked synchronously on
/// the thread that caused the change.
pub trait AuthBackend {
    fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, AuthError>;

    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Creates the user document on first sign-in, refreshes it afterwards.
    fn sign_in_with_provider(&mut self, profile: &ProviderProfile) -> Result<User, AuthError>;

    fn sign_in_as_guest(&mut self) -> Result<User, AuthError>;

    /// Marks the current user offline and clears the identity.
    /// Signing out while signed out is not an error.
    fn sign_out(&mut self) -> Result<(), AuthError>;

    fn get_user(&self, uid: &str) -> Result<User, AuthError>;

    fn update_profile(&mut self, uid: &str, update: &UserProfileUpdate) -> Result<(), AuthError>;

    fn current_identity(&self) -> Option<AuthIdentity>;

    /// Registers `listener` and immediately calls it with the current identity.
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    fn on_auth_state_changed(&mut self, listener: AuthListener) -> Subscription;
}

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    listeners: Vec<(u64, AuthListener)>,
    /// Ids unsubscribed while their listener was out of the table being called.
    removed_during_notify: Vec<u64>,
}

/// Listener registry shared between a backend and its subscriptions.
#[derive(Clone, Default)]
pub struct AuthListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl AuthListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: AuthListener) -> Subscription {
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.listeners.push((id, listener));
        Subscription {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Calls every registered listener. Listeners may subscribe or
    /// unsubscribe from inside the callback.
    pub fn notify(&self, identity: Option<&AuthIdentity>) {
        let mut running = std::mem::take(&mut self.table.borrow_mut().listeners);
        for (_, listener) in running.iter_mut() {
            listener(identity);
        }

        let mut table = self.table.borrow_mut();
        let removed = std::mem::take(&mut table.removed_during_notify);
        running.retain(|(id, _)| !removed.contains(id));
        let added = std::mem::take(&mut table.listeners);
        running.extend(added);
        table.listeners = running;
    }

    pub fn len(&self) -> usize {
        self.table.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    table: Weak<RefCell<ListenerTable>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };
        let Ok(mut table) = table.try_borrow_mut() else {
            return;
        };
        let before = table.listeners.len();
        table.listeners.retain(|(id, _)| *id != self.id);
        if table.listeners.len() == before {
            table.removed_during_notify.push(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(uid: &str) -> AuthIdentity {
        AuthIdentity {
            uid: uid.to_string(),
            email: None,
            display_name: None,
            is_anonymous: false,
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<Option<String>>>>, AuthListener) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listener: AuthListener =
            Box::new(move |id| sink.borrow_mut().push(id.map(|i| i.uid.clone())));
        (seen, listener)
    }

    #[test]
    fn test_notify_reaches_subscribers() {
        let listeners = AuthListeners::new();
        let (seen, listener) = recorder();
        let _sub = listeners.subscribe(listener);

        listeners.notify(Some(&identity("u1")));
        listeners.notify(None);

        assert_eq!(*seen.borrow(), vec![Some("u1".to_string()), None]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let listeners = AuthListeners::new();
        let (seen, listener) = recorder();
        let sub = listeners.subscribe(listener);
        assert_eq!(listeners.len(), 1);

        sub.unsubscribe();
        assert!(listeners.is_empty());

        listeners.notify(None);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_from_inside_callback() {
        let listeners = AuthListeners::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));

        let slot_in = Rc::clone(&slot);
        let calls_in = Rc::clone(&calls);
        let sub = listeners.subscribe(Box::new(move |_| {
            *calls_in.borrow_mut() += 1;
            slot_in.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(sub);

        listeners.notify(None);
        listeners.notify(None);

        assert_eq!(*calls.borrow(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let listeners = AuthListeners::new();
        let (_seen, listener) = recorder();
        let sub = listeners.subscribe(listener);
        drop(listeners);
        drop(sub);
    }
}
