use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, warn};

use super::backend::{AuthBackend, Subscription};
use super::errors::AuthError;
use super::types::{AuthState, ProviderProfile, User, UserProfileUpdate};
use crate::errors::ChatavelError;

/// Identity changes observed by the listener, waiting to be applied.
type PendingChanges = Rc<RefCell<VecDeque<Option<String>>>>;

/// Consumer-facing view of authentication.
///
/// Operations never return errors. They report success as a `bool` and
/// leave the failure message in [`AuthState::error`] until the next
/// operation or [`clear_error`](Self::clear_error).
pub struct AuthSession<B: AuthBackend> {
    backend: B,
    state: AuthState,
    pending: PendingChanges,
    _subscription: Subscription,
}

impl<B: AuthBackend> AuthSession<B> {
    pub fn new(mut backend: B) -> Self {
        let pending: PendingChanges = Rc::default();
        let sink = Rc::clone(&pending);
        let subscription = backend.on_auth_state_changed(Box::new(move |identity| {
            sink.borrow_mut()
                .push_back(identity.map(|identity| identity.uid.clone()));
        }));

        let mut session = Self {
            backend,
            state: AuthState::default(),
            pending,
            _subscription: subscription,
        };
        session.apply_pending();
        session
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn sign_up(&mut self, email: &str, password: &str, display_name: &str) -> bool {
        self.run("sign_up", |backend| {
            backend.sign_up(email, password, display_name).map(drop)
        })
        .is_some()
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> bool {
        self.run("sign_in", |backend| backend.sign_in(email, password).map(drop))
            .is_some()
    }

    pub fn sign_in_with_provider(&mut self, profile: &ProviderProfile) -> bool {
        self.run("provider_sign_in", |backend| {
            backend.sign_in_with_provider(profile).map(drop)
        })
        .is_some()
    }

    pub fn sign_in_as_guest(&mut self) -> bool {
        self.run("guest_sign_in", |backend| backend.sign_in_as_guest().map(drop))
            .is_some()
    }

    pub fn sign_out(&mut self) -> bool {
        self.run("sign_out", |backend| backend.sign_out()).is_some()
    }

    /// Updates the signed-in user's document and refreshes [`AuthState::user`].
    /// Returns false without touching the state when nobody is signed in.
    pub fn update_profile(&mut self, update: &UserProfileUpdate) -> bool {
        let Some(uid) = self.state.user.as_ref().map(|user| user.uid.clone()) else {
            debug!(event = "core.auth.update_profile_skipped", reason = "not_signed_in");
            return false;
        };

        let refreshed = self.run("update_profile", |backend| {
            backend.update_profile(&uid, update)?;
            backend.get_user(&uid)
        });
        match refreshed {
            Some(user) => {
                self.state.user = Some(user);
                true
            }
            None => false,
        }
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    fn run<T>(
        &mut self,
        operation: &'static str,
        op: impl FnOnce(&mut B) -> Result<T, AuthError>,
    ) -> Option<T> {
        self.state.is_loading = true;
        self.state.error = None;

        match op(&mut self.backend) {
            Ok(value) => {
                self.apply_pending();
                self.state.is_loading = false;
                Some(value)
            }
            Err(e) => {
                warn!(
                    event = "core.auth.operation_failed",
                    operation = operation,
                    error_code = e.error_code(),
                    error = %e
                );
                self.state.is_loading = false;
                self.state.error = Some(e.to_string());
                None
            }
        }
    }

    fn apply_pending(&mut self) {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(change) => self.apply_identity(change),
                None => break,
            }
        }
    }

    fn apply_identity(&mut self, uid: Option<String>) {
        self.state = match uid {
            None => AuthState {
                user: None,
                is_loading: false,
                is_authenticated: false,
                error: None,
            },
            Some(uid) => match self.backend.get_user(&uid) {
                Ok(user) => AuthState {
                    user: Some(user),
                    is_loading: false,
                    is_authenticated: true,
                    error: None,
                },
                Err(e) => {
                    warn!(
                        event = "core.auth.user_load_failed",
                        uid = %uid,
                        error = %e
                    );
                    AuthState {
                        user: None,
                        is_loading: false,
                        is_authenticated: false,
                        error: Some(e.to_string()),
                    }
                }
            },
        };
    }
}
