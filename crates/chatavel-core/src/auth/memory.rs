use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::backend::{AuthBackend, AuthListener, AuthListeners, Subscription};
use super::defaults::{
    FALLBACK_DISPLAY_NAME, GUEST_DISPLAY_NAME, MIN_PASSWORD_LEN, guest_preferences,
    member_preferences,
};
use super::errors::AuthError;
use super::types::{
    AuthIdentity, AuthProvider, ProviderProfile, User, UserPreferences, UserProfileUpdate,
};

struct PasswordAccount {
    uid: String,
    password: String,
}

/// Process-local identity service and user document store.
///
/// Backs the `session` command and the tests. Nothing is persisted.
#[derive(Default)]
pub struct InMemoryAuthBackend {
    /// Keyed by lowercased email.
    accounts: HashMap<String, PasswordAccount>,
    provider_accounts: HashMap<(AuthProvider, String), String>,
    documents: HashMap<String, User>,
    current: Option<AuthIdentity>,
    listeners: AuthListeners,
}

impl InMemoryAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored user documents.
    pub fn user_count(&self) -> usize {
        self.documents.len()
    }

    fn new_uid() -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn create_document(
        &mut self,
        uid: &str,
        email: &str,
        display_name: &str,
        photo_url: Option<String>,
        preferences: UserPreferences,
    ) -> User {
        let now = Utc::now();
        let user = User {
            uid: uid.to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            photo_url,
            phone_number: None,
            created_at: now,
            last_login_at: now,
            is_online: true,
            preferences,
        };
        self.documents.insert(uid.to_string(), user.clone());
        user
    }

    fn touch_login(&mut self, uid: &str) -> Result<User, AuthError> {
        let user = self
            .documents
            .get_mut(uid)
            .ok_or_else(|| AuthError::UserNotFound {
                uid: uid.to_string(),
            })?;
        user.last_login_at = Utc::now();
        user.is_online = true;
        Ok(user.clone())
    }

    fn set_current(&mut self, identity: Option<AuthIdentity>) {
        if self.current == identity {
            return;
        }
        self.current = identity;
        self.listeners.notify(self.current.as_ref());
    }
}

/// `local@domain` with both parts non-empty and no whitespace.
pub(crate) fn looks_like_email(email: &str) -> bool {
    !email.contains(char::is_whitespace)
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    if looks_like_email(email) {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail {
            email: email.to_string(),
        })
    }
}

fn member_identity(user: &User) -> AuthIdentity {
    AuthIdentity {
        uid: user.uid.clone(),
        email: Some(user.email.clone()),
        display_name: Some(user.display_name.clone()),
        is_anonymous: false,
    }
}

fn non_empty(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|v| !v.is_empty())
}

impl AuthBackend for InMemoryAuthBackend {
    fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, AuthError> {
        validate_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        let key = email.to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(AuthError::EmailAlreadyInUse {
                email: email.to_string(),
            });
        }

        let uid = Self::new_uid();
        self.accounts.insert(
            key,
            PasswordAccount {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        let user = self.create_document(&uid, email, display_name, None, member_preferences());

        info!(event = "core.auth.sign_up_completed", uid = %user.uid);
        self.set_current(Some(member_identity(&user)));
        Ok(user)
    }

    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let uid = match self.accounts.get(&email.to_lowercase()) {
            Some(account) if account.password == password => account.uid.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        let user = self.touch_login(&uid)?;

        info!(event = "core.auth.sign_in_completed", uid = %user.uid);
        self.set_current(Some(member_identity(&user)));
        Ok(user)
    }

    fn sign_in_with_provider(&mut self, profile: &ProviderProfile) -> Result<User, AuthError> {
        validate_email(&profile.email)?;
        let key = (profile.provider, profile.email.to_lowercase());

        let existing = self
            .provider_accounts
            .get(&key)
            .filter(|uid| self.documents.contains_key(*uid))
            .cloned();
        let user = match existing {
            Some(uid) => self.touch_login(&uid)?,
            None => {
                let uid = Self::new_uid();
                self.provider_accounts.insert(key, uid.clone());
                let display_name = non_empty(&profile.display_name)
                    .map(String::as_str)
                    .unwrap_or(FALLBACK_DISPLAY_NAME);
                debug!(
                    event = "core.auth.provider_document_created",
                    provider = %profile.provider,
                    uid = %uid
                );
                self.create_document(
                    &uid,
                    &profile.email,
                    display_name,
                    profile.photo_url.clone(),
                    member_preferences(),
                )
            }
        };

        info!(
            event = "core.auth.provider_sign_in_completed",
            provider = %profile.provider,
            uid = %user.uid
        );
        self.set_current(Some(member_identity(&user)));
        Ok(user)
    }

    fn sign_in_as_guest(&mut self) -> Result<User, AuthError> {
        let uid = Self::new_uid();
        let user = self.create_document(&uid, "", GUEST_DISPLAY_NAME, None, guest_preferences());

        info!(event = "core.auth.guest_sign_in_completed", uid = %user.uid);
        self.set_current(Some(AuthIdentity {
            uid: user.uid.clone(),
            email: None,
            display_name: Some(user.display_name.clone()),
            is_anonymous: true,
        }));
        Ok(user)
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        let Some(identity) = self.current.clone() else {
            debug!(event = "core.auth.sign_out_skipped", reason = "not_signed_in");
            return Ok(());
        };
        if let Some(user) = self.documents.get_mut(&identity.uid) {
            user.is_online = false;
        }

        info!(event = "core.auth.sign_out_completed", uid = %identity.uid);
        self.set_current(None);
        Ok(())
    }

    fn get_user(&self, uid: &str) -> Result<User, AuthError> {
        self.documents
            .get(uid)
            .cloned()
            .ok_or_else(|| AuthError::UserNotFound {
                uid: uid.to_string(),
            })
    }

    fn update_profile(&mut self, uid: &str, update: &UserProfileUpdate) -> Result<(), AuthError> {
        let user = self
            .documents
            .get_mut(uid)
            .ok_or_else(|| AuthError::UserNotFound {
                uid: uid.to_string(),
            })?;

        if let Some(name) = non_empty(&update.display_name) {
            user.display_name = name.clone();
        }
        if let Some(photo) = non_empty(&update.photo_url) {
            user.photo_url = Some(photo.clone());
        }
        if let Some(phone) = non_empty(&update.phone_number) {
            user.phone_number = Some(phone.clone());
        }
        if let Some(preferences) = &update.preferences {
            user.preferences.apply(preferences);
        }
        let display_name = user.display_name.clone();

        if let Some(current) = self.current.as_mut().filter(|c| c.uid == uid) {
            current.display_name = Some(display_name);
        }

        info!(event = "core.auth.profile_updated", uid = %uid);
        Ok(())
    }

    fn current_identity(&self) -> Option<AuthIdentity> {
        self.current.clone()
    }

    fn on_auth_state_changed(&mut self, mut listener: AuthListener) -> Subscription {
        listener(self.current.as_ref());
        self.listeners.subscribe(listener)
    }
}
