//! Authentication collaborator.
//!
//! Users, their preferences, and the session the UI reads from. Window
//! management does not depend on anything here.

pub mod backend;
pub mod defaults;
pub mod errors;
pub mod memory;
pub mod session;
pub mod types;

pub use backend::{AuthBackend, AuthListener, AuthListeners, Subscription};
pub use errors::AuthError;
pub use memory::InMemoryAuthBackend;
pub use session::AuthSession;
pub use types::{
    AuthIdentity, AuthProvider, AuthState, Currency, DateFormat, DisplaySettings, FontSize,
    Language, NotificationSettings, PreferencesUpdate, PrivacySettings, ProfileVisibility,
    ProviderProfile, Theme, TimeFormat, User, UserPreferences, UserProfileUpdate,
};
