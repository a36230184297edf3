//! Default preferences for new accounts.

use super::types::{
    Currency, DateFormat, DisplaySettings, FontSize, Language, NotificationSettings,
    PrivacySettings, ProfileVisibility, Theme, TimeFormat, UserPreferences,
};

/// Display name for guest accounts.
pub const GUEST_DISPLAY_NAME: &str = "Guest";

/// Display name for provider accounts that do not share one.
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

fn default_display() -> DisplaySettings {
    DisplaySettings {
        theme: Theme::Auto,
        font_size: FontSize::Medium,
        currency: Currency::Jpy,
        date_format: DateFormat::YearMonthDay,
        time_format: TimeFormat::TwentyFourHour,
    }
}

/// Preferences for registered (email or provider) accounts.
pub fn member_preferences() -> UserPreferences {
    UserPreferences {
        notifications: NotificationSettings {
            push_notifications: true,
            email_notifications: true,
            chat_notifications: true,
            expense_notifications: true,
            trip_updates: true,
        },
        privacy: PrivacySettings {
            profile_visibility: ProfileVisibility::Friends,
            location_sharing: true,
            online_status: true,
        },
        display: default_display(),
        language: Language::Ja,
    }
}

/// Preferences for guest accounts: trip notifications only, nothing shared.
pub fn guest_preferences() -> UserPreferences {
    UserPreferences {
        notifications: NotificationSettings {
            push_notifications: false,
            email_notifications: false,
            chat_notifications: true,
            expense_notifications: true,
            trip_updates: true,
        },
        privacy: PrivacySettings {
            profile_visibility: ProfileVisibility::Private,
            location_sharing: false,
            online_status: false,
        },
        display: default_display(),
        language: Language::Ja,
    }
}
