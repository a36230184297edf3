//! Configuration type definitions for Chatavel.
//!
//! These types are deserialized from TOML config files. Every field is
//! optional so that a project config can override only what it names;
//! accessor methods resolve the effective value against the defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! [taskbar]
//! base_z_index = 999
//! label_chars = 2
//!
//! [surface]
//! show_minimize = true
//! close_on_backdrop = true
//! escape_scope = "all"
//!
//! [group]
//! name = "Okinawa trip"
//! id = "okinawa-trip-2024"
//! ```

use serde::{Deserialize, Serialize};

use super::defaults;

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.chatavel/config.toml`
/// 2. Project config: `./.chatavel/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ChatavelConfig {
    /// Taskbar (minimized window stack) presentation.
    #[serde(default)]
    pub taskbar: TaskbarConfig,

    /// Window surface behavior.
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Trip group shown by the group management window.
    #[serde(default)]
    pub group: GroupConfig,
}

/// Taskbar configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TaskbarConfig {
    /// Stacking priority of the first minimized icon. Each following icon
    /// gets one less. Default: 999.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_z_index: Option<i32>,

    /// Number of title characters shown when a window has no icon.
    /// Default: 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_chars: Option<usize>,
}

impl TaskbarConfig {
    pub fn base_z_index(&self) -> i32 {
        self.base_z_index.unwrap_or(defaults::DEFAULT_BASE_Z_INDEX)
    }

    pub fn label_chars(&self) -> usize {
        self.label_chars.unwrap_or(defaults::DEFAULT_LABEL_CHARS)
    }
}

/// Window surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SurfaceConfig {
    /// Whether open windows offer a minimize button. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_minimize: Option<bool>,

    /// Whether clicking the backdrop closes the window. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_on_backdrop: Option<bool>,

    /// Which windows the escape key dismisses. Default: all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape_scope: Option<EscapeScope>,
}

impl SurfaceConfig {
    pub fn show_minimize(&self) -> bool {
        self.show_minimize.unwrap_or(true)
    }

    pub fn close_on_backdrop(&self) -> bool {
        self.close_on_backdrop.unwrap_or(true)
    }

    pub fn escape_scope(&self) -> EscapeScope {
        self.escape_scope.unwrap_or_default()
    }
}

/// Which visible windows a single escape key press dismisses.
///
/// Every open window listens for escape on its own, so by default one press
/// closes all of them. `Topmost` closes only the most recently stacked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeScope {
    #[default]
    All,
    Topmost,
}

impl EscapeScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscapeScope::All => "all",
            EscapeScope::Topmost => "topmost",
        }
    }
}

impl std::str::FromStr for EscapeScope {
    type Err = crate::errors::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(EscapeScope::All),
            "topmost" => Ok(EscapeScope::Topmost),
            _ => Err(crate::errors::ConfigError::InvalidEscapeScope {
                scope: s.to_string(),
            }),
        }
    }
}

/// Trip group configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GroupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl GroupConfig {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(defaults::DEFAULT_GROUP_NAME)
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(defaults::DEFAULT_GROUP_ID)
    }
}
