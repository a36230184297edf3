//! Window record types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Caller-chosen key of a logical window (one per feature, e.g. `"map"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WindowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for WindowId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for WindowId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Presentation hint for an open window. The manager never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSize {
    Small,
    #[default]
    Medium,
    Large,
    Fullscreen,
}

impl WindowSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowSize::Small => "small",
            WindowSize::Medium => "medium",
            WindowSize::Large => "large",
            WindowSize::Fullscreen => "fullscreen",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" => Some(WindowSize::Small),
            "medium" => Some(WindowSize::Medium),
            "large" => Some(WindowSize::Large),
            "fullscreen" => Some(WindowSize::Fullscreen),
            _ => None,
        }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a caller supplies to open (or refresh) a window.
///
/// Carries no minimized flag: only the manager decides
/// whether a window is minimized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec<C> {
    pub id: WindowId,
    pub title: String,
    /// Opaque payload rendered inside the window body.
    pub content: C,
    /// Glyph shown on the taskbar while minimized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<WindowSize>,
}

impl<C> WindowSpec<C> {
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
            icon: None,
            size: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_size(mut self, size: WindowSize) -> Self {
        self.size = Some(size);
        self
    }
}

/// One logical window held by the manager.
///
/// Content sits behind an `Arc`, so copying a record into the next stack
/// snapshot never copies the payload.
#[derive(Debug, PartialEq)]
pub struct WindowRecord<C> {
    id: WindowId,
    title: String,
    content: Arc<C>,
    icon: Option<String>,
    size: Option<WindowSize>,
    is_minimized: bool,
}

impl<C> Clone for WindowRecord<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            content: Arc::clone(&self.content),
            icon: self.icon.clone(),
            size: self.size,
            is_minimized: self.is_minimized,
        }
    }
}

impl<C> WindowRecord<C> {
    /// New records always start out visible.
    pub(crate) fn from_spec(spec: WindowSpec<C>) -> Self {
        Self {
            id: spec.id,
            title: spec.title,
            content: Arc::new(spec.content),
            icon: spec.icon,
            size: spec.size,
            is_minimized: false,
        }
    }

    pub(crate) fn with_minimized(&self, is_minimized: bool) -> Self {
        Self {
            is_minimized,
            ..self.clone()
        }
    }

    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    /// Shared handle to the payload, for renderers that outlive the snapshot.
    pub fn content_handle(&self) -> Arc<C> {
        Arc::clone(&self.content)
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// The size the caller asked for, if any.
    pub fn size_hint(&self) -> Option<WindowSize> {
        self.size
    }

    /// Effective size, falling back to medium.
    pub fn size(&self) -> WindowSize {
        self.size.unwrap_or_default()
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }
}

/// What a manager operation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new window was appended.
    Opened,
    /// An existing window was refreshed in place and made visible.
    Reopened,
    Closed,
    Minimized,
    Restored,
    /// Every window was removed.
    Cleared { count: usize },
    /// Nothing changed (unknown id, or the window was already in that state).
    Unchanged,
}

impl Transition {
    pub fn is_change(&self) -> bool {
        !matches!(self, Transition::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_size_defaults_to_medium() {
        assert_eq!(WindowSize::default(), WindowSize::Medium);
    }

    #[test]
    fn test_window_size_parse_is_case_insensitive() {
        assert_eq!(WindowSize::parse("LARGE"), Some(WindowSize::Large));
        assert_eq!(WindowSize::parse("fullscreen"), Some(WindowSize::Fullscreen));
        assert_eq!(WindowSize::parse("huge"), None);
    }

    #[test]
    fn test_record_from_spec_starts_visible() {
        let spec = WindowSpec::new("map", "Map", ()).with_icon("map-pin");
        let record = WindowRecord::from_spec(spec);
        assert!(!record.is_minimized());
        assert_eq!(record.icon(), Some("map-pin"));
        assert_eq!(record.size(), WindowSize::Medium);
        assert_eq!(record.size_hint(), None);
    }

    #[test]
    fn test_record_clone_shares_content() {
        struct NotClone;
        let record = WindowRecord::from_spec(WindowSpec::new("x", "X", NotClone));
        let copy = record.clone();
        assert!(Arc::ptr_eq(&record.content_handle(), &copy.content_handle()));
    }

    #[test]
    fn test_with_minimized_only_flips_flag() {
        let record = WindowRecord::from_spec(
            WindowSpec::new("chat", "Chat", 7).with_size(WindowSize::Large),
        );
        let minimized = record.with_minimized(true);
        assert!(minimized.is_minimized());
        assert_eq!(minimized.title(), "Chat");
        assert_eq!(*minimized.content(), 7);
        assert_eq!(minimized.size(), WindowSize::Large);
    }

    #[test]
    fn test_window_id_serializes_as_plain_string() {
        let id = WindowId::from("photo");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"photo\"");
        assert_eq!(id, "photo");
    }
}
