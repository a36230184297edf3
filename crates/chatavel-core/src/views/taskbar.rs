//! Taskbar projection of minimized windows.

use serde::Serialize;

use crate::config::TaskbarConfig;
use crate::config::defaults::{DEFAULT_BASE_Z_INDEX, DEFAULT_LABEL_CHARS};
use crate::state::Command;
use crate::windows::{WindowId, WindowStack};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskbarOptions {
    /// Priority of the first minimized icon; each following icon gets one less.
    pub base_z_index: i32,
    /// Title characters shown when a window has no icon.
    pub label_chars: usize,
}

impl Default for TaskbarOptions {
    fn default() -> Self {
        Self {
            base_z_index: DEFAULT_BASE_Z_INDEX,
            label_chars: DEFAULT_LABEL_CHARS,
        }
    }
}

impl From<&TaskbarConfig> for TaskbarOptions {
    fn from(config: &TaskbarConfig) -> Self {
        Self {
            base_z_index: config.base_z_index(),
            label_chars: config.label_chars(),
        }
    }
}

/// What a taskbar icon shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TaskbarBadge {
    /// The window's own glyph.
    Icon(String),
    /// Leading characters of the title, for windows without an icon.
    Label(String),
}

impl TaskbarBadge {
    pub fn text(&self) -> &str {
        match self {
            TaskbarBadge::Icon(s) | TaskbarBadge::Label(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskbarItem {
    pub id: WindowId,
    pub title: String,
    pub badge: TaskbarBadge,
    /// Base minus the item's position in stack order. When a window was
    /// minimized plays no part.
    pub z_index: i32,
    pub tooltip: String,
}

/// The rendered taskbar. Only exists while at least one window is minimized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taskbar {
    items: Vec<TaskbarItem>,
}

impl Taskbar {
    /// Project the minimized subset of `stack`.
    ///
    /// Returns `None` rather than an empty taskbar when nothing is minimized.
    pub fn project<C>(stack: &WindowStack<C>, options: &TaskbarOptions) -> Option<Self> {
        let items: Vec<TaskbarItem> = stack
            .minimized()
            .enumerate()
            .map(|(index, record)| {
                let badge = match record.icon() {
                    Some(icon) => TaskbarBadge::Icon(icon.to_string()),
                    None => TaskbarBadge::Label(leading_chars(record.title(), options.label_chars)),
                };
                TaskbarItem {
                    id: record.id().clone(),
                    title: record.title().to_string(),
                    badge,
                    z_index: options.base_z_index.saturating_sub(index as i32),
                    tooltip: format!("{} (right-click to close)", record.title()),
                }
            })
            .collect();

        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn items(&self) -> &[TaskbarItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: &str) -> Option<&TaskbarItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Counted in characters, never splitting a multi-byte title.
fn leading_chars(title: &str, count: usize) -> String {
    title.chars().take(count).collect()
}

/// User gestures on a taskbar icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskbarGesture {
    /// Click or tap: bring the window back.
    Primary(WindowId),
    /// Right-click or long-press: close the window.
    Secondary(WindowId),
}

impl TaskbarGesture {
    pub fn into_command<C>(self) -> Command<C> {
        match self {
            TaskbarGesture::Primary(id) => Command::RestoreWindow { id },
            TaskbarGesture::Secondary(id) => Command::CloseWindow { id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::{WindowManager, WindowSize, WindowSpec};

    fn manager_with(ids: &[(&str, &str, Option<&str>)]) -> WindowManager<()> {
        let mut manager = WindowManager::new();
        for (id, title, icon) in ids {
            let mut spec = WindowSpec::new(*id, *title, ());
            if let Some(icon) = icon {
                spec = spec.with_icon(*icon);
            }
            manager.open(spec);
        }
        manager
    }

    #[test]
    fn test_renders_only_minimized_entries() {
        let mut manager = manager_with(&[("x", "Xylophone", None), ("y", "Yacht", None)]);
        manager.minimize("x");

        let taskbar = Taskbar::project(manager.windows(), &TaskbarOptions::default()).unwrap();
        assert_eq!(taskbar.len(), 1);
        assert_eq!(taskbar.items()[0].id, "x");
    }

    #[test]
    fn test_absent_when_nothing_minimized() {
        let manager = manager_with(&[("x", "X", None), ("y", "Y", None)]);
        assert!(Taskbar::project(manager.windows(), &TaskbarOptions::default()).is_none());

        let empty: WindowManager<()> = WindowManager::new();
        assert!(Taskbar::project(empty.windows(), &TaskbarOptions::default()).is_none());
    }

    #[test]
    fn test_label_falls_back_to_title_prefix() {
        let mut manager = manager_with(&[("map", "Map view", None), ("chat", "Chat", Some("bubble"))]);
        manager.minimize("map");
        manager.minimize("chat");

        let taskbar = Taskbar::project(manager.windows(), &TaskbarOptions::default()).unwrap();
        assert_eq!(
            taskbar.item("map").unwrap().badge,
            TaskbarBadge::Label("Ma".to_string())
        );
        assert_eq!(
            taskbar.item("chat").unwrap().badge,
            TaskbarBadge::Icon("bubble".to_string())
        );
    }

    #[test]
    fn test_label_counts_characters_not_bytes() {
        let mut manager = manager_with(&[("map", "地図機能", None)]);
        manager.minimize("map");

        let taskbar = Taskbar::project(manager.windows(), &TaskbarOptions::default()).unwrap();
        assert_eq!(taskbar.items()[0].badge.text(), "地図");
    }

    #[test]
    fn test_short_title_label_is_whole_title() {
        let mut manager = manager_with(&[("p", "P", None)]);
        manager.minimize("p");
        let taskbar = Taskbar::project(manager.windows(), &TaskbarOptions::default()).unwrap();
        assert_eq!(taskbar.items()[0].badge.text(), "P");
    }

    #[test]
    fn test_z_index_decreases_with_position() {
        let mut manager = manager_with(&[("a", "A", None), ("b", "B", None), ("c", "C", None)]);
        manager.minimize("c");
        manager.minimize("a");

        let taskbar = Taskbar::project(manager.windows(), &TaskbarOptions::default()).unwrap();
        let z: Vec<(String, i32)> = taskbar
            .items()
            .iter()
            .map(|i| (i.id.to_string(), i.z_index))
            .collect();
        assert_eq!(z, vec![("a".to_string(), 999), ("c".to_string(), 998)]);
    }

    #[test]
    fn test_z_index_ignores_minimize_order() {
        let mut manager = manager_with(&[("a", "A", None), ("b", "B", None), ("c", "C", None)]);
        manager.minimize("a");
        manager.minimize("c");

        let taskbar = Taskbar::project(manager.windows(), &TaskbarOptions::default()).unwrap();
        assert_eq!(taskbar.item("a").unwrap().z_index, 999);
        assert_eq!(taskbar.item("c").unwrap().z_index, 998);

        // Restoring and minimizing again does not move a window forward.
        manager.restore("a");
        manager.minimize("a");
        let taskbar = Taskbar::project(manager.windows(), &TaskbarOptions::default()).unwrap();
        assert_eq!(taskbar.item("a").unwrap().z_index, 999);
        assert_eq!(taskbar.items()[0].id, "a");
    }

    #[test]
    fn test_options_from_config() {
        let config = TaskbarConfig {
            base_z_index: Some(10),
            label_chars: Some(1),
        };
        let options = TaskbarOptions::from(&config);

        let mut manager = WindowManager::new();
        manager.open(WindowSpec::new("plan", "Plan", ()).with_size(WindowSize::Small));
        manager.minimize("plan");

        let taskbar = Taskbar::project(manager.windows(), &options).unwrap();
        assert_eq!(taskbar.items()[0].z_index, 10);
        assert_eq!(taskbar.items()[0].badge.text(), "P");
        assert_eq!(taskbar.items()[0].tooltip, "Plan (right-click to close)");
    }

    #[test]
    fn test_gestures_route_to_restore_and_close() {
        let primary: Command<()> = TaskbarGesture::Primary("x".into()).into_command();
        let secondary: Command<()> = TaskbarGesture::Secondary("x".into()).into_command();
        assert_eq!(primary, Command::restore("x"));
        assert_eq!(secondary, Command::close("x"));
    }
}
