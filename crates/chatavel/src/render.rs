//! Text and JSON rendering of the headless surface.

use serde::Serialize;

use chatavel_core::{
    Event, FeatureContent, HeadlessPage, SurfaceWindow, Taskbar, TaskbarItem, WindowId, WindowSize,
};

use crate::table::truncate;

const ID_WIDTH: usize = 8;
const TITLE_WIDTH: usize = 12;

#[derive(Debug, Serialize)]
pub struct WindowView<'a> {
    id: &'a WindowId,
    title: &'a str,
    size: WindowSize,
    layer: usize,
    can_minimize: bool,
    content: &'a FeatureContent,
}

/// Everything visible after one session step.
#[derive(Debug, Serialize)]
pub struct Frame<'a> {
    events: &'a [Event],
    windows: Vec<WindowView<'a>>,
    /// Absent while nothing is minimized.
    #[serde(skip_serializing_if = "Option::is_none")]
    taskbar: Option<&'a [TaskbarItem]>,
    scroll_locked: bool,
    escape_bound: bool,
}

impl<'a> Frame<'a> {
    pub fn new(
        events: &'a [Event],
        windows: &'a [SurfaceWindow<FeatureContent>],
        taskbar: Option<&'a Taskbar>,
        page: &HeadlessPage,
    ) -> Self {
        Self {
            events,
            windows: windows
                .iter()
                .map(|w| WindowView {
                    id: &w.id,
                    title: &w.title,
                    size: w.size,
                    layer: w.layer,
                    can_minimize: w.can_minimize,
                    content: &w.content,
                })
                .collect(),
            taskbar: taskbar.map(Taskbar::items),
            scroll_locked: page.is_scroll_locked(),
            escape_bound: page.is_escape_bound(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();

        if !self.events.is_empty() {
            let described: Vec<String> = self.events.iter().map(describe_event).collect();
            lines.push(format!("> {}", described.join(", ")));
        }

        if self.windows.is_empty() {
            lines.push("Windows: none".to_string());
        } else {
            lines.push(format!(
                "Windows ({} open{}):",
                self.windows.len(),
                if self.scroll_locked { ", page scroll locked" } else { "" }
            ));
            for window in &self.windows {
                let buttons = if window.can_minimize { "[_] [x]" } else { "    [x]" };
                lines.push(format!(
                    "  {}. {} {} {:<10} {}  {}",
                    window.layer + 1,
                    truncate(window.id.as_str(), ID_WIDTH),
                    truncate(window.title, TITLE_WIDTH),
                    window.size.as_str(),
                    buttons,
                    window.content.summary()
                ));
            }
        }

        match self.taskbar {
            None => lines.push("Taskbar: hidden".to_string()),
            Some(items) => {
                lines.push(format!("Taskbar ({} minimized):", items.len()));
                for item in items {
                    lines.push(format!(
                        "  [{}] {} z={}  {}",
                        item.badge.text(),
                        truncate(item.id.as_str(), ID_WIDTH),
                        item.z_index,
                        item.tooltip
                    ));
                }
            }
        }

        lines.join("\n")
    }
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::WindowOpened { id } => format!("opened {}", id),
        Event::WindowReopened { id } => format!("reopened {}", id),
        Event::WindowClosed { id } => format!("closed {}", id),
        Event::WindowMinimized { id } => format!("minimized {}", id),
        Event::WindowRestored { id } => format!("restored {}", id),
        Event::WindowsCleared { count } => format!("cleared {} window(s)", count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatavel_core::config::GroupConfig;
    use chatavel_core::views::{SurfaceOptions, TaskbarOptions};
    use chatavel_core::{Feature, WindowManager, WindowSurface, launch};

    fn scenario() -> (
        Vec<SurfaceWindow<FeatureContent>>,
        Option<Taskbar>,
        WindowSurface<HeadlessPage>,
    ) {
        let group = GroupConfig::default();
        let mut manager = WindowManager::new();
        manager.open(launch(Feature::Map, &group));
        manager.open(launch(Feature::Chat, &group));
        manager.minimize("map");

        let mut surface = WindowSurface::new(HeadlessPage::new(), SurfaceOptions::default());
        let windows = surface.sync(manager.windows());
        let taskbar = Taskbar::project(manager.windows(), &TaskbarOptions::default());
        (windows, taskbar, surface)
    }

    #[test]
    fn test_text_frame_lists_windows_and_taskbar() {
        let (windows, taskbar, surface) = scenario();
        let events = vec![Event::WindowMinimized {
            id: WindowId::new("map"),
        }];
        let text = Frame::new(&events, &windows, taskbar.as_ref(), surface.page()).to_text();

        assert!(text.starts_with("> minimized map"));
        assert!(text.contains("Windows (1 open, page scroll locked):"));
        assert!(text.contains("Group chat"));
        assert!(text.contains("Taskbar (1 minimized):"));
        assert!(text.contains("[map-pin] map"));
        assert!(text.contains("z=999"));
        assert!(text.contains("Map (right-click to close)"));
    }

    #[test]
    fn test_empty_frame() {
        let page = HeadlessPage::new();
        let text = Frame::new(&[], &[], None, &page).to_text();
        assert_eq!(text, "Windows: none\nTaskbar: hidden");
    }

    #[test]
    fn test_json_frame_shape() {
        let (windows, taskbar, surface) = scenario();
        let json = Frame::new(&[], &windows, taskbar.as_ref(), surface.page())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["windows"].as_array().unwrap().len(), 1);
        assert_eq!(value["windows"][0]["id"], "chat");
        assert_eq!(value["windows"][0]["size"], "large");
        assert_eq!(value["windows"][0]["content"]["kind"], "chat");
        assert_eq!(value["taskbar"][0]["id"], "map");
        assert_eq!(value["taskbar"][0]["badge"]["kind"], "icon");
        assert_eq!(value["scroll_locked"], true);
    }

    #[test]
    fn test_json_frame_omits_taskbar_without_minimized_windows() {
        let group = GroupConfig::default();
        let mut manager = WindowManager::new();
        manager.open(launch(Feature::Map, &group));

        let mut surface = WindowSurface::new(HeadlessPage::new(), SurfaceOptions::default());
        let windows = surface.sync(manager.windows());
        let taskbar = Taskbar::project(manager.windows(), &TaskbarOptions::default());
        assert!(taskbar.is_none());

        let json = Frame::new(&[], &windows, taskbar.as_ref(), surface.page())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("taskbar").is_none());
        assert_eq!(value["windows"].as_array().unwrap().len(), 1);
    }
}
