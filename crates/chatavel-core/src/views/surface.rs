//! The window surface: visible windows plus their page-level side effects.
//!
//! While at least one window is visible the surface keeps the background
//! page from scrolling and listens for the escape key. Both are released
//! when the last visible window goes away (closed or minimized).

use std::sync::Arc;

use tracing::debug;

use crate::config::{EscapeScope, SurfaceConfig};
use crate::state::Command;
use crate::windows::{WindowId, WindowSize, WindowStack};

/// Host page operations the surface needs. Implemented by whatever actually
/// draws the windows (a browser shell, a native window, a terminal).
pub trait PageHost {
    /// Lock or unlock scrolling of the content behind the overlays.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Start delivering escape key presses to the surface.
    fn bind_escape(&mut self);

    /// Stop delivering escape key presses.
    fn unbind_escape(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEffect {
    ScrollLocked,
    ScrollUnlocked,
    EscapeBound,
    EscapeUnbound,
}

/// `PageHost` that just records what was asked of it.
#[derive(Debug, Default)]
pub struct HeadlessPage {
    scroll_locked: bool,
    escape_bound: bool,
    effects: Vec<PageEffect>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn is_escape_bound(&self) -> bool {
        self.escape_bound
    }

    /// Every effect applied so far, oldest first.
    pub fn effects(&self) -> &[PageEffect] {
        &self.effects
    }
}

impl PageHost for HeadlessPage {
    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
        self.effects.push(if locked {
            PageEffect::ScrollLocked
        } else {
            PageEffect::ScrollUnlocked
        });
    }

    fn bind_escape(&mut self) {
        self.escape_bound = true;
        self.effects.push(PageEffect::EscapeBound);
    }

    fn unbind_escape(&mut self) {
        self.escape_bound = false;
        self.effects.push(PageEffect::EscapeUnbound);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Offer a minimize button on each window.
    pub show_minimize: bool,
    /// Clicking the backdrop around a window closes it.
    pub close_on_backdrop: bool,
    pub escape_scope: EscapeScope,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            show_minimize: true,
            close_on_backdrop: true,
            escape_scope: EscapeScope::All,
        }
    }
}

impl From<&SurfaceConfig> for SurfaceOptions {
    fn from(config: &SurfaceConfig) -> Self {
        Self {
            show_minimize: config.show_minimize(),
            close_on_backdrop: config.close_on_backdrop(),
            escape_scope: config.escape_scope(),
        }
    }
}

/// One rendered overlay window.
#[derive(Debug)]
pub struct SurfaceWindow<C> {
    pub id: WindowId,
    pub title: String,
    pub size: WindowSize,
    pub can_minimize: bool,
    /// Stacking layer among visible windows; higher is drawn on top.
    pub layer: usize,
    pub content: Arc<C>,
}

impl<C> Clone for SurfaceWindow<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            size: self.size,
            can_minimize: self.can_minimize,
            layer: self.layer,
            content: Arc::clone(&self.content),
        }
    }
}

/// User gestures on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceGesture {
    CloseButton(WindowId),
    MinimizeButton(WindowId),
    /// Click on the dimmed area around a window.
    Backdrop(WindowId),
    /// Click inside a window body. Never reaches the backdrop.
    BodyClick(WindowId),
    Escape,
}

/// Renders visible windows and owns the page side effects tied to them.
pub struct WindowSurface<P: PageHost> {
    page: P,
    options: SurfaceOptions,
    /// Ids rendered by the last `sync`, bottom to top.
    rendered: Vec<WindowId>,
}

impl<P: PageHost> WindowSurface<P> {
    pub fn new(page: P, options: SurfaceOptions) -> Self {
        Self {
            page,
            options,
            rendered: Vec::new(),
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    /// Whether any window is currently rendered.
    pub fn is_active(&self) -> bool {
        !self.rendered.is_empty()
    }

    /// Re-render from `stack`, applying page effects on the edges between
    /// "no visible window" and "some visible window".
    pub fn sync<C>(&mut self, stack: &WindowStack<C>) -> Vec<SurfaceWindow<C>> {
        let was_active = self.is_active();

        let windows: Vec<SurfaceWindow<C>> = stack
            .visible()
            .enumerate()
            .map(|(layer, record)| SurfaceWindow {
                id: record.id().clone(),
                title: record.title().to_string(),
                size: record.size(),
                can_minimize: self.options.show_minimize,
                layer,
                content: record.content_handle(),
            })
            .collect();
        self.rendered = windows.iter().map(|w| w.id.clone()).collect();

        match (was_active, self.is_active()) {
            (false, true) => {
                self.page.set_scroll_locked(true);
                self.page.bind_escape();
                debug!(event = "core.surface.activated", window_count = windows.len());
            }
            (true, false) => {
                self.release_page();
                debug!(event = "core.surface.deactivated");
            }
            _ => {}
        }

        windows
    }

    /// Translate a gesture into the commands it triggers.
    ///
    /// Gestures aimed at windows that are not currently rendered do nothing.
    pub fn route<C>(&self, gesture: &SurfaceGesture) -> Vec<Command<C>> {
        match gesture {
            SurfaceGesture::CloseButton(id) if self.is_rendered(id) => {
                vec![Command::CloseWindow { id: id.clone() }]
            }
            SurfaceGesture::MinimizeButton(id)
                if self.options.show_minimize && self.is_rendered(id) =>
            {
                vec![Command::MinimizeWindow { id: id.clone() }]
            }
            SurfaceGesture::Backdrop(id)
                if self.options.close_on_backdrop && self.is_rendered(id) =>
            {
                vec![Command::CloseWindow { id: id.clone() }]
            }
            SurfaceGesture::Escape => match self.options.escape_scope {
                EscapeScope::All => self
                    .rendered
                    .iter()
                    .rev()
                    .map(|id| Command::CloseWindow { id: id.clone() })
                    .collect(),
                EscapeScope::Topmost => self
                    .rendered
                    .last()
                    .map(|id| Command::CloseWindow { id: id.clone() })
                    .into_iter()
                    .collect(),
            },
            _ => Vec::new(),
        }
    }

    fn is_rendered(&self, id: &WindowId) -> bool {
        self.rendered.contains(id)
    }

    fn release_page(&mut self) {
        self.page.set_scroll_locked(false);
        self.page.unbind_escape();
    }
}

impl<P: PageHost> Drop for WindowSurface<P> {
    fn drop(&mut self) {
        if self.is_active() {
            self.release_page();
        }
    }
}
