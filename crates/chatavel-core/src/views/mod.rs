//! Projections of the window stack for rendering.
//!
//! - [`taskbar`] - minimized windows as restorable icons
//! - [`surface`] - visible windows as dismissible overlays

pub mod surface;
pub mod taskbar;

pub use surface::{
    HeadlessPage, PageEffect, PageHost, SurfaceGesture, SurfaceOptions, SurfaceWindow,
    WindowSurface,
};
pub use taskbar::{Taskbar, TaskbarBadge, TaskbarGesture, TaskbarItem, TaskbarOptions};
