//! chatavel-core: Core library for Chatavel's stacked window manager
//!
//! Chatavel presents each trip-planner feature (map, chat, expenses, ...) in
//! its own modal window. This library owns the window stack and the views
//! derived from it. It is used by the CLI and by any UI front end.
//!
//! # Main Entry Points
//!
//! - [`windows`] - Window stack snapshots and the single-writer manager
//! - [`state`] - Command/event dispatch over the manager
//! - [`views`] - Taskbar projection and the window surface
//! - [`features`] - Feature catalogue and window launch
//! - [`auth`] - User session collaborator
//! - [`config`] - Configuration management

pub mod auth;
pub mod config;
pub mod errors;
pub mod events;
pub mod features;
pub mod logging;
pub mod state;
pub mod views;
pub mod windows;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthBackend, AuthError, AuthSession, AuthState, InMemoryAuthBackend, User};
pub use config::ChatavelConfig;
pub use features::{
    ChatThread, Feature, FeatureContent, GroupError, GroupRoster, MemberRole, feature_window, launch,
};
pub use state::{Command, Event, Store};
pub use views::{
    HeadlessPage, PageHost, SurfaceGesture, SurfaceWindow, Taskbar, TaskbarGesture, TaskbarItem,
    WindowSurface,
};
pub use windows::{
    SharedWindowManager, Transition, WindowId, WindowManager, WindowSize, WindowSpec,
    WindowStack,
};

// Re-export logging initialization
pub use logging::init_logging;
