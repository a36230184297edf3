//! Window stack management.
//!
//! [`WindowManager`] owns an ordered collection of [`WindowRecord`]s and
//! exposes `open`, `close`, `minimize`, `restore` and `clear_all`. The views
//! in [`crate::views`] project its snapshots onto the taskbar and the window
//! surface.

pub mod manager;
pub mod stack;
pub mod types;

pub use manager::{SharedWindowManager, WindowManager};
pub use stack::WindowStack;
pub use types::{Transition, WindowId, WindowRecord, WindowSize, WindowSpec};
