//! Default values for configuration types.

/// Stacking priority of the first minimized taskbar icon.
pub const DEFAULT_BASE_Z_INDEX: i32 = 999;

/// Title characters used as a taskbar label when a window has no icon.
pub const DEFAULT_LABEL_CHARS: usize = 2;

pub const DEFAULT_GROUP_NAME: &str = "Okinawa trip";
pub const DEFAULT_GROUP_ID: &str = "okinawa-trip-2024";
