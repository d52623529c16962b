// Constants for the GUI core

/// Frame rate used when no configuration is supplied
pub const DEFAULT_TARGET_FPS: i32 = 60;

/// Two presses closer together than this (in milliseconds) form a double click
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 300;

/// Two presses further apart than this on either axis are never a double click
pub const DEFAULT_DOUBLE_CLICK_DISTANCE: u16 = 2;

/// Elapsed time reported to timers is clamped to this after a long stall
pub const DEFAULT_MAX_ELAPSED_MS: u64 = 1000;

/// Length of the window the FPS counter averages over
pub const FPS_WINDOW_MS: u64 = 1000;
