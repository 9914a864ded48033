//! Exit codes for multitool

/// Normal quit
pub const EXIT_SUCCESS: i32 = 0;

/// Configuration missing or invalid
pub const EXIT_CONFIG_ERROR: i32 = 1;

/// The terminal could not be put under menu control
pub const EXIT_TERMINAL_ERROR: i32 = 2;
