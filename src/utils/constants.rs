/// Record format
pub const FIELD_SEPARATOR: u8 = b';';
pub const LINE_TERMINATOR: u8 = b'\n';

/// Fixed-point scale: readings are stored in tenths
pub const FIXED_POINT_SCALE: f64 = 10.0;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const MIN_BUFFER_SIZE: usize = 1024;
pub const PLANNER_SCAN_WINDOW: usize = 4096;

/// Configuration
pub const ENV_PREFIX: &str = "BRC";
