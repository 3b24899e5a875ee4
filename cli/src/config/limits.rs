/// Smallest worker pool accepted for the per-target fan-out
pub const MIN_WORKERS: usize = 1;

/// Largest worker pool; there are only a handful of targets to run
pub const MAX_WORKERS: usize = 16;

/// Cursor size bounds in pixels
pub const MIN_CURSOR_SIZE: u32 = 8;
pub const MAX_CURSOR_SIZE: u32 = 256;
