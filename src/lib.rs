//! Galton Board - falling balls, fair pegs, a binomial histogram
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lattice, particle motion, bins, controller)
//! - `renderer`: Monochrome frame buffer and frame composition
//! - `platform`: Display/input collaborators and host implementations
//! - `settings`: Board configuration and presets

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BoardConfig, BoardPreset};

/// Default board configuration constants
pub mod consts {
    /// Number of peg rows (the base row holds this many pegs)
    pub const ROWS: usize = 15;
    /// Balls released per run
    pub const TOTAL_BALLS: usize = 100;
    /// Collection bins along the base
    pub const NUM_BINS: usize = 7;
    /// Minimum time between two releases (microseconds)
    pub const RELEASE_INTERVAL_US: u64 = 10_000;
    /// Vertical distance a ball falls per tick (pixels)
    pub const FALL_PER_TICK: f32 = 1.5;

    /// SSD1306 panel dimensions
    pub const DISPLAY_WIDTH: u32 = 128;
    pub const DISPLAY_HEIGHT: u32 = 64;

    /// Largest accepted layout values
    pub const MAX_DISPLAY_DIM: u32 = 4096;
    pub const MAX_ROWS: usize = 512;
    pub const MAX_TOTAL_BALLS: usize = 1_000_000;

    /// Yield between ticks while nothing is animating (milliseconds)
    pub const IDLE_SLEEP_MS: u64 = 20;
    /// Host animation pace while balls are falling (milliseconds per frame)
    pub const ANIMATION_FRAME_MS: u64 = 30;
}

/// Round half up to the nearest pixel (matches `(int)(v + 0.5)` on the panel grid)
#[inline]
pub fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}
