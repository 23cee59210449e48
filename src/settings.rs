//! Board configuration and presets
//!
//! Fixed for a given deployment: every buffer in the simulation is sized from
//! these values once at startup.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Named board layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoardPreset {
    /// The stock 15-row, 7-bin board
    #[default]
    Classic,
    /// More balls, more bins, faster release
    Dense,
    /// A small board that finishes quickly
    Tiny,
}

impl BoardPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardPreset::Classic => "Classic",
            BoardPreset::Dense => "Dense",
            BoardPreset::Tiny => "Tiny",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "default" => Some(BoardPreset::Classic),
            "dense" => Some(BoardPreset::Dense),
            "tiny" | "small" => Some(BoardPreset::Tiny),
            _ => None,
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Peg rows (row r holds r + 1 pegs)
    pub rows: usize,
    /// Particle slots, i.e. balls released per run
    pub total_balls: usize,
    /// Collection bins
    pub num_bins: usize,
    /// Minimum time between releases (microseconds)
    pub release_interval_us: u64,
    /// Fall distance per tick (pixels)
    pub fall_per_tick: f32,
    /// Display width (pixels)
    pub display_width: u32,
    /// Display height (pixels)
    pub display_height: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: ROWS,
            total_balls: TOTAL_BALLS,
            num_bins: NUM_BINS,
            release_interval_us: RELEASE_INTERVAL_US,
            fall_per_tick: FALL_PER_TICK,
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
        }
    }
}

impl BoardConfig {
    /// Create a configuration from a preset
    pub fn from_preset(preset: BoardPreset) -> Self {
        let classic = Self::default();
        match preset {
            BoardPreset::Classic => classic,
            BoardPreset::Dense => Self {
                total_balls: 400,
                num_bins: 15,
                release_interval_us: 4_000,
                ..classic
            },
            BoardPreset::Tiny => Self {
                rows: 6,
                total_balls: 30,
                num_bins: 5,
                ..classic
            },
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BoardConfig =
            serde_json::from_str(json).context("Failed to parse board config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let json = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file '{}'", path_ref.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("Invalid config file '{}'", path_ref.display()))?;
        log::info!(
            "Loaded board config from {} ({} rows, {} balls, {} bins)",
            path_ref.display(),
            config.rows,
            config.total_balls,
            config.num_bins
        );
        Ok(config)
    }

    /// Reject layouts the simulation cannot draw or fill
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            bail!("rows must be at least 1");
        }
        if self.total_balls == 0 {
            bail!("total_balls must be at least 1");
        }
        if self.num_bins == 0 {
            bail!("num_bins must be at least 1");
        }
        if self.display_width < 8 || self.display_height < 8 {
            bail!(
                "display must be at least 8x8 pixels (got {}x{})",
                self.display_width,
                self.display_height
            );
        }
        if self.display_width > MAX_DISPLAY_DIM || self.display_height > MAX_DISPLAY_DIM {
            bail!(
                "display must be at most {MAX_DISPLAY_DIM}x{MAX_DISPLAY_DIM} pixels (got {}x{})",
                self.display_width,
                self.display_height
            );
        }
        if self.rows > MAX_ROWS {
            bail!("rows must be at most {MAX_ROWS} (got {})", self.rows);
        }
        if self.total_balls > MAX_TOTAL_BALLS {
            bail!("total_balls must be at most {MAX_TOTAL_BALLS} (got {})", self.total_balls);
        }
        if self.num_bins > self.display_width as usize {
            bail!(
                "num_bins must not exceed the display width (got {} bins for {} pixels)",
                self.num_bins,
                self.display_width
            );
        }
        if !self.fall_per_tick.is_finite() || self.fall_per_tick <= 0.0 {
            bail!("fall_per_tick must be a positive number (got {})", self.fall_per_tick);
        }
        Ok(())
    }
}
