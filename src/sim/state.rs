//! Board state and core simulation types
//!
//! Everything a run touches lives in one `Board`: the lattice, the particle
//! arena, the bins and the controller flags. All of it is sized from the
//! configuration once; resetting a run never allocates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bins::Bins;
use super::lattice::{Lattice, generate_lattice};
use super::particle::{Motion, Particle};
use crate::settings::BoardConfig;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing falling, display cleared
    #[default]
    Idle,
    /// Releasing and animating balls
    Running,
    /// All balls settled; final histogram stays on screen
    Finished,
}

/// Complete board state
#[derive(Debug, Clone)]
pub struct Board {
    pub config: BoardConfig,
    pub lattice: Lattice,
    pub motion: Motion,
    /// Fixed arena of `total_balls` slots
    pub particles: Vec<Particle>,
    pub bins: Bins,
    pub phase: Phase,
    /// Balls released in the current run
    pub spawned_count: usize,
    /// Time of the last release (microseconds)
    pub last_spawn_us: u64,
    /// Ticks spent running in the current run
    pub time_ticks: u64,
}

impl Board {
    /// Build the lattice and allocate every slot for this configuration
    pub fn new(config: BoardConfig) -> Self {
        let (lattice, bin_x) = generate_lattice(
            config.display_width,
            config.display_height,
            config.rows,
            config.num_bins,
        );
        let motion = Motion::new(&lattice, config.fall_per_tick, config.display_height);
        log::debug!(
            "Lattice: {} rows, {} pegs, step {:.3}x{:.3}, bins at {:?}",
            lattice.rows(),
            lattice.pegs().len(),
            lattice.step_x,
            lattice.step_y,
            bin_x
        );

        Self {
            particles: vec![Particle::default(); config.total_balls],
            bins: Bins::new(bin_x),
            lattice,
            motion,
            phase: Phase::Idle,
            spawned_count: 0,
            last_spawn_us: 0,
            time_ticks: 0,
            config,
        }
    }

    /// Capacity of the particle arena
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Clear every slot, zero the bins and the release counter
    ///
    /// Idempotent; the phase is left to the caller.
    pub fn reset(&mut self) {
        for p in &mut self.particles {
            p.clear();
        }
        self.bins.reset();
        self.spawned_count = 0;
        self.time_ticks = 0;
    }

    /// Release the next unused slot at the apex
    ///
    /// Returns the slot index, or `None` once every slot has been used.
    pub fn spawn(&mut self) -> Option<usize> {
        if self.spawned_count >= self.particles.len() {
            return None;
        }
        let idx = self.spawned_count;
        let apex = self.lattice.apex().as_vec2();
        self.particles[idx].spawn(apex);
        self.spawned_count += 1;
        Some(idx)
    }

    /// Any ball still falling
    pub fn any_active(&self) -> bool {
        self.particles.iter().any(|p| p.active)
    }

    /// Every slot released and every ball counted
    pub fn is_complete(&self) -> bool {
        self.spawned_count >= self.particles.len() && !self.any_active()
    }

    /// Apex position where balls are released
    pub fn apex(&self) -> Vec2 {
        self.lattice.apex().as_vec2()
    }

    /// Snapshot of the histogram for reporting
    pub fn summary(&self, seed: u64) -> RunSummary {
        RunSummary {
            seed,
            spawned: self.spawned_count,
            settled: self.bins.total(),
            ticks: self.time_ticks,
            bin_x: self.bins.positions().to_vec(),
            counts: self.bins.counts().to_vec(),
        }
    }
}

/// Result of one run, suitable for JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub spawned: usize,
    pub settled: u64,
    pub ticks: u64,
    pub bin_x: Vec<i32>,
    pub counts: Vec<u32>,
}

impl RunSummary {
    /// Index of the fullest bin (lowest index wins ties)
    pub fn mode(&self) -> Option<usize> {
        let max = *self.counts.iter().max()?;
        self.counts.iter().position(|&c| c == max)
    }
}
