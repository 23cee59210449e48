//! Simulation tick
//!
//! One tick = apply button edges, step the controller, compose a frame.
//! Sleeping between idle ticks is the caller's business.

use super::rng::BitSource;
use super::state::{Board, Phase};
use crate::renderer::{FrameBuffer, render};

/// Input edges for a single tick (already debounced)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Start button pressed this tick
    pub start: bool,
    /// Reset button pressed this tick
    pub reset: bool,
}

impl TickInput {
    pub fn start() -> Self {
        Self {
            start: true,
            ..Default::default()
        }
    }

    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Default::default()
        }
    }
}

/// What the caller should do with the frame buffer after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new frame was composed; flush it
    Rendered,
    /// The board was reset and the frame blanked; flush it
    Cleared,
    /// Nothing changed; yield before the next tick
    Idle,
}

/// Advance the board by one tick at time `now_us` (microseconds)
pub fn tick<R: BitSource + ?Sized>(
    board: &mut Board,
    input: &TickInput,
    now_us: u64,
    fb: &mut FrameBuffer,
    bits: &mut R,
) -> TickOutcome {
    let mut cleared = false;

    if input.start && board.phase != Phase::Running {
        board.reset();
        board.phase = Phase::Running;
        board.last_spawn_us = now_us;
        log::info!(
            "Run started: {} balls through {} rows into {} bins",
            board.capacity(),
            board.lattice.rows(),
            board.bins.len()
        );
    }

    if input.reset {
        if board.phase != Phase::Idle {
            log::info!("Board reset ({} balls released)", board.spawned_count);
        }
        board.reset();
        board.phase = Phase::Idle;
        fb.clear();
        cleared = true;
    }

    if board.phase != Phase::Running {
        return if cleared {
            TickOutcome::Cleared
        } else {
            TickOutcome::Idle
        };
    }

    board.time_ticks += 1;

    if board.spawned_count < board.capacity()
        && now_us.saturating_sub(board.last_spawn_us) >= board.config.release_interval_us
    {
        if let Some(slot) = board.spawn() {
            board.last_spawn_us = now_us;
            log::debug!("Released ball {} at t={}us", slot + 1, now_us);
        }
    }

    let motion = board.motion;
    let released = board.spawned_count;
    for (i, p) in board.particles[..released].iter_mut().enumerate() {
        motion.advance(p, bits);
        if !p.awaiting_settle() {
            continue;
        }
        if let Some(bin) = board.bins.settle(p) {
            log::debug!("Ball {} settled in bin {} (x={:.1})", i + 1, bin, p.pos.x);
        }
    }

    render(
        fb,
        &board.lattice,
        &board.particles,
        &board.bins,
        board.spawned_count,
    );

    if board.is_complete() {
        board.phase = Phase::Finished;
        log::info!(
            "Run finished after {} ticks: {:?}",
            board.time_ticks,
            board.bins.counts()
        );
    } else {
        log::trace!(
            "Tick {}: {} released, {} settled",
            board.time_ticks,
            board.spawned_count,
            board.bins.total()
        );
    }

    TickOutcome::Rendered
}
