//! Deterministic simulation module
//!
//! All board logic lives here. This module must be pure and deterministic:
//! - Time arrives as an argument, never read from a clock
//! - Randomness arrives as an injected bit source
//! - Fixed-size arenas, allocated once per board
//! - No display or input dependencies

pub mod bins;
pub mod lattice;
pub mod particle;
pub mod rng;
pub mod state;
pub mod tick;

pub use bins::Bins;
pub use lattice::{Lattice, Peg, generate_lattice};
pub use particle::{Deflection, Motion, Particle};
pub use rng::{BitSource, seeded};
pub use state::{Board, Phase, RunSummary};
pub use tick::{TickInput, TickOutcome, tick};
