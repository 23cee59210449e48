//! Collection bins along the base of the lattice

use super::particle::Particle;

/// Bin columns and their running counts
///
/// Counts are never capped; only the rendered bars are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bins {
    positions: Vec<i32>,
    counts: Vec<u32>,
}

impl Bins {
    pub fn new(positions: Vec<i32>) -> Self {
        let counts = vec![0; positions.len()];
        Self { positions, counts }
    }

    /// Bin x-positions (pixels)
    pub fn positions(&self) -> &[i32] {
        &self.positions
    }

    /// Per-bin counts
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total particles credited so far
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Iterate `(x, count)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.positions.iter().copied().zip(self.counts.iter().copied())
    }

    /// Zero all counts
    pub fn reset(&mut self) {
        self.counts.fill(0);
    }

    /// Index of the bin closest to `x` (lowest index wins ties)
    ///
    /// Distance is measured from the unrounded final x, not a truncated pixel column.
    pub fn nearest(&self, x: f32) -> usize {
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (i, &bx) in self.positions.iter().enumerate() {
            let dist = (x - bx as f32).abs();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    /// Credit an exited particle to its nearest bin, exactly once
    ///
    /// Returns the bin index, or `None` if the particle was not awaiting
    /// settlement (still falling or already counted).
    pub fn settle(&mut self, particle: &mut Particle) -> Option<usize> {
        debug_assert!(
            particle.awaiting_settle(),
            "settle called on a particle that is active or already counted"
        );
        if !particle.awaiting_settle() || self.counts.is_empty() {
            return None;
        }

        let idx = self.nearest(particle.pos.x);
        self.counts[idx] += 1;
        particle.settled = true;
        Some(idx)
    }
}
