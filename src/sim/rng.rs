//! Random bit capability consumed by the motion model
//!
//! The simulation only needs fair, independent single bits. Any `rand`
//! generator provides them; tests can plug in scripted sequences.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// A source of fair, independent bits
pub trait BitSource {
    /// Next bit; `true` deflects right
    fn next_bit(&mut self) -> bool;
}

impl<R: RngCore + ?Sized> BitSource for R {
    #[inline]
    fn next_bit(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}

/// Seeded default generator
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Always yields the same bit (forces every deflection one way)
#[cfg(test)]
pub(crate) struct FixedBit(pub bool);

#[cfg(test)]
impl BitSource for FixedBit {
    fn next_bit(&mut self) -> bool {
        self.0
    }
}
