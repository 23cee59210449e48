//! Triangular peg lattice and bin columns
//!
//! Row r (0 = apex) holds r + 1 pegs, centered on the display and spaced by a
//! fixed horizontal step. The last row sits on the bottom line of the upper
//! half of the display, leaving the lower half for the histogram.

use glam::IVec2;

use crate::round_half_up;

/// A peg position in pixels
pub type Peg = IVec2;

/// Immutable peg layout, stored as one flat arena of triangular rows
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    rows: usize,
    /// Horizontal distance between neighbouring pegs (pixels)
    pub step_x: f32,
    /// Vertical distance between rows (pixels)
    pub step_y: f32,
    pegs: Vec<Peg>,
}

/// Index of the first peg of row `r` in the flat arena
#[inline]
fn row_offset(r: usize) -> usize {
    r * (r + 1) / 2
}

impl Lattice {
    /// Number of peg rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pegs of row `r`, or `None` past the base row
    pub fn row(&self, r: usize) -> Option<&[Peg]> {
        if r >= self.rows {
            return None;
        }
        self.pegs.get(row_offset(r)..row_offset(r + 1))
    }

    /// All pegs, apex first
    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    /// The single peg of row 0
    pub fn apex(&self) -> Peg {
        self.pegs[0]
    }

    /// The widest (last) row
    pub fn base(&self) -> &[Peg] {
        &self.pegs[row_offset(self.rows - 1)..]
    }
}

/// Build the peg lattice and the bin x-positions for a display
///
/// Pure: identical inputs always give identical layouts. `rows` and `num_bins`
/// must be at least 1.
pub fn generate_lattice(
    display_width: u32,
    display_height: u32,
    rows: usize,
    num_bins: usize,
) -> (Lattice, Vec<i32>) {
    debug_assert!(rows >= 1, "lattice needs at least one row");
    debug_assert!(num_bins >= 1, "board needs at least one bin");
    let rows = rows.max(1);
    let num_bins = num_bins.max(1);

    let width = display_width as f32;
    let half_h = (display_height / 2) as f32;
    let gaps = (rows - 1).max(1) as f32;
    let step_x = (width * 0.5) / gaps;
    let step_y = (half_h - 1.0) / gaps;

    let mut pegs = Vec::with_capacity(row_offset(rows));
    for r in 0..rows {
        let count = r + 1;
        let shift_x = ((width - 1.0) - (count - 1) as f32 * step_x) * 0.5;
        let y = round_half_up(r as f32 * step_y);
        for c in 0..count {
            pegs.push(IVec2::new(round_half_up(shift_x + c as f32 * step_x), y));
        }
    }

    let lattice = Lattice {
        rows,
        step_x,
        step_y,
        pegs,
    };

    let base = lattice.base();
    let start = base[0].x;
    let end = base[base.len() - 1].x;
    let bin_step = if num_bins > 1 {
        (end - start) as f32 / (num_bins - 1) as f32
    } else {
        0.0
    };
    let bin_x = (0..num_bins)
        .map(|i| round_half_up(start as f32 + i as f32 * bin_step))
        .collect();

    (lattice, bin_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classic_layout() {
        let (lattice, bins) = generate_lattice(128, 64, 15, 7);
        assert_eq!(lattice.rows(), 15);
        assert_eq!(lattice.pegs().len(), 120);
        assert_eq!(lattice.apex(), IVec2::new(64, 0));
        // Base row spans half the display and ends on the last line of the top half
        assert_eq!(lattice.base().first().copied(), Some(IVec2::new(32, 31)));
        assert_eq!(lattice.base().last().copied(), Some(IVec2::new(96, 31)));
        assert_eq!(bins, vec![32, 43, 53, 64, 75, 85, 96]);
    }

    #[test]
    fn test_single_row() {
        let (lattice, bins) = generate_lattice(128, 64, 1, 3);
        assert_eq!(lattice.pegs().len(), 1);
        assert_eq!(lattice.apex(), lattice.base()[0]);
        assert_eq!(bins, vec![64, 64, 64]);
    }

    #[test]
    fn test_single_bin_sits_on_left_edge() {
        let (lattice, bins) = generate_lattice(128, 64, 15, 1);
        assert_eq!(bins, vec![lattice.base()[0].x]);
    }

    #[test]
    fn test_row_accessor_bounds() {
        let (lattice, _) = generate_lattice(128, 64, 4, 2);
        assert_eq!(lattice.row(3).map(<[Peg]>::len), Some(4));
        assert!(lattice.row(4).is_none());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(generate_lattice(96, 48, 9, 5), generate_lattice(96, 48, 9, 5));
    }

    proptest! {
        #[test]
        fn prop_rows_are_triangular_and_centered(
            width in 16u32..256,
            height in 16u32..128,
            rows in 1usize..32,
        ) {
            let (lattice, _) = generate_lattice(width, height, rows, 3);
            let center2 = width as i32 - 1; // twice the horizontal center
            for r in 0..rows {
                let row = lattice.row(r).unwrap();
                prop_assert_eq!(row.len(), r + 1);
                for (left, right) in row.iter().zip(row.iter().rev()) {
                    prop_assert!((left.x + right.x - center2).abs() <= 1);
                    prop_assert_eq!(left.y, right.y);
                }
            }
        }

        #[test]
        fn prop_bins_span_base_row(rows in 2usize..24, num_bins in 1usize..16) {
            let (lattice, bins) = generate_lattice(128, 64, rows, num_bins);
            let base = lattice.base();
            prop_assert_eq!(bins.len(), num_bins);
            prop_assert_eq!(bins[0], base[0].x);
            prop_assert!(bins.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(*bins.last().unwrap() <= base[base.len() - 1].x);
        }
    }
}
