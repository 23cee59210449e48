//! Frame composition: board state to pixels
//!
//! Redraws the whole frame every call. Later layers simply overwrite earlier
//! ones; anything off the panel is clipped by the frame buffer.

use super::font::draw_number;
use super::frame::FrameBuffer;
use crate::sim::{Bins, Lattice, Particle};

/// Counter width in characters (`%3d`)
const COUNTER_DIGITS: usize = 3;

/// Compose one frame: counter, pegs, falling balls, histogram bars
pub fn render(
    fb: &mut FrameBuffer,
    lattice: &Lattice,
    particles: &[Particle],
    bins: &Bins,
    spawned_count: usize,
) {
    fb.clear();

    draw_number(fb, 0, 0, spawned_count, COUNTER_DIGITS);

    for peg in lattice.pegs() {
        fb.set_pixel(peg.x, peg.y, true);
    }

    for p in particles.iter().filter(|p| p.active) {
        fb.set_pixel(p.pos.x.round() as i32, p.pos.y.round() as i32, true);
    }

    let height = fb.height() as i32;
    let cap = (fb.height() / 2) as u64;
    for (x, count) in bins.iter() {
        let bar = (count as u64).min(cap) as i32;
        for h in 0..bar {
            fb.set_pixel(x, height - 1 - h, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generate_lattice;
    use glam::Vec2;

    fn board_parts() -> (Lattice, Bins) {
        let (lattice, bin_x) = generate_lattice(128, 64, 15, 7);
        (lattice, Bins::new(bin_x))
    }

    fn exited_at(x: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, 64.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_pegs_drawn() {
        let (lattice, bins) = board_parts();
        let mut fb = FrameBuffer::new(128, 64);
        render(&mut fb, &lattice, &[], &bins, 0);
        for peg in lattice.pegs() {
            assert!(fb.pixel(peg.x, peg.y));
        }
    }

    #[test]
    fn test_only_active_particles_drawn() {
        let (lattice, bins) = board_parts();
        let mut fb = FrameBuffer::new(128, 64);
        let particles = [
            Particle {
                pos: Vec2::new(100.4, 40.6),
                active: true,
                ..Default::default()
            },
            Particle {
                pos: Vec2::new(110.0, 45.0),
                active: false,
                settled: true,
                ..Default::default()
            },
        ];
        render(&mut fb, &lattice, &particles, &bins, 2);
        assert!(fb.pixel(100, 41));
        assert!(!fb.pixel(110, 45));
    }

    #[test]
    fn test_offscreen_particle_clipped() {
        let (lattice, bins) = board_parts();
        let mut fb = FrameBuffer::new(128, 64);
        render(&mut fb, &lattice, &[], &bins, 0);
        let baseline = fb.lit_count();
        let particles = [Particle {
            pos: Vec2::new(-20.0, 10.0),
            active: true,
            ..Default::default()
        }];
        render(&mut fb, &lattice, &particles, &bins, 0);
        assert_eq!(fb.lit_count(), baseline);
    }

    #[test]
    fn test_histogram_bar_capped_at_half_height() {
        let (lattice, mut bins) = board_parts();
        for _ in 0..40 {
            bins.settle(&mut exited_at(64.0));
        }
        for _ in 0..5 {
            bins.settle(&mut exited_at(32.0));
        }
        let mut fb = FrameBuffer::new(128, 64);
        render(&mut fb, &lattice, &[], &bins, 45);

        // Centre bin: 40 counts, capped to 32 pixels (rows 63..=32)
        assert!(fb.pixel(64, 63));
        assert!(fb.pixel(64, 32));
        // Empty bin draws nothing
        assert!(!fb.pixel(96, 63));
        // Left bin: exactly 5 pixels
        assert!(fb.pixel(32, 59));
        assert!(!fb.pixel(32, 58));
        // Counts themselves are not capped
        assert_eq!(bins.counts()[3], 40);
    }

    #[test]
    fn test_counter_drawn_and_frame_replaced() {
        let (lattice, bins) = board_parts();
        let mut fb = FrameBuffer::new(128, 64);
        fb.set_pixel(127, 40, true);
        render(&mut fb, &lattice, &[], &bins, 8);
        // Stale pixel wiped
        assert!(!fb.pixel(127, 40));
        // "  8" puts the digit in the third cell
        assert!(fb.pixel(8, 0));
        assert!(!fb.pixel(0, 0));
    }
}
