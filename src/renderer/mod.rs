//! Monochrome rendering
//!
//! The simulation draws into a page-ordered 1-bit buffer; pushing it to real
//! hardware is the display sink's job.

pub mod compose;
pub mod font;
pub mod frame;

pub use compose::render;
pub use frame::FrameBuffer;
