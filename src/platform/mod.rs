//! Platform abstraction layer
//!
//! The simulation talks to hardware through two seams:
//! - `DisplaySink`: pushes a finished frame to the panel
//! - `InputSource`: yields debounced button edges once per tick
//!
//! Host implementations (terminal output, scripted input) live alongside.

pub mod display;
pub mod input;

pub use display::{DisplaySink, NullDisplay, TerminalDisplay, frame_to_text};
pub use input::{ButtonEdges, InputSource, ScriptedInput};
