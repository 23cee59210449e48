//! Display sinks

use std::io::Write;

use crate::renderer::FrameBuffer;

/// Pushes a composed frame to the physical (or emulated) panel
pub trait DisplaySink {
    fn flush(&mut self, frame: &FrameBuffer);
}

/// Discards frames (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn flush(&mut self, _frame: &FrameBuffer) {}
}

/// Draws frames on a terminal, two pixel rows per text line
pub struct TerminalDisplay<W: Write> {
    out: W,
    /// Redraw in place instead of scrolling
    in_place: bool,
    frames: u64,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, in_place: bool) -> Self {
        Self {
            out,
            in_place,
            frames: 0,
        }
    }

    /// Frames flushed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render a frame as half-block text, one line per pair of pixel rows
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    let (w, h) = (frame.width() as i32, frame.height() as i32);
    let mut text = String::with_capacity(((w + 1) * (h / 2 + 1)) as usize * 3);
    for y in (0..h).step_by(2) {
        for x in 0..w {
            let ch = match (frame.pixel(x, y), frame.pixel(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            };
            text.push(ch);
        }
        text.push('\n');
    }
    text
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn flush(&mut self, frame: &FrameBuffer) {
        let text = frame_to_text(frame);
        let prefix = if self.in_place { "\x1b[H" } else { "" };
        if let Err(e) = write!(self.out, "{prefix}{text}").and_then(|_| self.out.flush()) {
            log::warn!("Terminal display write failed: {}", e);
        }
        self.frames += 1;
    }
}
