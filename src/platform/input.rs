//! Button input

use std::collections::VecDeque;

use crate::sim::TickInput;

/// Polled once per tick for start/reset edges
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Turns raw button levels into press edges
///
/// A held button reports a press only on the tick it goes down.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdges {
    last_start: bool,
    last_reset: bool,
}

impl ButtonEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current levels (`true` = held down)
    pub fn update(&mut self, start_down: bool, reset_down: bool) -> TickInput {
        let input = TickInput {
            start: start_down && !self.last_start,
            reset: reset_down && !self.last_reset,
        };
        self.last_start = start_down;
        self.last_reset = reset_down;
        input
    }
}

/// Replays a fixed list of inputs, then reports no presses
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
        }
    }

    /// Queue a press for a later tick
    pub fn push(&mut self, input: TickInput) {
        self.queue.push_back(input);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.queue.pop_front().unwrap_or_default()
    }
}
