use std::time::Duration;

use crate::tui::app::Command;

const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Braille dot spinner advanced by ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinner {
    frame: usize,
    interval: Duration,
}

impl Spinner {
    pub fn new(interval: Duration) -> Self {
        Self { frame: 0, interval }
    }

    /// Command that starts the tick loop.
    pub fn start(&self) -> Command {
        Command::ScheduleTick(self.interval)
    }

    /// Advance one frame and ask for the next tick.
    pub fn update(&mut self) -> Option<Command> {
        self.frame = (self.frame + 1) % FRAMES.len();
        Some(Command::ScheduleTick(self.interval))
    }

    pub fn frame(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }
}
