use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Application driven by [`Runtime::run`].
pub trait App {
    /// Called once the terminal is ready, before the first event.
    ///
    /// Configure the render mode and the first wake-up here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles key input, resize and other terminal events.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Called when the deadline set with [`Runtime::wake_at`] passes.
    fn update(&mut self, runtime: &mut Runtime);
}
