use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// A terminal program driven by [`Runtime::run`].
///
/// Events are delivered in arrival order between ticks. Applications that
/// drive a simulation typically buffer input in [`handle_event`] and apply
/// it at the start of the next [`update`], before advancing time.
///
/// [`handle_event`]: Self::handle_event
/// [`update`]: Self::update
pub trait App {
    /// Called once before the first event; the place to set the tick rate and
    /// render mode.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Receives one terminal event: a key, mouse, or resize.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the whole screen.
    fn draw(&self, frame: &mut Frame);

    /// Advances the program by one tick.
    ///
    /// `elapsed` is the time since the previous tick; it is zero on the first
    /// tick after the tick rate was set.
    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration);
}
