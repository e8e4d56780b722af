//! The capability every mode handler implements

use crossterm::event::KeyEvent;

/// A mode's input handler.
///
/// The controller guarantees `handle` sees every event delivered while the
/// handler's mode is current, before any mode change that event triggers.
pub trait InputHandler {
    /// Consumes one input event. Returns false to stop the input loop.
    fn handle(&mut self, event: KeyEvent) -> bool;

    /// True when seeing `event` should make this handler's mode current.
    fn causes_mode_start(&self, event: KeyEvent) -> bool;

    /// Called when this handler's mode becomes active.
    fn initialise_mode(&mut self);

    /// Called when this handler's mode stops being active.
    fn finalise_mode(&mut self);
}
