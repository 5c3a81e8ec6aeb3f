use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// An application driven by [`Runtime::run`].
///
/// The runtime calls [`App::init`] once, then for every event from the loop
/// calls [`App::update`] (ticks), [`App::draw`] (renders) or
/// [`App::handle_event`] (terminal input), checking [`App::should_exit`]
/// after each one.
pub trait App {
    /// Called once before the first event. Configure the tick rate and
    /// render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns `true` once the user asked to leave; the runtime then restores
    /// the terminal and returns.
    fn should_exit(&self) -> bool;

    /// Handles key presses, bracketed pastes and resizes.
    ///
    /// Each call marks the screen dirty, so state changed here is drawn on
    /// the next render.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the whole screen from current state. Must not mutate anything.
    fn draw(&self, frame: &mut Frame);

    /// Called on every tick. Results of background work, such as a finished
    /// report, are collected here without blocking input handling.
    fn update(&mut self, runtime: &mut Runtime);
}
