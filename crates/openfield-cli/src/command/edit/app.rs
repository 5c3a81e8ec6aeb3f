use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::edit::screens::EditorScreen,
    tui::{App, RenderMode, Runtime},
};

/// How often a running report generation is checked for completion.
const POLL_RATE: f64 = 4.0;
const FRAME_RATE: f64 = 30.0;

#[derive(Debug)]
pub struct EditApp {
    screen: EditorScreen,
}

impl EditApp {
    pub fn new(screen: EditorScreen) -> Self {
        Self { screen }
    }
}

impl App for EditApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(POLL_RATE));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FRAME_RATE));
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.screen.update();
    }
}
