use std::{
    io::{self, Write as _},
    time::Duration,
};

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
};

use super::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Owns the event loop and runs an [`App`] until it asks to exit.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate in Hz; `None` disables ticks.
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.events
            .set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs `app` on the alternate screen with bracketed paste enabled, so a
    /// pasted column arrives as a single event.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            execute!(io::stdout(), EnableBracketedPaste)?;
            let result = (|| -> io::Result<()> {
                while !app.should_exit() {
                    match self.events.next()? {
                        TuiEvent::Tick => app.update(&mut self),
                        TuiEvent::Render => {
                            terminal.draw(|f| app.draw(f))?;
                        }
                        TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                    }
                }
                Ok(())
            })();
            execute!(io::stdout(), DisableBracketedPaste)?;
            io::stdout().flush()?;
            result
        })
    }
}
