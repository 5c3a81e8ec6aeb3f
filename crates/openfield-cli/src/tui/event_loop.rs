use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Redraw after every tick or terminal event.
    #[default]
    OnDirty,
    /// Redraw after changes, at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    /// Throttled mode drawing at most `rate` frames per second.
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Multiplexes ticks, renders and terminal input into one stream.
///
/// Ticks take priority over renders and renders over input, so a burst of
/// key presses or a large paste cannot starve report polling or redraws.
/// Any tick or input marks the screen dirty.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
            // first frame
            dirty: true,
        }
    }
}

impl EventLoop {
    /// `None` disables ticks entirely.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until the next tick, render or terminal event is due.
    ///
    /// Waits on terminal input only until the earlier of the next tick and
    /// the next allowed render, so neither is delayed by an idle terminal.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.render_due(now) {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            match self.timeout(now) {
                Some(timeout) if !event::poll(timeout)? => continue,
                _ => {}
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Whether a dirty screen may be drawn at `now`.
    fn render_due(&self, now: Instant) -> bool {
        match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        }
    }

    /// How long to wait for terminal input before a tick or render is due.
    ///
    /// `None` means nothing is scheduled and input can be awaited
    /// indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let deadline = [next_tick, next_render].into_iter().flatten().min()?;
        Some(deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::default();
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_tick_fires_when_due() {
        let mut events = EventLoop::default();
        events.set_tick_interval(Some(Duration::from_millis(1)));
        std::thread::sleep(Duration::from_millis(2));
        assert!(events.next().unwrap().is_tick());
        assert!(events.dirty);
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let mut events = EventLoop::default();
        events.set_render_mode(RenderMode::Throttled(Duration::from_millis(100)));
        let now = Instant::now();
        events.last_render = now;
        assert!(!events.render_due(now));
        assert!(events.render_due(now + Duration::from_millis(100)));

        events.dirty = false;
        assert!(!events.render_due(now + Duration::from_secs(1)));
        assert_eq!(events.timeout(now), None);
    }

    #[test]
    fn test_timeout_is_next_tick() {
        let mut events = EventLoop::default();
        events.dirty = false;
        events.set_tick_interval(Some(Duration::from_millis(250)));
        let now = events.last_tick;
        assert_eq!(events.timeout(now), Some(Duration::from_millis(250)));
    }
}
