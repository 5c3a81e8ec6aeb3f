use crossterm::event::Event as CrosstermEvent;

/// Event produced by the event loop for the runtime to dispatch.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed; the app polls background work.
    Tick,
    /// The screen is dirty and the render mode allows a frame now.
    Render,
    /// Input from the terminal: keys, pastes, resizes and focus changes.
    Crossterm(CrosstermEvent),
}
