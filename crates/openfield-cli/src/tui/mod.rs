//! Minimal terminal application runtime.
//!
//! [`Runtime::run`] owns the terminal and drives an [`App`] with ticks,
//! renders and crossterm events produced by the event loop.

mod app;
mod event;
mod event_loop;
mod runtime;

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};
