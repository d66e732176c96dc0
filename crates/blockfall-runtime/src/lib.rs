//! Terminal tick driver for frame-based games.
//!
//! [`Runtime`] owns the terminal event loop. It forwards terminal events to an
//! [`App`] as they arrive, renders according to a [`RenderMode`], and on every
//! tick hands the app the wall-clock time elapsed since the previous tick,
//! measured by a [`FrameClock`].

pub use self::{app::App, clock::FrameClock, event_loop::RenderMode, runtime::Runtime};

mod app;
mod clock;
mod event;
mod event_loop;
mod runtime;
