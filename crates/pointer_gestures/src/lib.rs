//! Headless drag and resize gesture engines.
//!
//! The engines know nothing about the DOM. Hosts feed them pointer positions and element
//! measurements, and apply the positions and sizes they return. Time is also external: a drag
//! press reports how long to wait before calling [`DragGesture::start_elapsed`], and the host owns
//! the timer.

pub mod drag;
pub mod geometry;
pub mod resize;

pub use drag::{
    DragGesture, DragMove, DragOptions, DragRelease, PressOutcome, PressToken, StartGate,
    DEFAULT_START_DELAY_MS, DEFAULT_START_DISTANCE_PX,
};
pub use geometry::{Bounds, Point, Rect, Size};
pub use resize::{AppliedSize, ResizeGesture, ResizeOptions, ResizePolicy};
