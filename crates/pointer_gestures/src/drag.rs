//! Pointer-driven drag state machine.
//!
//! `Idle -> Pressed -> (Started) -> Idle`. A press captures the pointer's offset inside the
//! handle. While the press is live every move yields a new top-left for the dragged element,
//! clamped to [`DragOptions::bounds`] using the element size measured for that move. The
//! "started" notification is gated by [`StartGate`]; releasing the pointer ends the press and
//! voids any start still pending.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point, Rect, Size};

pub const DEFAULT_START_DELAY_MS: u32 = 100;
pub const DEFAULT_START_DISTANCE_PX: f64 = 5.0;

/// Decides when a press counts as a drag rather than a click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StartGate {
    /// Started as soon as the handle is pressed.
    Immediate,
    /// Started once the press has been held for `millis`.
    Delay { millis: u32 },
    /// Started once the pointer travels more than `pixels` on either axis. The element does not
    /// follow the pointer before that.
    Distance { pixels: f64 },
}

impl Default for StartGate {
    fn default() -> Self {
        Self::Delay {
            millis: DEFAULT_START_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragOptions {
    pub bounds: Bounds,
    #[serde(default)]
    pub start_gate: StartGate,
    /// Ask the host to resolve the element under the pointer on release.
    #[serde(default)]
    pub report_drop_target: bool,
}

/// Identifies one press. Delayed starts carry it so they can only start the press that armed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PressToken(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressOutcome {
    /// The handle has not been measured (not mounted); nothing was captured.
    Ignored,
    Pressed {
        token: PressToken,
        /// Schedule [`DragGesture::start_elapsed`] after this long.
        start_after: Option<Duration>,
        /// The press started the drag on its own ([`StartGate::Immediate`]).
        started: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragMove {
    /// This move crossed the distance gate.
    pub started: bool,
    /// New top-left for the dragged element, already clamped.
    pub origin: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub token: PressToken,
    pub pointer: Point,
    pub started: bool,
    /// A delayed start was still pending and must be cancelled.
    pub cancelled_pending_start: bool,
    pub report_drop_target: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    token: PressToken,
    grip: Point,
    down_at: Point,
    started: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    options: DragOptions,
    press: Option<Press>,
    presses: u64,
}

impl DragGesture {
    pub fn new(options: DragOptions) -> Self {
        Self {
            options,
            press: None,
            presses: 0,
        }
    }

    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Bounds may change between moves (viewport resize); the next move uses the new ones.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.options.bounds = bounds;
    }

    pub fn is_active(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_started(&self) -> bool {
        self.press.map(|press| press.started).unwrap_or(false)
    }

    /// Captures the pointer offset inside the handle. A press over a live one replaces it.
    pub fn pointer_down(&mut self, pointer: Point, handle: Option<Rect>) -> PressOutcome {
        let Some(handle) = handle else {
            return PressOutcome::Ignored;
        };
        self.presses = self.presses.wrapping_add(1);
        let token = PressToken(self.presses);
        let started = matches!(self.options.start_gate, StartGate::Immediate);
        let start_after = match self.options.start_gate {
            StartGate::Delay { millis } => Some(Duration::from_millis(u64::from(millis))),
            StartGate::Immediate | StartGate::Distance { .. } => None,
        };
        self.press = Some(Press {
            token,
            grip: pointer.offset_from(handle.origin()),
            down_at: pointer,
            started,
        });
        PressOutcome::Pressed {
            token,
            start_after,
            started,
        }
    }

    /// Called when a delayed start fires. Returns `true` if the drag starts now.
    pub fn start_elapsed(&mut self, token: PressToken) -> bool {
        let delayed = matches!(self.options.start_gate, StartGate::Delay { .. });
        match self.press.as_mut() {
            Some(press) if delayed && press.token == token && !press.started => {
                press.started = true;
                true
            }
            _ => false,
        }
    }

    /// Tracks the pointer. `element` is the dragged element's current size, measured for this
    /// move; without it no position is produced.
    pub fn pointer_move(&mut self, pointer: Point, element: Option<Size>) -> DragMove {
        let gate = self.options.start_gate;
        let bounds = self.options.bounds;
        let Some(press) = self.press.as_mut() else {
            return DragMove::default();
        };

        let mut started_now = false;
        if let StartGate::Distance { pixels } = gate {
            if !press.started {
                let travel = pointer.offset_from(press.down_at);
                if travel.x.abs() <= pixels && travel.y.abs() <= pixels {
                    return DragMove::default();
                }
                press.started = true;
                started_now = true;
            }
        }

        let desired = pointer.offset_from(press.grip);
        DragMove {
            started: started_now,
            origin: element.map(|size| bounds.clamp_origin(desired, size)),
        }
    }

    /// Ends the press. `None` when no press was live.
    pub fn pointer_up(&mut self, pointer: Point) -> Option<DragRelease> {
        let press = self.press.take()?;
        let delayed = matches!(self.options.start_gate, StartGate::Delay { .. });
        Some(DragRelease {
            token: press.token,
            pointer,
            started: press.started,
            cancelled_pending_start: delayed && !press.started,
            report_drop_target: self.options.report_drop_target,
        })
    }
}
