//! Pointer-driven resize state machine.
//!
//! `Idle -> Resizing -> Idle`. The press records how far the pointer sits from the resizable
//! element's bottom-right corner; each move then sizes the element so that corner keeps that
//! distance from the pointer, never below the configured minimums. Resizing has no start or end
//! notification.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// How a computed size is applied to the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Set width and height only.
    #[default]
    Free,
    /// Also set max-width/max-height to the same values, so content cannot grow the element
    /// past the size the handle chose.
    MirrorMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeOptions {
    pub min_width: f64,
    pub min_height: f64,
    #[serde(default)]
    pub policy: ResizePolicy,
}

impl ResizeOptions {
    pub fn new(min_width: f64, min_height: f64) -> Self {
        Self {
            min_width,
            min_height,
            policy: ResizePolicy::Free,
        }
    }

    pub fn with_policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Dimensions to write onto the resizable element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedSize {
    pub size: Size,
    /// Present under [`ResizePolicy::MirrorMax`].
    pub max: Option<Size>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    options: ResizeOptions,
    grip: Option<Point>,
}

impl ResizeGesture {
    pub fn new(options: ResizeOptions) -> Self {
        Self {
            options,
            grip: None,
        }
    }

    pub fn options(&self) -> &ResizeOptions {
        &self.options
    }

    pub fn is_active(&self) -> bool {
        self.grip.is_some()
    }

    /// Starts resizing. `target` is the resizable element's box, not the handle's; returns
    /// `false` when it is not mounted.
    pub fn pointer_down(&mut self, pointer: Point, target: Option<Rect>) -> bool {
        let Some(target) = target else {
            return false;
        };
        self.grip = Some(Point::new(
            target.right() - pointer.x,
            target.bottom() - pointer.y,
        ));
        true
    }

    /// Computes the new size from the element's current top-left, re-measured for this move.
    pub fn pointer_move(&mut self, pointer: Point, target: Option<Rect>) -> Option<AppliedSize> {
        let grip = self.grip?;
        let target = target?;
        let size = Size::new(
            (pointer.x - target.left + grip.x).max(self.options.min_width),
            (pointer.y - target.top + grip.y).max(self.options.min_height),
        );
        Some(AppliedSize {
            size,
            max: match self.options.policy {
                ResizePolicy::Free => None,
                ResizePolicy::MirrorMax => Some(size),
            },
        })
    }

    /// Ends resizing; returns whether a resize was live.
    pub fn pointer_up(&mut self) -> bool {
        self.grip.take().is_some()
    }
}
