//! Input stashed by the window host between render passes.
//!
//! Event handlers only record the latest input here. The render pass is the
//! sole consumer: every `take_*` accessor returns the pending value and clears
//! it, so each input occurrence is applied at most once.

use serde::{Deserialize, Serialize};

use crate::core::NudgeDirection;

/// Drag steps larger than this on either axis are treated as a new drag.
pub const DRAG_JUMP_LIMIT_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    cursor: Option<(f64, f64)>,
    pending_pan: (f64, f64),
    last_drag: Option<(f64, f64)>,
    pending_wheel: Option<f64>,
    pending_key: Option<NudgeDirection>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            cursor: None,
            pending_pan: (0.0, 0.0),
            last_drag: None,
            pending_wheel: None,
            pending_key: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Last known pointer position; `None` before the first move or after leave.
    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    /// Accumulated, not yet consumed drag vector.
    #[must_use]
    pub fn pending_pan(&self) -> (f64, f64) {
        self.pending_pan
    }

    #[must_use]
    pub fn pending_wheel(&self) -> Option<f64> {
        self.pending_wheel
    }

    #[must_use]
    pub fn pending_key(&self) -> Option<NudgeDirection> {
        self.pending_key
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
    }

    pub fn on_pan_start(&mut self) {
        self.mode = InteractionMode::Panning;
        self.last_drag = None;
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
        self.last_drag = None;
    }

    /// Records a drag position and accumulates the step from the previous one.
    ///
    /// The step is dropped when there is no previous position or when it
    /// jumps by [`DRAG_JUMP_LIMIT_PX`] or more on either axis.
    pub fn on_drag(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.last_drag {
            let step_x = x - last_x;
            let step_y = y - last_y;
            if step_x.abs() < DRAG_JUMP_LIMIT_PX && step_y.abs() < DRAG_JUMP_LIMIT_PX {
                self.pending_pan.0 += step_x;
                self.pending_pan.1 += step_y;
            }
        }
        self.last_drag = Some((x, y));
        self.cursor = Some((x, y));
    }

    /// Stores the latest wheel delta, replacing any unconsumed one.
    pub fn on_wheel(&mut self, delta: f64) {
        if delta.is_finite() && delta != 0.0 {
            self.pending_wheel = Some(delta);
        }
    }

    /// Stores the latest navigation key, replacing any unconsumed one.
    pub fn on_key(&mut self, direction: NudgeDirection) {
        self.pending_key = Some(direction);
    }

    /// Returns and clears the accumulated drag vector.
    pub fn take_pan(&mut self) -> (f64, f64) {
        std::mem::replace(&mut self.pending_pan, (0.0, 0.0))
    }

    pub fn take_wheel(&mut self) -> Option<f64> {
        self.pending_wheel.take()
    }

    pub fn take_key(&mut self) -> Option<NudgeDirection> {
        self.pending_key.take()
    }

    /// Drops every pending input while keeping the cursor.
    pub fn clear_pending(&mut self) {
        self.pending_pan = (0.0, 0.0);
        self.pending_wheel = None;
        self.pending_key = None;
    }
}
