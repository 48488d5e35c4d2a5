//! Input events and the intents derived from them.
//!
//! Raw device handling lives with the platform layer; the character only sees
//! these already-mapped events.

use serde::{Deserialize, Serialize};

/// Edge of a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonAction {
    /// Button went down
    Pressed,
    /// Button came up
    Released,
}

impl ButtonAction {
    /// Check if this is a press.
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }
}

/// Mapped input delivered to the character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Sprint modifier
    Sprint(ButtonAction),
    /// Primary attack / interact
    Attack(ButtonAction),
    /// Pause menu key
    Pause(ButtonAction),
    /// Forward axis, -1.0 to 1.0
    MoveForward(f32),
    /// Right axis, -1.0 to 1.0
    MoveRight(f32),
}

/// Movement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAxis {
    /// Forward/backward
    Forward,
    /// Strafe
    Right,
}

/// Held intents read by the per-tick state machines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentState {
    /// Sprint is held.
    pub sprint_held: bool,
    moving_forward: bool,
    moving_right: bool,
}

impl IntentState {
    /// Record an axis value.
    ///
    /// The axis only counts as moving for a non-zero value while the
    /// character is free to move (`blocked` covers attacking or dead).
    pub fn set_axis(&mut self, axis: MoveAxis, value: f32, blocked: bool) {
        let moving = value != 0.0 && !blocked;
        match axis {
            MoveAxis::Forward => self.moving_forward = moving,
            MoveAxis::Right => self.moving_right = moving,
        }
    }

    /// Check if either axis is producing movement.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.moving_forward || self.moving_right
    }

    /// Stop all movement, keeping the sprint latch.
    pub fn halt(&mut self) {
        self.moving_forward = false;
        self.moving_right = false;
    }
}
