//! Steering input and the turn directive derived from it

use serde::{Deserialize, Serialize};

/// Turn directive for one snake advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Motion {
    #[default]
    Straight,
    /// Counter-clockwise on screen
    Left,
    /// Clockwise on screen
    Right,
}

impl Motion {
    /// Rotation sign in screen coordinates (y down)
    pub fn turn_sign(self) -> f32 {
        match self {
            Motion::Straight => 0.0,
            Motion::Left => -1.0,
            Motion::Right => 1.0,
        }
    }
}

/// Both keys held (or neither) cancel out
#[inline]
pub fn resolve_motion(left: bool, right: bool) -> Motion {
    match (left, right) {
        (true, false) => Motion::Left,
        (false, true) => Motion::Right,
        _ => Motion::Straight,
    }
}

/// Raw left/right flags plus everything derived from them
///
/// `motion` and `ever_turned` are only written by the setters, so they can
/// never disagree with the flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    left: bool,
    right: bool,
    motion: Motion,
    ever_turned: bool,
}

impl Steering {
    pub fn left(&self) -> bool {
        self.left
    }

    pub fn right(&self) -> bool {
        self.right
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// True from the first time either key was pressed; never resets
    pub fn ever_turned(&self) -> bool {
        self.ever_turned
    }

    pub fn set_left(&mut self, pressed: bool) {
        self.set(pressed, self.right);
    }

    pub fn set_right(&mut self, pressed: bool) {
        self.set(self.left, pressed);
    }

    pub fn set(&mut self, left: bool, right: bool) {
        self.left = left;
        self.right = right;
        self.motion = resolve_motion(left, right);
        self.ever_turned = self.ever_turned || left || right;
    }
}
