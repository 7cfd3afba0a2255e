//! Action for [`Platformer`](crate::Platformer).
use scroller_core::Act;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Buttons held during one step of [`Platformer`](crate::Platformer).
///
/// `a` jumps and `b` runs. `up` and `down` are accepted but have no effect in
/// this environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Buttons {
    pub up: bool,
    pub left: bool,
    pub down: bool,
    pub right: bool,
    pub a: bool,
    pub b: bool,
}

impl Buttons {
    /// Builds buttons from a mask ordered `[up, left, down, right, a, b]`.
    pub fn from_mask(mask: [u8; 6]) -> Self {
        Self {
            up: mask[0] != 0,
            left: mask[1] != 0,
            down: mask[2] != 0,
            right: mask[3] != 0,
            a: mask[4] != 0,
            b: mask[5] != 0,
        }
    }

    /// The 14 button combinations available to agents.
    pub fn discrete() -> Vec<Self> {
        [
            [0, 0, 0, 0, 0, 0], // no-op
            [1, 0, 0, 0, 0, 0], // up
            [0, 0, 1, 0, 0, 0], // down
            [0, 1, 0, 0, 0, 0], // left
            [0, 1, 0, 0, 1, 0], // left + a
            [0, 1, 0, 0, 0, 1], // left + b
            [0, 1, 0, 0, 1, 1], // left + a + b
            [0, 0, 0, 1, 0, 0], // right
            [0, 0, 0, 1, 1, 0], // right + a
            [0, 0, 0, 1, 0, 1], // right + b
            [0, 0, 0, 1, 1, 1], // right + a + b
            [0, 0, 0, 0, 1, 0], // a
            [0, 0, 0, 0, 0, 1], // b
            [0, 0, 0, 0, 1, 1], // a + b
        ]
        .into_iter()
        .map(Self::from_mask)
        .collect()
    }

    /// Names of the pressed buttons, in mask order.
    pub fn pressed(&self) -> Vec<&'static str> {
        [
            (self.up, "up"),
            (self.left, "left"),
            (self.down, "down"),
            (self.right, "right"),
            (self.a, "a"),
            (self.b, "b"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }

    /// Horizontal direction, `-1`, `0` or `1`.
    pub fn direction(&self) -> i8 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Buttons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pressed = self.pressed();
        if pressed.is_empty() {
            f.write_str("noop")
        } else {
            f.write_str(&pressed.join("+"))
        }
    }
}

impl Act for Buttons {}
