//! Directional input intents.
//!
//! The core sees input as four "currently held" booleans sampled once
//! per tick by the driver; nothing else about the input device leaks
//! in here.

use strum::EnumIter;

/// One of the four grid directions.
///
/// Wire codes (`0=up, 1=down, 2=left, 3=right`) are the contract with
/// external decision sources and are stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(dx, dy)` in screen coordinates (up is negative y).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held movement intents for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn holding(direction: Direction) -> Self {
        let mut input = Self::NONE;
        match direction {
            Direction::Up => input.up = true,
            Direction::Down => input.down = true,
            Direction::Left => input.left = true,
            Direction::Right => input.right = true,
        }
        input
    }

    /// Resolves the held intents to at most one direction with fixed
    /// priority up, down, left, right. Mutually exclusive by
    /// construction, so a diagonal step cannot be expressed.
    pub fn held_direction(self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn priority_order_is_up_down_left_right() {
        let all = InputState {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        assert_eq!(all.held_direction(), Some(Direction::Up));

        let no_up = InputState {
            down: true,
            left: true,
            right: true,
            ..InputState::NONE
        };
        assert_eq!(no_up.held_direction(), Some(Direction::Down));

        let horizontal = InputState {
            left: true,
            right: true,
            ..InputState::NONE
        };
        assert_eq!(horizontal.held_direction(), Some(Direction::Left));

        assert_eq!(InputState::NONE.held_direction(), None);
    }

    #[test]
    fn codes_round_trip() {
        for direction in Direction::iter() {
            assert_eq!(Direction::from_code(direction.code()), Some(direction));
        }
        assert_eq!(Direction::from_code(4), None);
    }
}
