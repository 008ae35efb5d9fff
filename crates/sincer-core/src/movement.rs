// crates/sincer-core/src/movement.rs - Parsing and resolving `u<N>` / `d<N>` moves

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::validate::is_move_syntax;

/// Errors that can occur while parsing a move
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoveError {
    #[error("invalid move '{0}': expected u<count>, d<count>, umax or dmax")]
    InvalidSyntax(String),
}

/// Result type for move parsing
pub type MoveResult<T> = Result<T, MoveError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// How far to move: a fixed count or all the way to the list boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    Count(usize),
    Max,
}

/// A parsed move such as `u2` or `dmax`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub direction: Direction,
    pub magnitude: Magnitude,
}

impl Move {
    pub fn up(magnitude: Magnitude) -> Self {
        Self {
            direction: Direction::Up,
            magnitude,
        }
    }

    pub fn down(magnitude: Magnitude) -> Self {
        Self {
            direction: Direction::Down,
            magnitude,
        }
    }

    /// Resolve the destination index for a record at `index` in a list of `len`
    ///
    /// The result is clamped into `[0, len - 1]`, so an oversized count stops
    /// at the boundary just like `max` does.
    pub fn target(&self, index: usize, len: usize) -> usize {
        let last = len.saturating_sub(1);
        match (self.direction, self.magnitude) {
            (Direction::Up, Magnitude::Max) => 0,
            (Direction::Up, Magnitude::Count(count)) => index.saturating_sub(count),
            (Direction::Down, Magnitude::Max) => last,
            (Direction::Down, Magnitude::Count(count)) => index.saturating_add(count).min(last),
        }
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> MoveResult<Self> {
        if !is_move_syntax(s) {
            return Err(MoveError::InvalidSyntax(s.to_string()));
        }

        // Syntax is checked above, so the first byte is ASCII 'u' or 'd'
        let (head, tail) = s.split_at(1);
        // A count too big for usize is past any boundary anyway
        let magnitude = match tail {
            "max" => Magnitude::Max,
            digits => digits.parse().map_or(Magnitude::Max, Magnitude::Count),
        };

        Ok(match head {
            "u" => Self::up(magnitude),
            _ => Self::down(magnitude),
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = match self.direction {
            Direction::Up => 'u',
            Direction::Down => 'd',
        };
        match self.magnitude {
            Magnitude::Max => write!(f, "{}max", head),
            Magnitude::Count(count) => write!(f, "{}{}", head, count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!("u2".parse(), Ok(Move::up(Magnitude::Count(2))));
        assert_eq!("d0".parse(), Ok(Move::down(Magnitude::Count(0))));
        assert_eq!("umax".parse(), Ok(Move::up(Magnitude::Max)));
        assert_eq!("dmax".parse(), Ok(Move::down(Magnitude::Max)));
    }

    #[test]
    fn test_reject_bad_syntax() {
        for bad in ["", "x2", "u", "d-1", "up2", "u2x", "Umax", "u 2"] {
            assert_eq!(
                bad.parse::<Move>(),
                Err(MoveError::InvalidSyntax(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_oversized_count_reaches_the_boundary() {
        let down: Move = "d99999999999999999999999999".parse().unwrap();
        assert_eq!(down.target(0, 3), 2);

        let up: Move = "u99999999999999999999999999".parse().unwrap();
        assert_eq!(up.target(2, 3), 0);
    }

    #[test]
    fn test_targets_are_clamped() {
        // list of 5, record at index 2
        assert_eq!(Move::up(Magnitude::Count(1)).target(2, 5), 1);
        assert_eq!(Move::up(Magnitude::Count(10)).target(2, 5), 0);
        assert_eq!(Move::up(Magnitude::Max).target(2, 5), 0);
        assert_eq!(Move::down(Magnitude::Count(1)).target(2, 5), 3);
        assert_eq!(Move::down(Magnitude::Count(usize::MAX)).target(2, 5), 4);
        assert_eq!(Move::down(Magnitude::Max).target(2, 5), 4);
        assert_eq!(Move::down(Magnitude::Count(0)).target(2, 5), 2);
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(Move::up(Magnitude::Max).to_string(), "umax");
        assert_eq!(Move::down(Magnitude::Count(3)).to_string(), "d3");
    }
}
