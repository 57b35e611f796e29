//! Travel directions and floor numbering.

use std::fmt;

/// A floor number.  Floors are numbered from 1 upwards.
pub type Floor = u32;

// ── Direction ─────────────────────────────────────────────────────────────────

/// Direction of a call, or of a car's current sweep.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Up, Direction::Down];

    /// Direction of travel from `origin` to `destination`; `None` when equal.
    #[inline]
    pub fn between(origin: Floor, destination: Floor) -> Option<Direction> {
        match destination.cmp(&origin) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less    => Some(Direction::Down),
            std::cmp::Ordering::Equal   => None,
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up   => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// `true` if `floor` lies strictly ahead of `from` when travelling in `self`.
    #[inline]
    pub fn is_ahead(self, from: Floor, floor: Floor) -> bool {
        match self {
            Direction::Up   => floor > from,
            Direction::Down => floor < from,
        }
    }

    /// Array slot for direction-indexed storage.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Direction::Up   => 0,
            Direction::Down => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up   => "up",
            Direction::Down => "down",
        })
    }
}

// ── Heading ───────────────────────────────────────────────────────────────────

/// A car's direction state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    #[default]
    Idle,
    Up,
    Down,
}

impl Heading {
    /// The sweep direction, or `None` while idle.
    #[inline]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Heading::Idle => None,
            Heading::Up   => Some(Direction::Up),
            Heading::Down => Some(Direction::Down),
        }
    }

    #[inline]
    pub fn is_idle(self) -> bool {
        self == Heading::Idle
    }
}

impl From<Direction> for Heading {
    fn from(d: Direction) -> Heading {
        match d {
            Direction::Up   => Heading::Up,
            Direction::Down => Heading::Down,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(d) => d.fmt(f),
            None    => f.write_str("idle"),
        }
    }
}
