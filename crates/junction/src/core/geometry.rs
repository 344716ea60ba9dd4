//! Grid geometry primitives
//!
//! Points live on a discrete character grid: `x` grows to the right and `y`
//! grows downwards, matching terminal rows and columns. Coordinates are signed
//! so diagrams can be laid out around an arbitrary origin.

use std::fmt;
use std::ops::{Add, Sub};

/// Largest coordinate magnitude accepted from markup and the command line
///
/// Keeps a composed frame at most `2 * COORDINATE_LIMIT + 1` cells per side
/// (plus node label overhang). The router itself accepts any `i32` point.
pub const COORDINATE_LIMIT: i32 = 1_000;

/// An integer position on the character grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a point from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: the larger of the two axis deltas
    ///
    /// Zero if and only if both points are equal. Along a single axis this is
    /// exactly the number of cells between the two points. Unsigned, so the
    /// span between `i32::MIN` and `i32::MAX` fits.
    pub fn distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// True when both coordinates lie within [`COORDINATE_LIMIT`]
    pub fn within_limit(self) -> bool {
        self.x.unsigned_abs() <= COORDINATE_LIMIT as u32
            && self.y.unsigned_abs() <= COORDINATE_LIMIT as u32
    }

    /// Move `amount` cells along `direction` (negative moves left or up)
    pub fn step(self, direction: Direction, amount: i32) -> Self {
        match direction {
            Direction::Horizontal => Self::new(self.x + amount, self.y),
            Direction::Vertical => Self::new(self.x, self.y + amount),
        }
    }

    /// The coordinate of this point on the given axis
    pub fn along(self, direction: Direction) -> i32 {
        match direction {
            Direction::Horizontal => self.x,
            Direction::Vertical => self.y,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The axis a straight line runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// The perpendicular axis
    pub fn other(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Horizontal => write!(f, "H"),
            Direction::Vertical => write!(f, "V"),
        }
    }
}

/// Sign of `to - from`: 1 if `to` is greater, -1 if smaller, 0 if equal
pub fn comparison(to: i32, from: i32) -> i32 {
    to.cmp(&from) as i32
}
