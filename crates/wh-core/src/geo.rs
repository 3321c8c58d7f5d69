//! Floor-plan coordinates.
//!
//! The warehouse is flat, so positions are 2-D `(x, y)` in metres.  Only
//! distances and straight-line stepping are needed; steering and collision
//! geometry are not modelled.

/// A point on the warehouse floor, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` if `other` lies strictly closer than `tolerance`.
    #[inline]
    pub fn within(self, other: Position, tolerance: f32) -> bool {
        self.distance(other) < tolerance
    }

    /// Move at most `max_step` metres towards `target`.
    ///
    /// Snaps exactly onto `target` when it is within reach, so a mover never
    /// overshoots and oscillates around its goal.
    pub fn step_towards(self, target: Position, max_step: f32) -> Position {
        let d = self.distance(target);
        if d <= max_step || d == 0.0 {
            return target;
        }
        let t = max_step / d;
        Position {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }

    /// Coordinates as an array, the layout the R-tree index expects.
    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Position {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
