//! The eight relative neighbour directions in fixed raster order
//!
//! Directions are enumerated left-to-right, top-to-bottom around the centre
//! cell, skipping the centre. Rows grow downwards, so `(dx, dy) = (-1, -1)` is
//! the top-left neighbour. With this order the opposite of direction `d` is
//! always `7 - d`.

/// Number of neighbour directions
pub const DIRECTION_COUNT: usize = 8;

/// Relative neighbour position around a centre cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// (-1, -1)
    TopLeft,
    /// (0, -1)
    Top,
    /// (1, -1)
    TopRight,
    /// (-1, 0)
    Left,
    /// (1, 0)
    Right,
    /// (-1, 1)
    BottomLeft,
    /// (0, 1)
    Bottom,
    /// (1, 1)
    BottomRight,
}

impl Direction {
    /// All directions in raster order
    pub const ALL: [Self; DIRECTION_COUNT] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    /// Position of this direction in the raster enumeration
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction at the given raster index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column and row offset `(dx, dy)`, rows growing downwards
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::Top => (0, -1),
            Self::TopRight => (1, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::BottomLeft => (-1, 1),
            Self::Bottom => (0, 1),
            Self::BottomRight => (1, 1),
        }
    }

    /// The direction looking back from the neighbour towards the centre
    pub const fn inverse(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::Top => Self::Bottom,
            Self::TopRight => Self::BottomLeft,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::BottomLeft => Self::TopRight,
            Self::Bottom => Self::Top,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// Neighbour of `(x, y)` in this direction, if it lies inside `width` x `height`
    pub fn step(self, x: usize, y: usize, width: usize, height: usize) -> Option<[usize; 2]> {
        let (dx, dy) = self.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some([nx, ny])
    }
}

/// Iterate the in-bounds neighbours of `(x, y)` with their direction
pub fn neighbours(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (Direction, [usize; 2])> {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| {
            direction
                .step(x, y, width, height)
                .map(|position| (direction, position))
        })
}
