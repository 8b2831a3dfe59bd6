//! Movement directions between neighbouring block cells.

use crate::geom::BlockPos;

/// One of the ten moves an agent can make between adjacent cells.
///
/// North is −z, east is +x. The eight horizontal directions are what the
/// search expands; `Up` and `Down` describe pure vertical moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Up,
    Down,
}

impl Direction {
    /// The eight horizontal directions, clockwise from north.
    pub const HORIZONTAL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The four cardinal directions, clockwise from north.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset of the move.
    #[inline]
    pub const fn normal(self) -> BlockPos {
        match self {
            Direction::North => BlockPos::new(0, 0, -1),
            Direction::NorthEast => BlockPos::new(1, 0, -1),
            Direction::East => BlockPos::new(1, 0, 0),
            Direction::SouthEast => BlockPos::new(1, 0, 1),
            Direction::South => BlockPos::new(0, 0, 1),
            Direction::SouthWest => BlockPos::new(-1, 0, 1),
            Direction::West => BlockPos::new(-1, 0, 0),
            Direction::NorthWest => BlockPos::new(-1, 0, -1),
            Direction::Up => BlockPos::new(0, 1, 0),
            Direction::Down => BlockPos::new(0, -1, 0),
        }
    }

    /// Whether the move changes both x and z.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    #[inline]
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Direction::Up | Direction::Down)
    }

    /// The reverse move.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}
