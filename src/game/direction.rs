use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Move `pos` one cell in this direction on a `size`×`size` toroidal
    /// grid.  Both axes wrap, so the result is always in bounds.
    pub(super) fn advance(self, pos: Position, size: u16) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => y = if y == 0 { size - 1 } else { y - 1 },
            Direction::South => y = (y + 1) % size,
            Direction::East => x = (x + 1) % size,
            Direction::West => x = if x == 0 { size - 1 } else { x - 1 },
        }
        Position { x, y }
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
