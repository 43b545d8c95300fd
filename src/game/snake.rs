use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// The body is an ordered sequence of grid cells with the head at the front.
/// The length never drops below
/// [`MIN_SNAKE_LENGTH`][consts::MIN_SNAKE_LENGTH].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    cells: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Create a snake of `length` cells with its head at `head`, facing
    /// `direction`, with the body trailing behind it
    pub(super) fn new(head: Position, direction: Direction, length: usize) -> Snake {
        let mut cells = VecDeque::with_capacity(length);
        cells.push_back(head);
        let backwards = direction.reverse();
        for _ in 1..length {
            let &tail = cells.back().expect("cells should be nonempty");
            cells.push_back(backwards.advance(tail, consts::GRID_SIZE));
        }
        Snake { cells, direction }
    }

    pub(super) fn head(&self) -> Position {
        *self.cells.front().expect("snake should never be empty")
    }

    pub(super) fn cells(&self) -> &VecDeque<Position> {
        &self.cells
    }

    pub(super) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Change direction, unless the request is an exact reversal (which
    /// would mean instant self-collision).  Returns whether the turn took.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Put a new head cell at the front.  The tail is left alone; callers
    /// follow up with [`Snake::drop_tail`] for a plain move.
    pub(super) fn push_head(&mut self, pos: Position) {
        self.cells.push_front(pos);
    }

    pub(super) fn drop_tail(&mut self) {
        if self.cells.len() > consts::MIN_SNAKE_LENGTH {
            let _ = self.cells.pop_back();
        }
    }

    /// Append `n` duplicates of the tail cell; they unstack as the snake
    /// moves on
    pub(super) fn grow_tail(&mut self, n: usize) {
        let &tail = self.cells.back().expect("snake should never be empty");
        for _ in 0..n {
            self.cells.push_back(tail);
        }
    }

    /// Remove up to `n` tail cells, never shrinking below the minimum length
    pub(super) fn shrink_tail(&mut self, n: usize) {
        for _ in 0..n {
            if self.cells.len() <= consts::MIN_SNAKE_LENGTH {
                break;
            }
            let _ = self.cells.pop_back();
        }
    }

    /// Return the glyph to use for drawing the snake's head
    pub(super) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new(Position::new(10, 10), Direction::North, 3);
        let cells = snake.cells().iter().copied().collect::<Vec<_>>();
        assert_eq!(
            cells,
            vec![
                Position::new(10, 10),
                Position::new(10, 11),
                Position::new(10, 12),
            ]
        );
        assert_eq!(snake.head(), Position::new(10, 10));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut snake = Snake::new(Position::new(10, 10), Direction::North, 3);
        assert!(!snake.turn(Direction::South));
        assert_eq!(snake.direction(), Direction::North);
        assert!(snake.turn(Direction::East));
        assert_eq!(snake.direction(), Direction::East);
    }

    #[test]
    fn shrink_respects_minimum_length() {
        let mut snake = Snake::new(Position::new(10, 10), Direction::North, 4);
        snake.shrink_tail(10);
        assert_eq!(snake.len(), consts::MIN_SNAKE_LENGTH);
        snake.drop_tail();
        assert_eq!(snake.len(), consts::MIN_SNAKE_LENGTH);
    }

    #[test]
    fn grow_duplicates_tail() {
        let mut snake = Snake::new(Position::new(10, 10), Direction::North, 2);
        snake.grow_tail(2);
        assert_eq!(snake.len(), 4);
        let cells = snake.cells().iter().copied().collect::<Vec<_>>();
        assert_eq!(cells[2], cells[1]);
        assert_eq!(cells[3], cells[1]);
    }
}
