use crate::{Position, CELL_SIZE, START_LENGTH};

/// Compass direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-cell pixel delta for a single advance.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -CELL_SIZE),
            Direction::Down => (0, CELL_SIZE),
            Direction::Left => (-CELL_SIZE, 0),
            Direction::Right => (CELL_SIZE, 0),
        }
    }
}

/// The player-controlled snake: ordered segments with the head at index 0.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: Vec<Position>,
    direction: Direction,
}

impl Default for Snake {
    fn default() -> Self {
        // Every starting segment is stacked on one cell; they fan out over
        // the first few ticks.
        Self {
            segments: vec![Position::new(CELL_SIZE, CELL_SIZE); START_LENGTH],
            direction: Direction::Down,
        }
    }
}

impl Snake {
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    /// Trailing segments, i.e. everything behind the head.
    pub fn trailing(&self) -> &[Position] {
        &self.segments[1..]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Adopt a new direction of travel. Reversing into your own body is
    /// not rejected here; it ends the round like any other self collision.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Append a placeholder segment. The next `advance` shifts a real
    /// trailing position into it, so growth becomes visible one tick after
    /// the apple is eaten.
    pub fn grow(&mut self) {
        let tail = self.segments[self.segments.len() - 1];
        self.segments.push(tail);
    }

    /// Follow-the-leader step: every trailing segment takes the position of
    /// the segment ahead of it, then the head moves one cell in the current
    /// direction.
    pub fn advance(&mut self) {
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        let (dx, dy) = self.direction.delta();
        self.segments[0] = self.segments[0].moved_by(dx, dy);
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty());
        Self {
            segments,
            direction,
        }
    }
}
