use rand::Rng;

use crate::{Position, CELL_SIZE, GRID_COLS, GRID_ROWS};

/// The single apple on the playfield. Eating it relocates it; it is never
/// destroyed.
#[derive(Debug, Clone)]
pub struct Apple {
    position: Position,
}

impl Apple {
    /// Drop a fresh apple on a random free cell.
    pub fn new(rng: &mut impl Rng, occupied: &[Position]) -> Self {
        let mut apple = Apple {
            position: Position::new(0, 0),
        };
        apple.relocate(rng, occupied);
        apple
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move to a uniformly random grid cell the snake does not occupy.
    pub fn relocate(&mut self, rng: &mut impl Rng, occupied: &[Position]) {
        loop {
            let position = Position::new(
                rng.gen_range(0..GRID_COLS) * CELL_SIZE,
                rng.gen_range(0..GRID_ROWS) * CELL_SIZE,
            );
            if !occupied.contains(&position) {
                self.position = position;
                return;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn at(position: Position) -> Self {
        Self { position }
    }
}
