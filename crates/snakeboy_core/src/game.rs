use rand::rngs::ThreadRng;

use crate::apple::Apple;
use crate::snake::{Direction, Snake};
use crate::{Position, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, START_LENGTH};

/// What ended the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// The head landed on a trailing segment.
    Body,
    /// The head stepped off the playfield.
    Wall,
}

/// Result of a single tick, returned to the caller instead of being
/// signalled through control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    AteApple,
    Crashed(Collision),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    GameOver(Collision),
}

/// Per-tick orchestration: movement, collision policy, scoring, and the
/// running/game-over state machine.
pub struct Game {
    snake: Snake,
    apple: Apple,
    phase: GamePhase,
    rng: ThreadRng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let snake = Snake::default();
        let apple = Apple::new(&mut rng, snake.segments());
        Game {
            snake,
            apple,
            phase: GamePhase::Running,
            rng,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Apples eaten this round. Derived from the snake's length, so it
    /// stays frozen at its final value while the round is over.
    pub fn score(&self) -> usize {
        self.snake.len() - START_LENGTH
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.set_direction(direction);
    }

    /// Advance the world by one step.
    ///
    /// A finished round is inert: ticking it reports the terminal
    /// collision again without moving anything.
    pub fn tick(&mut self) -> TickOutcome {
        if let GamePhase::GameOver(collision) = self.phase {
            return TickOutcome::Crashed(collision);
        }

        self.snake.advance();
        let head = self.snake.head();

        // Positions are grid aligned, so collision is exact cell equality.
        if head == self.apple.position() {
            self.snake.grow();
            self.apple.relocate(&mut self.rng, self.snake.segments());
            return TickOutcome::AteApple;
        }

        if self.snake.trailing().contains(&head) {
            self.phase = GamePhase::GameOver(Collision::Body);
            return TickOutcome::Crashed(Collision::Body);
        }

        if !in_bounds(head) {
            self.phase = GamePhase::GameOver(Collision::Wall);
            return TickOutcome::Crashed(Collision::Wall);
        }

        TickOutcome::Moved
    }

    #[cfg(test)]
    pub(crate) fn park_apple(&mut self, position: Position) {
        self.apple = Apple::at(position);
    }

    /// Start a fresh round: new snake, new apple, score back to zero.
    pub fn reset(&mut self) {
        self.snake = Snake::default();
        self.apple = Apple::new(&mut self.rng, self.snake.segments());
        self.phase = GamePhase::Running;
    }
}

/// Both axes are treated symmetrically: the zero edges are valid cells and
/// the first position past the far edges is fatal.
fn in_bounds(position: Position) -> bool {
    (0..PLAYFIELD_WIDTH).contains(&position.x) && (0..PLAYFIELD_HEIGHT).contains(&position.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CELL_SIZE;

    /// A game with the apple parked on a far cell so a short scripted walk
    /// cannot eat it by accident.
    fn game_with_parked_apple() -> Game {
        let mut game = Game::new();
        game.apple = Apple::at(Position::new(880, 520));
        game
    }

    #[test]
    fn fresh_game_is_running_with_score_zero() {
        let game = Game::new();

        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), START_LENGTH);
        assert!(in_bounds(game.apple().position()));
        assert!(!game.snake().segments().contains(&game.apple().position()));
    }

    #[test]
    fn first_tick_moves_head_down_one_cell() {
        let mut game = game_with_parked_apple();

        let outcome = game.tick();

        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(game.snake().head(), Position::new(40, 80));
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn eating_the_apple_grows_and_relocates() {
        let mut game = Game::new();
        // Park the apple exactly where the next tick puts the head.
        game.apple = Apple::at(Position::new(40, 80));

        let outcome = game.tick();

        assert_eq!(outcome, TickOutcome::AteApple);
        assert_eq!(game.snake().len(), START_LENGTH + 1);
        assert_eq!(game.score(), 1);
        // The eaten cell is occupied by the head now, so the relocated
        // apple cannot still be there.
        assert_ne!(game.apple().position(), Position::new(40, 80));
        assert!(in_bounds(game.apple().position()));
        assert_eq!(game.apple().position().x % CELL_SIZE, 0);
        assert_eq!(game.apple().position().y % CELL_SIZE, 0);
    }

    #[test]
    fn score_tracks_apples_eaten() {
        let mut game = Game::new();

        // Feed the snake three apples in a row, each parked one cell ahead
        // of the head.
        for eaten in 1..=3 {
            let (dx, dy) = game.snake().direction().delta();
            game.apple = Apple::at(game.snake().head().moved_by(dx, dy));
            assert_eq!(game.tick(), TickOutcome::AteApple);
            assert_eq!(game.score(), eaten);
            assert_eq!(game.snake().len(), START_LENGTH + eaten);
        }
    }

    #[test]
    fn zero_edges_are_valid_cells() {
        let mut game = game_with_parked_apple();
        game.set_direction(Direction::Left);
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.snake().head(), Position::new(0, 40));

        let mut game = game_with_parked_apple();
        game.set_direction(Direction::Up);
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.snake().head(), Position::new(40, 0));
    }

    #[test]
    fn stepping_off_the_left_edge_is_fatal() {
        let mut game = game_with_parked_apple();
        game.set_direction(Direction::Left);

        assert_eq!(game.tick(), TickOutcome::Moved);
        let outcome = game.tick();

        assert_eq!(outcome, TickOutcome::Crashed(Collision::Wall));
        assert_eq!(game.snake().head(), Position::new(-40, 40));
        assert_eq!(game.phase(), GamePhase::GameOver(Collision::Wall));
    }

    #[test]
    fn far_edges_are_fatal_one_cell_past_the_last_column() {
        let mut game = game_with_parked_apple();
        game.snake = Snake::from_segments(
            vec![
                Position::new(920, 40),
                Position::new(880, 40),
                Position::new(840, 40),
            ],
            Direction::Right,
        );

        let outcome = game.tick();

        assert_eq!(outcome, TickOutcome::Crashed(Collision::Wall));
        assert_eq!(game.snake().head().x, PLAYFIELD_WIDTH);
    }

    #[test]
    fn reversing_into_the_body_is_fatal() {
        let mut game = game_with_parked_apple();

        assert_eq!(game.tick(), TickOutcome::Moved);
        game.set_direction(Direction::Up);
        let outcome = game.tick();

        assert_eq!(outcome, TickOutcome::Crashed(Collision::Body));
        assert_eq!(game.phase(), GamePhase::GameOver(Collision::Body));
    }

    #[test]
    fn walking_a_square_into_the_body_is_fatal() {
        let mut game = game_with_parked_apple();
        // A fanned-out snake long enough to bite its own tail on a tight
        // square turn.
        game.snake = Snake::from_segments(
            vec![
                Position::new(240, 200),
                Position::new(200, 200),
                Position::new(160, 200),
                Position::new(120, 200),
                Position::new(80, 200),
            ],
            Direction::Down,
        );

        assert_eq!(game.tick(), TickOutcome::Moved);
        game.set_direction(Direction::Left);
        assert_eq!(game.tick(), TickOutcome::Moved);
        game.set_direction(Direction::Up);
        let outcome = game.tick();

        assert_eq!(outcome, TickOutcome::Crashed(Collision::Body));
    }

    #[test]
    fn crashed_game_is_inert_and_keeps_its_score() {
        let mut game = Game::new();
        game.apple = Apple::at(Position::new(40, 80));
        assert_eq!(game.tick(), TickOutcome::AteApple);
        game.apple = Apple::at(Position::new(880, 520));

        game.set_direction(Direction::Left);
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.tick(), TickOutcome::Crashed(Collision::Wall));

        let head = game.snake().head();
        assert_eq!(game.tick(), TickOutcome::Crashed(Collision::Wall));
        assert_eq!(game.snake().head(), head);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn reset_starts_a_fresh_round() {
        let mut game = game_with_parked_apple();
        game.set_direction(Direction::Left);
        game.tick();
        game.tick();
        assert_eq!(game.phase(), GamePhase::GameOver(Collision::Wall));

        game.reset();

        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), START_LENGTH);
        assert_eq!(game.snake().head(), Position::new(40, 40));
        assert!(!game.snake().segments().contains(&game.apple().position()));
    }

    #[test]
    fn segment_count_always_matches_length() {
        let mut game = Game::new();

        // Feed the snake an apple every tick on its way down the first
        // column; the tracked length and the segment count must agree the
        // whole way.
        for eaten in 1..=8 {
            let (dx, dy) = game.snake().direction().delta();
            game.apple = Apple::at(game.snake().head().moved_by(dx, dy));

            assert_eq!(game.tick(), TickOutcome::AteApple);
            assert_eq!(game.snake().segments().len(), game.snake().len());
            assert_eq!(game.snake().len(), START_LENGTH + eaten);
        }
    }
}
