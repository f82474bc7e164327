use snakeboy_common::{App, Color, Key};

use crate::game::{Game, GamePhase, TickOutcome};
use crate::snake::Direction;
use crate::sound::{SoundManager, SoundType};
use crate::{Position, CELL_SIZE, GRID_COLS, GRID_ROWS, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Olive playfield background.
const BACKGROUND: Color = Color::new_rgb(110, 110, 5);
const SNAKE: Color = Color::GREEN;
const APPLE: Color = Color::RED;

/// Frontend-facing application wrapper for the snake game.
///
/// This type implements the shared `App` trait so the SDL2 frontend can
/// drive the game: one frontend frame is one game tick.
#[derive(Default)]
pub struct SnakeApp {
    should_exit: bool,
    game: Game,
    sound: Option<SoundManager>,
}

impl App for SnakeApp {
    fn init(&mut self) {
        log::info!("Snake init");
        // Try to bring up audio for the effect clips and the background
        // music. If this fails, the game still runs but silently.
        if self.sound.is_none() {
            self.sound = SoundManager::new();
        }
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        if self.game.phase() == GamePhase::Running {
            match self.game.tick() {
                TickOutcome::Moved => {}
                TickOutcome::AteApple => {
                    log::debug!("Apple eaten, score {}", self.game.score());
                    if let Some(sound) = &self.sound {
                        sound.play(SoundType::Ding);
                    }
                }
                TickOutcome::Crashed(collision) => {
                    log::info!(
                        "Game over ({collision:?}), final score {}. Enter restarts, Esc quits",
                        self.game.score()
                    );
                    if let Some(sound) = &self.sound {
                        sound.play(SoundType::Crash);
                        sound.pause_music();
                    }
                }
            }
        }

        render_board(&self.game, screen_state);

        if matches!(self.game.phase(), GamePhase::GameOver(_)) {
            overlay_game_over(screen_state);
        }
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        if !is_down {
            return;
        }

        match key {
            Key::Escape => self.should_exit = true,
            Key::Return => {
                if matches!(self.game.phase(), GamePhase::GameOver(_)) {
                    log::info!("Restarting");
                    if let Some(sound) = &self.sound {
                        sound.resume_music();
                    }
                    self.game.reset();
                }
            }
            _ => {
                // Steering is only honored while the round is running.
                if self.game.phase() == GamePhase::Running {
                    if let Some(direction) = direction_for(key) {
                        self.game.set_direction(direction);
                    }
                }
            }
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Snake exit");
    }

    fn width(&self) -> u32 {
        GRID_COLS as u32
    }

    fn height(&self) -> u32 {
        GRID_ROWS as u32
    }

    fn scale(&self) -> u32 {
        CELL_SIZE as u32
    }

    /// The window caption doubles as the score display, and as the
    /// game-over message once the round ends.
    fn title(&self) -> String {
        match self.game.phase() {
            GamePhase::Running => format!("Snake | score {}", self.game.score()),
            GamePhase::GameOver(_) => format!(
                "Game over | score {} | Enter restarts, Esc quits",
                self.game.score()
            ),
        }
    }
}

fn direction_for(key: Key) -> Option<Direction> {
    match key {
        Key::Up => Some(Direction::Up),
        Key::Down => Some(Direction::Down),
        Key::Left => Some(Direction::Left),
        Key::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Paint the playfield into the RGB24 framebuffer: background first, then
/// the snake, then the apple on top.
fn render_board(game: &Game, screen_state: &mut [u8]) {
    let cells = (GRID_COLS * GRID_ROWS) as usize;
    debug_assert_eq!(screen_state.len(), cells * 3);

    for cell in 0..cells {
        put_cell(screen_state, cell, BACKGROUND);
    }

    for segment in game.snake().segments() {
        if let Some(cell) = cell_index(*segment) {
            put_cell(screen_state, cell, SNAKE);
        }
    }

    if let Some(cell) = cell_index(game.apple().position()) {
        put_cell(screen_state, cell, APPLE);
    }
}

/// Framebuffer cell for a grid-aligned pixel position, or `None` when the
/// position lies outside the playfield (a head that just crashed into the
/// wall).
fn cell_index(position: Position) -> Option<usize> {
    if !(0..PLAYFIELD_WIDTH).contains(&position.x)
        || !(0..PLAYFIELD_HEIGHT).contains(&position.y)
    {
        return None;
    }
    let col = (position.x / CELL_SIZE) as usize;
    let row = (position.y / CELL_SIZE) as usize;
    Some(row * GRID_COLS as usize + col)
}

fn put_cell(screen_state: &mut [u8], cell: usize, color: Color) {
    let index = cell * 3;
    screen_state[index] = color.r;
    screen_state[index + 1] = color.g;
    screen_state[index + 2] = color.b;
}

/// Darken the whole board so the frozen final frame reads as inactive.
fn overlay_game_over(screen_state: &mut [u8]) {
    for value in screen_state.iter_mut() {
        *value /= 3;
    }
}
