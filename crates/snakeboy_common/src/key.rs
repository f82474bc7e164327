/// Logical key identifiers the frontend reports to the game.
///
/// Keycodes the frontend does not map are collapsed to `None`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Return,
    Escape,
    None,
}
