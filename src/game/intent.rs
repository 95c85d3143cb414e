/// One of the four movement directions on the ring floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Logical fighter command. Produced by keyboard input for the player and
/// by the opponent controller for the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Direction),
    StopMoving(Direction),
    Block,
    StopBlocking,
    Punch,
    Kick,
}

impl Command {
    /// Whether this command starts a movement.
    pub fn is_move_start(self) -> bool {
        matches!(self, Self::Move(_))
    }

    /// Whether this command releases something (movement or block).
    pub fn is_release(self) -> bool {
        matches!(self, Self::StopMoving(_) | Self::StopBlocking)
    }
}
