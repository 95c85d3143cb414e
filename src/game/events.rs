use bevy::prelude::*;

use super::types::{Difficulty, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEndCause {
    Knockout,
    TimeUp,
}

/// Notifications emitted by the match controller for the presentation and
/// audio layers. The core never waits on any of them.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarting {
        round: u32,
    },
    FightStarted {
        round: u32,
    },
    Strike {
        attacker: Side,
        blocked: bool,
    },
    RoundEnded {
        round: u32,
        winner: Side,
        cause: RoundEndCause,
    },
    GameOver {
        player_won: bool,
        rounds_won: u32,
        rounds_lost: u32,
    },
    Paused,
    Resumed,
    MatchRestarted,
    DifficultyChanged {
        difficulty: Difficulty,
    },
}
