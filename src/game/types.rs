use serde::{Deserialize, Serialize};

// ── Newtypes ────────────────────────────────────────────────────────

/// Fighter life. Always clamped to [0, max].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Life(pub f32);

impl Life {
    pub fn new(v: f32, max: f32) -> Self {
        debug_assert!(v.is_finite(), "Life must be finite");
        Self(v.clamp(0.0, max))
    }

    pub fn sub_clamped(self, delta: f32) -> Self {
        let v = (self.0 - delta).max(0.0);
        debug_assert!(v.is_finite());
        Self(v)
    }

    pub fn is_depleted(self) -> bool {
        self.0 <= 0.0
    }
}

/// Duration in seconds. Always >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Seconds(pub f32);

impl Seconds {
    pub fn new(v: f32) -> Self {
        Self(v.max(0.0))
    }

    /// Decrement by dt, clamped to 0.
    pub fn dec(self, dt: f32) -> Self {
        Self((self.0 - dt).max(0.0))
    }

    pub fn is_expired(self) -> bool {
        self.0 <= 0.0
    }
}

// ── Enums ───────────────────────────────────────────────────────────

/// Which of the two combatants an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    Punch,
    Kick,
}

impl AttackKind {
    /// Total length of the attack animation.
    pub fn duration(self) -> f32 {
        match self {
            Self::Punch => 0.3,
            Self::Kick => 0.45,
        }
    }

    /// Window (start, end) of elapsed time during which the attack can land.
    pub fn active_window(self) -> (f32, f32) {
        match self {
            Self::Punch => (0.05, 0.2),
            Self::Kick => (0.1, 0.3),
        }
    }
}

/// Opponent difficulty. Survives match restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Delay before the opponent re-decides while in contact range. Smaller reacts faster.
    pub fn contact_decision_delay(self) -> f32 {
        match self {
            Self::Easy => 0.1,
            Self::Medium => 0.07,
            Self::Hard => 0.01,
        }
    }

    /// Probability that the opponent pursues instead of wandering.
    pub fn pursue_chance(self) -> f32 {
        match self {
            Self::Easy => 0.2,
            Self::Medium => 0.5,
            Self::Hard => 1.0,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}
