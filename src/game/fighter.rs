use bevy::math::{IVec2, Vec2};

use super::intent::{Command, Direction};
use super::types::{AttackKind, Facing, Life};

pub const MAX_LIFE: f32 = 100.0;
/// Damage dealt by any landed attack, punch or kick alike.
pub const HIT_STRENGTH: f32 = 5.0;
/// World units per second along each axis.
pub const MOVEMENT_SPEED: f32 = 10.0;

/// What the core needs from a fighter. The match controller is the only
/// caller that mutates a combatant from outside.
pub trait Combatant {
    fn position(&self) -> Vec2;
    /// Used by bounds clamping only.
    fn set_position(&mut self, position: Vec2);
    fn life(&self) -> Life;
    fn get_hit(&mut self, amount: f32);
    fn has_lost(&self) -> bool {
        self.life().is_depleted()
    }
    fn is_attacking(&self) -> bool;
    /// Attacking, inside the active window, and not yet landed.
    fn is_attack_active(&self) -> bool;
    fn has_made_contact(&self) -> bool;
    fn make_contact(&mut self);
    fn is_blocking(&self) -> bool;
    fn face(&mut self, facing: Facing);
    fn apply(&mut self, command: Command);
    /// Reset for a new round at the given start position.
    fn get_ready(&mut self, x: f32, y: f32);
    fn update(&mut self, dt: f32);
    fn win(&mut self);
    fn lose(&mut self);
}

/// Exclusive action state. Attack, block and contact flags are derived from
/// this so they can never disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stance {
    Idle,
    Blocking,
    Attacking {
        kind: AttackKind,
        elapsed: f32,
        made_contact: bool,
    },
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    pub name: String,
    position: Vec2,
    /// Per-axis direction, each component in {-1, 0, 1}.
    movement: IVec2,
    life: Life,
    facing: Facing,
    stance: Stance,
}

impl Fighter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec2::ZERO,
            movement: IVec2::ZERO,
            life: Life::new(MAX_LIFE, MAX_LIFE),
            facing: Facing::Right,
            stance: Stance::Idle,
        }
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn movement(&self) -> IVec2 {
        self.movement
    }

    fn start_moving(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.movement.x = -1,
            Direction::Right => self.movement.x = 1,
            Direction::Up => self.movement.y = 1,
            Direction::Down => self.movement.y = -1,
        }
    }

    /// Only clears the axis if it still points the released way.
    fn stop_moving(&mut self, direction: Direction) {
        match direction {
            Direction::Left if self.movement.x == -1 => self.movement.x = 0,
            Direction::Right if self.movement.x == 1 => self.movement.x = 0,
            Direction::Up if self.movement.y == 1 => self.movement.y = 0,
            Direction::Down if self.movement.y == -1 => self.movement.y = 0,
            _ => {}
        }
    }

    fn attack(&mut self, kind: AttackKind) {
        if self.stance == Stance::Idle {
            self.stance = Stance::Attacking {
                kind,
                elapsed: 0.0,
                made_contact: false,
            };
        }
    }
}

impl Combatant for Fighter {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn life(&self) -> Life {
        self.life
    }

    fn get_hit(&mut self, amount: f32) {
        self.life = self.life.sub_clamped(amount);
    }

    fn is_attacking(&self) -> bool {
        matches!(self.stance, Stance::Attacking { .. })
    }

    fn is_attack_active(&self) -> bool {
        match self.stance {
            Stance::Attacking {
                kind,
                elapsed,
                made_contact: false,
            } => {
                let (start, end) = kind.active_window();
                elapsed >= start && elapsed <= end
            }
            _ => false,
        }
    }

    fn has_made_contact(&self) -> bool {
        matches!(
            self.stance,
            Stance::Attacking {
                made_contact: true,
                ..
            }
        )
    }

    fn make_contact(&mut self) {
        if let Stance::Attacking { made_contact, .. } = &mut self.stance {
            *made_contact = true;
        }
    }

    fn is_blocking(&self) -> bool {
        self.stance == Stance::Blocking
    }

    fn face(&mut self, facing: Facing) {
        self.facing = facing;
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Move(direction) => self.start_moving(direction),
            Command::StopMoving(direction) => self.stop_moving(direction),
            Command::Block => {
                if self.stance == Stance::Idle {
                    self.stance = Stance::Blocking;
                }
            }
            Command::StopBlocking => {
                if self.stance == Stance::Blocking {
                    self.stance = Stance::Idle;
                }
            }
            Command::Punch => self.attack(AttackKind::Punch),
            Command::Kick => self.attack(AttackKind::Kick),
        }
    }

    fn get_ready(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
        self.movement = IVec2::ZERO;
        self.life = Life::new(MAX_LIFE, MAX_LIFE);
        self.facing = Facing::Right;
        self.stance = Stance::Idle;
    }

    fn update(&mut self, dt: f32) {
        let mut attack_finished = false;
        match &mut self.stance {
            Stance::Attacking { kind, elapsed, .. } => {
                *elapsed += dt;
                attack_finished = *elapsed >= kind.duration();
            }
            Stance::Idle => {
                self.position += self.movement.as_vec2() * MOVEMENT_SPEED * dt;
            }
            Stance::Blocking | Stance::Won | Stance::Lost => {}
        }
        if attack_finished {
            self.stance = Stance::Idle;
        }
    }

    fn win(&mut self) {
        self.movement = IVec2::ZERO;
        self.stance = Stance::Won;
    }

    fn lose(&mut self) {
        self.movement = IVec2::ZERO;
        self.stance = Stance::Lost;
    }
}
