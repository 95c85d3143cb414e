use bevy::math::Vec2;

use super::fighter::{Combatant, HIT_STRENGTH};
use super::types::Side;

/// Fighters are wider than they are deep, so contact uses separate
/// thresholds per axis instead of a radius.
pub const FIGHTER_CONTACT_DISTANCE_X: f32 = 7.5;
pub const FIGHTER_CONTACT_DISTANCE_Y: f32 = 1.5;

/// Result of adjudicating one landed attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub attacker: Side,
    /// Selects the cue only; blocked strikes deal full damage.
    pub blocked: bool,
    /// The defender's life reached zero.
    pub knockout: bool,
}

impl Strike {
    pub fn defender(&self) -> Side {
        self.attacker.other()
    }
}

pub fn in_contact_range(a: Vec2, b: Vec2) -> bool {
    let d = (a - b).abs();
    d.x <= FIGHTER_CONTACT_DISTANCE_X && d.y <= FIGHTER_CONTACT_DISTANCE_Y
}

/// Detect contact and adjudicate at most one active attack.
///
/// The player is checked first. If both attacks are active on the same tick
/// only the player's lands; the opponent's stays active and is looked at on
/// the next call.
pub fn resolve<C: Combatant>(player: &mut C, opponent: &mut C) -> Option<Strike> {
    if !in_contact_range(player.position(), opponent.position()) {
        return None;
    }

    if player.is_attack_active() {
        Some(adjudicate(Side::Player, player, opponent))
    } else if opponent.is_attack_active() {
        Some(adjudicate(Side::Opponent, opponent, player))
    } else {
        None
    }
}

fn adjudicate<C: Combatant>(side: Side, attacker: &mut C, defender: &mut C) -> Strike {
    defender.get_hit(HIT_STRENGTH);
    let blocked = defender.is_blocking();
    attacker.make_contact();

    Strike {
        attacker: side,
        blocked,
        knockout: defender.has_lost(),
    }
}
