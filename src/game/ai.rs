use bevy::log::debug;
use bevy::math::Vec2;
use rand::Rng;

use super::combat::{FIGHTER_CONTACT_DISTANCE_X, FIGHTER_CONTACT_DISTANCE_Y, in_contact_range};
use super::fighter::Combatant;
use super::intent::{Command, Direction};
use super::types::Difficulty;

pub const OPPONENT_AI_BLOCK_CHANCE: f64 = 0.4;
pub const OPPONENT_AI_ATTACK_CHANCE: f64 = 0.8;
pub const OPPONENT_AI_NON_CONTACT_DECISION_DELAY: f32 = 0.5;

/// Top-level state of the opponent controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiMode {
    /// Out of reach: pursuing or wandering on a timer.
    #[default]
    Roaming,
    /// In reach at the last decision: blocking, attacking or backing off.
    ContactDecision,
}

/// Everything the controller reads in one step. Positions are post-clamp.
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub player_position: Vec2,
    pub opponent_position: Vec2,
    pub player_attacking: bool,
    pub player_made_contact: bool,
    pub opponent_attacking: bool,
    pub opponent_blocking: bool,
    pub difficulty: Difficulty,
    pub dt: f32,
}

impl AiContext {
    pub fn capture<C: Combatant>(player: &C, opponent: &C, difficulty: Difficulty, dt: f32) -> Self {
        Self {
            player_position: player.position(),
            opponent_position: opponent.position(),
            player_attacking: player.is_attacking(),
            player_made_contact: player.has_made_contact(),
            opponent_attacking: opponent.is_attacking(),
            opponent_blocking: opponent.is_blocking(),
            difficulty,
            dt,
        }
    }

    fn in_contact_range(&self) -> bool {
        in_contact_range(self.player_position, self.opponent_position)
    }
}

/// Finite-state controller for the non-player fighter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpponentAi {
    mode: AiMode,
    pursuing: bool,
    /// Counts down to the next decision; may dip below zero by one step.
    timer: f32,
}

impl OpponentAi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AiMode {
        self.mode
    }

    pub fn is_pursuing(&self) -> bool {
        self.pursuing
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Run one decision step and return the commands for the opponent.
    pub fn step<R: Rng + ?Sized>(&mut self, ctx: &AiContext, rng: &mut R) -> Vec<Command> {
        let mut out = Vec::new();
        match self.mode {
            AiMode::ContactDecision => self.step_contact(ctx, rng, &mut out),
            AiMode::Roaming => self.step_roaming(ctx, rng, &mut out),
        }
        out
    }

    fn step_contact<R: Rng + ?Sized>(&mut self, ctx: &AiContext, rng: &mut R, out: &mut Vec<Command>) {
        let in_range = ctx.in_contact_range();

        if ctx.opponent_blocking {
            if !in_range || !ctx.player_attacking || ctx.player_made_contact {
                out.push(Command::StopBlocking);
            }
        } else if !ctx.opponent_attacking {
            if !in_range {
                self.mode = AiMode::Roaming;
            } else if self.timer <= 0.0 {
                self.decide_contact(ctx, rng, out);
            } else {
                self.timer -= ctx.dt;
            }
        }
    }

    fn step_roaming<R: Rng + ?Sized>(&mut self, ctx: &AiContext, rng: &mut R, out: &mut Vec<Command>) {
        if ctx.in_contact_range() {
            self.decide_contact(ctx, rng, out);
        } else if self.timer <= 0.0 {
            self.pursuing = rng.gen_bool(f64::from(ctx.difficulty.pursue_chance()));
            debug!("[Ai] roaming, pursue={}", self.pursuing);
            if self.pursuing {
                move_toward_player(ctx, out);
            } else {
                wander(rng, out);
            }
            self.timer = OPPONENT_AI_NON_CONTACT_DECISION_DELAY;
        } else {
            if self.pursuing {
                move_toward_player(ctx, out);
            }
            self.timer -= ctx.dt;
        }
    }

    fn decide_contact<R: Rng + ?Sized>(&mut self, ctx: &AiContext, rng: &mut R, out: &mut Vec<Command>) {
        self.mode = AiMode::ContactDecision;

        if ctx.player_attacking {
            // An attack that already landed is not worth reacting to.
            if !ctx.player_made_contact {
                if rng.gen_bool(OPPONENT_AI_BLOCK_CHANCE) {
                    out.push(Command::Block);
                } else {
                    move_away_from_player(ctx, out);
                }
            }
        } else if rng.gen_bool(OPPONENT_AI_ATTACK_CHANCE) {
            out.push(if rng.gen_bool(0.5) {
                Command::Punch
            } else {
                Command::Kick
            });
        } else {
            move_away_from_player(ctx, out);
        }

        debug!("[Ai] contact decision {out:?}");
        self.timer = ctx.difficulty.contact_decision_delay();
    }
}

/// Close in on both axes, holding still on an axis once inside contact distance.
fn move_toward_player(ctx: &AiContext, out: &mut Vec<Command>) {
    let player = ctx.player_position;
    let me = ctx.opponent_position;

    if me.x > player.x + FIGHTER_CONTACT_DISTANCE_X {
        out.push(Command::Move(Direction::Left));
    } else if me.x < player.x - FIGHTER_CONTACT_DISTANCE_X {
        out.push(Command::Move(Direction::Right));
    } else {
        out.push(Command::StopMoving(Direction::Left));
        out.push(Command::StopMoving(Direction::Right));
    }

    if me.y < player.y - FIGHTER_CONTACT_DISTANCE_Y {
        out.push(Command::Move(Direction::Up));
    } else if me.y > player.y + FIGHTER_CONTACT_DISTANCE_Y {
        out.push(Command::Move(Direction::Down));
    } else {
        out.push(Command::StopMoving(Direction::Up));
        out.push(Command::StopMoving(Direction::Down));
    }
}

fn move_away_from_player(ctx: &AiContext, out: &mut Vec<Command>) {
    let player = ctx.player_position;
    let me = ctx.opponent_position;

    out.push(Command::Move(if me.x > player.x {
        Direction::Right
    } else {
        Direction::Left
    }));
    out.push(Command::Move(if me.y > player.y {
        Direction::Up
    } else {
        Direction::Down
    }));
}

/// Independently per axis: go negative, go positive, or stand still.
fn wander<R: Rng + ?Sized>(rng: &mut R, out: &mut Vec<Command>) {
    let axes = [(Direction::Left, Direction::Right), (Direction::Down, Direction::Up)];
    for (negative, positive) in axes {
        match rng.gen_range(0..3) {
            0 => out.push(Command::Move(negative)),
            1 => out.push(Command::Move(positive)),
            _ => {
                out.push(Command::StopMoving(negative));
                out.push(Command::StopMoving(positive));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ctx(player: Vec2, opponent: Vec2) -> AiContext {
        AiContext {
            player_position: player,
            opponent_position: opponent,
            player_attacking: false,
            player_made_contact: false,
            opponent_attacking: false,
            opponent_blocking: false,
            difficulty: Difficulty::Hard,
            dt: 1.0 / 60.0,
        }
    }

    fn in_range() -> AiContext {
        ctx(Vec2::new(20.0, 10.0), Vec2::new(25.0, 10.0))
    }

    fn out_of_range() -> AiContext {
        ctx(Vec2::new(20.0, 10.0), Vec2::new(45.0, 18.0))
    }

    #[test]
    fn attacks_at_the_tuned_rate_when_player_is_open() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let trials = 20_000;
        let (mut punches, mut kicks) = (0u32, 0u32);

        for _ in 0..trials {
            let mut ai = OpponentAi::new();
            let cmds = ai.step(&in_range(), &mut rng);
            assert_eq!(ai.mode(), AiMode::ContactDecision);
            match cmds.as_slice() {
                [Command::Punch] => punches += 1,
                [Command::Kick] => kicks += 1,
                [Command::Move(_), Command::Move(_)] => {}
                other => panic!("unexpected decision {other:?}"),
            }
        }

        let attacks = punches + kicks;
        let attack_rate = attacks as f64 / trials as f64;
        assert!((attack_rate - OPPONENT_AI_ATTACK_CHANCE).abs() < 0.02, "{attack_rate}");
        let punch_share = punches as f64 / attacks as f64;
        assert!((punch_share - 0.5).abs() < 0.02, "{punch_share}");
    }

    #[test]
    fn blocks_at_the_tuned_rate_against_a_fresh_attack() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let trials = 20_000;
        let mut blocks = 0u32;
        let mut c = in_range();
        c.player_attacking = true;

        for _ in 0..trials {
            let mut ai = OpponentAi::new();
            if ai.step(&c, &mut rng) == vec![Command::Block] {
                blocks += 1;
            }
        }

        let rate = blocks as f64 / trials as f64;
        assert!((rate - OPPONENT_AI_BLOCK_CHANCE).abs() < 0.02, "{rate}");
    }

    #[test]
    fn ignores_an_attack_that_already_landed() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = in_range();
        c.player_attacking = true;
        c.player_made_contact = true;
        c.difficulty = Difficulty::Medium;

        let mut ai = OpponentAi::new();
        assert!(ai.step(&c, &mut rng).is_empty());
        assert_eq!(ai.mode(), AiMode::ContactDecision);
        assert_eq!(ai.timer(), Difficulty::Medium.contact_decision_delay());
    }

    #[test]
    fn backing_off_moves_away_on_both_axes() {
        let mut out = Vec::new();
        move_away_from_player(&ctx(Vec2::new(20.0, 10.0), Vec2::new(25.0, 9.0)), &mut out);
        assert_eq!(
            out,
            vec![Command::Move(Direction::Right), Command::Move(Direction::Down)]
        );
    }

    #[test]
    fn stops_blocking_on_any_exit_condition() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut blocking = in_range();
        blocking.opponent_blocking = true;
        blocking.player_attacking = true;

        let mut ai = OpponentAi::new();
        ai.mode = AiMode::ContactDecision;
        assert!(ai.step(&blocking, &mut rng).is_empty());

        let mut lost_range = blocking;
        lost_range.opponent_position = Vec2::new(40.0, 10.0);
        assert_eq!(ai.step(&lost_range, &mut rng), vec![Command::StopBlocking]);

        let mut not_attacking = blocking;
        not_attacking.player_attacking = false;
        assert_eq!(ai.step(&not_attacking, &mut rng), vec![Command::StopBlocking]);

        let mut landed = blocking;
        landed.player_made_contact = true;
        assert_eq!(ai.step(&landed, &mut rng), vec![Command::StopBlocking]);
    }

    #[test]
    fn waits_for_the_timer_before_deciding_again() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut c = in_range();
        c.difficulty = Difficulty::Easy;
        c.dt = 0.04;

        let mut ai = OpponentAi::new();
        ai.step(&c, &mut rng);
        assert_eq!(ai.timer(), 0.1);

        // 0.1 -> 0.06 -> 0.02 -> -0.02, then the next step decides.
        for _ in 0..3 {
            assert!(ai.step(&c, &mut rng).is_empty());
        }
        assert!(ai.timer() <= 0.0);
        assert!(!ai.step(&c, &mut rng).is_empty());
        assert_eq!(ai.timer(), 0.1);
    }

    #[test]
    fn does_nothing_while_its_own_attack_plays() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ai = OpponentAi::new();
        ai.step(&in_range(), &mut rng);
        let timer = ai.timer();

        let mut attacking = in_range();
        attacking.opponent_attacking = true;
        assert!(ai.step(&attacking, &mut rng).is_empty());
        assert_eq!(ai.timer(), timer);
    }

    #[test]
    fn drops_out_of_contact_when_range_is_lost() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut ai = OpponentAi::new();
        ai.mode = AiMode::ContactDecision;
        assert!(ai.step(&out_of_range(), &mut rng).is_empty());
        assert_eq!(ai.mode(), AiMode::Roaming);
    }

    #[test]
    fn hard_always_pursues_and_keeps_pursuing_between_decisions() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut ai = OpponentAi::new();
        let c = out_of_range();

        let toward = vec![Command::Move(Direction::Left), Command::Move(Direction::Down)];
        assert_eq!(ai.step(&c, &mut rng), toward);
        assert!(ai.is_pursuing());
        assert_eq!(ai.timer(), OPPONENT_AI_NON_CONTACT_DECISION_DELAY);

        assert_eq!(ai.step(&c, &mut rng), toward);
        assert!(ai.timer() < OPPONENT_AI_NON_CONTACT_DECISION_DELAY);
    }

    #[test]
    fn pursuit_holds_an_axis_inside_the_dead_zone() {
        let mut out = Vec::new();
        move_toward_player(&ctx(Vec2::new(20.0, 10.0), Vec2::new(26.0, 14.0)), &mut out);
        assert_eq!(
            out,
            vec![
                Command::StopMoving(Direction::Left),
                Command::StopMoving(Direction::Right),
                Command::Move(Direction::Down),
            ]
        );
    }

    #[test]
    fn easy_pursues_about_one_time_in_five() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut c = out_of_range();
        c.difficulty = Difficulty::Easy;
        let trials = 20_000;
        let mut pursued = 0u32;

        for _ in 0..trials {
            let mut ai = OpponentAi::new();
            ai.step(&c, &mut rng);
            if ai.is_pursuing() {
                pursued += 1;
            }
        }

        let rate = pursued as f64 / trials as f64;
        assert!((rate - 0.2).abs() < 0.02, "{rate}");
    }

    #[test]
    fn wandering_sets_each_axis_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..100 {
            let mut out = Vec::new();
            wander(&mut rng, &mut out);
            let horizontal = out
                .iter()
                .filter(|c| {
                    matches!(
                        c,
                        Command::Move(Direction::Left | Direction::Right)
                            | Command::StopMoving(Direction::Left | Direction::Right)
                    )
                })
                .count();
            assert!(horizontal == 1 || horizontal == 2);
            assert!((2..=4).contains(&out.len()));
        }
    }
}
