use bevy::log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::ai::{AiContext, OpponentAi};
use super::arena::ring;
use super::combat;
use super::effects::{GROUND_POOL_VARIANTS, GroundPool, GroundPools, SPLATTER_OFFSET, SplatterPool};
use super::events::{GameEvent, RoundEndCause};
use super::fighter::{Combatant, Fighter};
use super::intent::Command;
use super::round::{Round, RoundPhase, rounds_to_exceed};
use super::types::{Difficulty, Facing, Side};

pub const PLAYER_START_POSITION_X: f32 = 16.0;
pub const OPPONENT_START_POSITION_X: f32 = 51.0;
pub const FIGHTER_START_POSITION_Y: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Running,
    Paused,
    GameOver,
}

/// Owns both fighters and every piece of simulation state. The host calls
/// [`MatchController::tick`] once per frame and drains the notifications.
#[derive(Debug, Clone)]
pub struct MatchController<C: Combatant = Fighter> {
    player: C,
    opponent: C,
    state: MatchState,
    round: Round,
    rounds_won: u32,
    rounds_lost: u32,
    difficulty: Difficulty,
    ai: OpponentAi,
    player_splatters: SplatterPool,
    opponent_splatters: SplatterPool,
    ground_pools: GroundPools,
    rng: ChaCha8Rng,
    events: Vec<GameEvent>,
}

impl MatchController<Fighter> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_combatants(
            Fighter::new("PLAYER"),
            Fighter::new("OPPONENT"),
            difficulty,
            ChaCha8Rng::from_entropy(),
        )
    }
}

impl<C: Combatant> MatchController<C> {
    pub fn with_combatants(player: C, opponent: C, difficulty: Difficulty, mut rng: ChaCha8Rng) -> Self {
        let ground_pools =
            GroundPools::from_fn(|_| GroundPool::new(rng.gen_range(0..GROUND_POOL_VARIANTS)));

        let mut controller = Self {
            player,
            opponent,
            state: MatchState::Running,
            round: Round::new(1),
            rounds_won: 0,
            rounds_lost: 0,
            difficulty,
            ai: OpponentAi::new(),
            player_splatters: SplatterPool::default(),
            opponent_splatters: SplatterPool::default(),
            ground_pools,
            rng,
            events: Vec::new(),
        };
        controller.start_match();
        controller
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    pub fn rounds_lost(&self) -> u32 {
        self.rounds_lost
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn player(&self) -> &C {
        &self.player
    }

    pub fn opponent(&self) -> &C {
        &self.opponent
    }

    pub fn ai(&self) -> &OpponentAi {
        &self.ai
    }

    pub fn splatters(&self, side: Side) -> &SplatterPool {
        match side {
            Side::Player => &self.player_splatters,
            Side::Opponent => &self.opponent_splatters,
        }
    }

    pub fn ground_pools(&self) -> &GroundPools {
        &self.ground_pools
    }

    /// Overall verdict, once the match is over.
    pub fn player_won(&self) -> Option<bool> {
        (self.state == MatchState::GameOver).then_some(self.rounds_won > self.rounds_lost)
    }

    /// Take every notification emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Host controls ───────────────────────────────────────────────

    pub fn pause(&mut self) {
        if self.state == MatchState::Running {
            self.state = MatchState::Paused;
            info!("Match paused");
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.state == MatchState::Paused {
            self.state = MatchState::Running;
            info!("Match resumed");
            self.events.push(GameEvent::Resumed);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            MatchState::Running => self.pause(),
            MatchState::Paused => self.resume(),
            MatchState::GameOver => {}
        }
    }

    /// Cut the current Starting/Ending delay short. Takes effect on the next tick.
    pub fn skip_delay(&mut self) {
        if self.state == MatchState::Running {
            self.round.skip_delay();
        }
    }

    /// The single "continue" input: skip a delay, resume, or play again.
    pub fn confirm(&mut self) {
        match self.state {
            MatchState::Running => self.skip_delay(),
            MatchState::Paused => self.resume(),
            MatchState::GameOver => self.restart(),
        }
    }

    /// Start a new match from round 1. Difficulty is kept.
    pub fn restart(&mut self) {
        info!("Match restarted");
        self.events.push(GameEvent::MatchRestarted);
        self.start_match();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty != difficulty {
            self.difficulty = difficulty;
            info!("Difficulty set to {}", difficulty.display_name());
            self.events.push(GameEvent::DifficultyChanged { difficulty });
        }
    }

    pub fn cycle_difficulty(&mut self) {
        self.set_difficulty(self.difficulty.next());
    }

    /// Forward a player command. Releases always go through; presses need a
    /// running match, and movement presses need a round in progress.
    pub fn command_player(&mut self, command: Command) {
        let accepted = command.is_release()
            || (self.state == MatchState::Running
                && (!command.is_move_start() || self.round.is_in_progress()));
        if accepted {
            self.player.apply(command);
        }
    }

    // ── Simulation ──────────────────────────────────────────────────

    /// Advance the simulation by `elapsed` seconds of real time.
    ///
    /// Outside `Running` every component still gets its update call, with a
    /// zero step. Round timing, AI and contact resolution only run while the
    /// match is running.
    pub fn tick(&mut self, elapsed: f32) {
        let running = self.state == MatchState::Running;
        let dt = if running { elapsed } else { 0.0 };

        if running {
            self.advance_round(dt);
        }

        self.player.update(dt);
        self.opponent.update(dt);

        self.player_splatters.update(dt);
        self.opponent_splatters.update(dt);
        self.ground_pools.update(dt);

        self.face_each_other();
        self.keep_within_ring();

        if running && self.round.is_in_progress() {
            if self.round.tick_clock(dt) {
                self.end_round_on_time();
                return;
            }
            self.run_opponent_ai(dt);
            self.resolve_contact();
        }
    }

    fn start_match(&mut self) {
        self.state = MatchState::Running;
        self.rounds_won = 0;
        self.rounds_lost = 0;
        self.start_round(1);
    }

    fn start_round(&mut self, number: u32) {
        self.player
            .get_ready(PLAYER_START_POSITION_X, FIGHTER_START_POSITION_Y);
        self.opponent
            .get_ready(OPPONENT_START_POSITION_X, FIGHTER_START_POSITION_Y);
        self.round = Round::new(number);
        info!("Round {number} starting");
        self.events.push(GameEvent::RoundStarting { round: number });
    }

    fn advance_round(&mut self, dt: f32) {
        if !self.round.delay_elapsed() {
            self.round.advance_phase_time(dt);
            return;
        }

        match self.round.phase() {
            RoundPhase::Starting => {
                self.round.begin_fight();
                let round = self.round.number();
                self.events.push(GameEvent::FightStarted { round });
            }
            RoundPhase::Ending => {
                let limit = rounds_to_exceed();
                if self.rounds_won > limit || self.rounds_lost > limit {
                    self.finish_match();
                } else {
                    self.start_round(self.round.number() + 1);
                }
            }
            RoundPhase::InProgress => {}
        }
    }

    fn finish_match(&mut self) {
        self.state = MatchState::GameOver;
        let player_won = self.rounds_won > self.rounds_lost;
        info!(
            "Game over: {} ({}-{})",
            if player_won { "player won" } else { "player lost" },
            self.rounds_won,
            self.rounds_lost
        );
        self.events.push(GameEvent::GameOver {
            player_won,
            rounds_won: self.rounds_won,
            rounds_lost: self.rounds_lost,
        });
    }

    fn face_each_other(&mut self) {
        if self.player.position().x <= self.opponent.position().x {
            self.player.face(Facing::Right);
            self.opponent.face(Facing::Left);
        } else {
            self.player.face(Facing::Left);
            self.opponent.face(Facing::Right);
        }
    }

    fn keep_within_ring(&mut self) {
        self.player.set_position(ring::clamp(self.player.position()));
        self.opponent.set_position(ring::clamp(self.opponent.position()));
    }

    fn run_opponent_ai(&mut self, dt: f32) {
        let ctx = AiContext::capture(&self.player, &self.opponent, self.difficulty, dt);
        for command in self.ai.step(&ctx, &mut self.rng) {
            self.opponent.apply(command);
        }
    }

    fn resolve_contact(&mut self) {
        let Some(strike) = combat::resolve(&mut self.player, &mut self.opponent) else {
            return;
        };

        debug!(
            "[Strike] attacker={:?} blocked={} knockout={}",
            strike.attacker, strike.blocked, strike.knockout
        );
        self.events.push(GameEvent::Strike {
            attacker: strike.attacker,
            blocked: strike.blocked,
        });

        if !strike.blocked {
            self.spill_effects(strike.defender());
        }
        if strike.knockout {
            self.end_round(strike.attacker, RoundEndCause::Knockout);
        }
    }

    fn spill_effects(&mut self, side: Side) {
        let (position, splatters) = match side {
            Side::Player => (self.player.position(), &mut self.player_splatters),
            Side::Opponent => (self.opponent.position(), &mut self.opponent_splatters),
        };
        splatters.activate(position + SPLATTER_OFFSET);
        self.ground_pools.activate(position);
    }

    fn end_round_on_time(&mut self) {
        let winner = if self.player.life() >= self.opponent.life() {
            Side::Player
        } else {
            Side::Opponent
        };
        self.end_round(winner, RoundEndCause::TimeUp);
    }

    fn end_round(&mut self, winner: Side, cause: RoundEndCause) {
        match winner {
            Side::Player => {
                self.player.win();
                self.opponent.lose();
                self.rounds_won += 1;
            }
            Side::Opponent => {
                self.player.lose();
                self.opponent.win();
                self.rounds_lost += 1;
            }
        }
        self.round.end();

        let round = self.round.number();
        info!("Round {round} won by {winner:?} ({cause:?})");
        self.events.push(GameEvent::RoundEnded {
            round,
            winner,
            cause,
        });
    }
}
