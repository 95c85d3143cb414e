use super::types::Seconds;

pub const START_ROUND_DELAY: f32 = 2.0;
pub const END_ROUND_DELAY: f32 = 2.0;
pub const MAX_ROUNDS: u32 = 3;
pub const MAX_ROUND_TIME: f32 = 99.99;
/// Below this the HUD shows the clock in its warning colour.
pub const CRITICAL_ROUND_TIME: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Starting,
    InProgress,
    Ending,
}

/// Text shown over the ring while a round is starting or ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundBanner {
    Round(u32),
    Fight,
    KnockOut,
    TimeUp,
}

/// Timing state of the current round.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    phase: RoundPhase,
    number: u32,
    /// Time spent in the current Starting/Ending phase.
    phase_time: f32,
    /// Remaining fight time. Only runs while InProgress and never below zero.
    clock: Seconds,
}

impl Round {
    pub fn new(number: u32) -> Self {
        Self {
            phase: RoundPhase::Starting,
            number,
            phase_time: 0.0,
            clock: Seconds::new(MAX_ROUND_TIME),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn phase_time(&self) -> f32 {
        self.phase_time
    }

    pub fn clock(&self) -> f32 {
        self.clock.0
    }

    pub fn is_in_progress(&self) -> bool {
        self.phase == RoundPhase::InProgress
    }

    /// Whether the Starting/Ending delay has run out.
    pub fn delay_elapsed(&self) -> bool {
        match self.phase {
            RoundPhase::Starting => self.phase_time >= START_ROUND_DELAY,
            RoundPhase::Ending => self.phase_time >= END_ROUND_DELAY,
            RoundPhase::InProgress => false,
        }
    }

    pub fn advance_phase_time(&mut self, dt: f32) {
        self.phase_time += dt;
    }

    /// Jump to the end of the current delay; the next tick transitions.
    pub fn skip_delay(&mut self) {
        match self.phase {
            RoundPhase::Starting => self.phase_time = START_ROUND_DELAY,
            RoundPhase::Ending => self.phase_time = END_ROUND_DELAY,
            RoundPhase::InProgress => {}
        }
    }

    pub fn begin_fight(&mut self) {
        self.phase = RoundPhase::InProgress;
        self.phase_time = 0.0;
    }

    pub fn end(&mut self) {
        self.phase = RoundPhase::Ending;
        self.phase_time = 0.0;
    }

    /// Run the round clock. Returns true on the tick it runs out.
    pub fn tick_clock(&mut self, dt: f32) -> bool {
        self.clock = self.clock.dec(dt);
        self.clock.is_expired()
    }

    pub fn is_clock_critical(&self) -> bool {
        self.clock.0 < CRITICAL_ROUND_TIME
    }

    /// A round only ends on a run-out clock or a knockout, so the clock tells
    /// the two apart.
    pub fn banner(&self) -> Option<RoundBanner> {
        match self.phase {
            RoundPhase::Starting if self.phase_time < START_ROUND_DELAY * 0.5 => {
                Some(RoundBanner::Round(self.number))
            }
            RoundPhase::Starting => Some(RoundBanner::Fight),
            RoundPhase::InProgress => None,
            RoundPhase::Ending if self.clock.is_expired() => Some(RoundBanner::TimeUp),
            RoundPhase::Ending => Some(RoundBanner::KnockOut),
        }
    }
}

/// Rounds a side must exceed to take the match.
pub fn rounds_to_exceed() -> u32 {
    MAX_ROUNDS / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_checked_before_it_is_advanced() {
        let mut round = Round::new(1);
        round.advance_phase_time(START_ROUND_DELAY - 0.5);
        assert!(!round.delay_elapsed());
        round.advance_phase_time(0.5);
        assert!(round.delay_elapsed());
    }

    #[test]
    fn skip_sets_the_timer_to_the_delay() {
        let mut round = Round::new(2);
        round.skip_delay();
        assert_eq!(round.phase_time(), START_ROUND_DELAY);
        assert!(round.delay_elapsed());

        round.begin_fight();
        round.skip_delay();
        assert_eq!(round.phase_time(), 0.0);

        round.end();
        round.skip_delay();
        assert_eq!(round.phase_time(), END_ROUND_DELAY);
    }

    #[test]
    fn clock_clamps_at_zero_when_it_runs_out() {
        let mut round = Round::new(1);
        round.begin_fight();
        assert!(!round.tick_clock(MAX_ROUND_TIME - 1.0));
        assert!(round.is_clock_critical());
        assert!(round.tick_clock(5.0));
        assert_eq!(round.clock(), 0.0);
    }

    #[test]
    fn banner_switches_halfway_through_the_start_delay() {
        let mut round = Round::new(3);
        assert_eq!(round.banner(), Some(RoundBanner::Round(3)));
        round.advance_phase_time(START_ROUND_DELAY * 0.5);
        assert_eq!(round.banner(), Some(RoundBanner::Fight));
        round.begin_fight();
        assert_eq!(round.banner(), None);
    }

    #[test]
    fn ending_banner_names_how_the_round_ended() {
        let mut knockout = Round::new(1);
        knockout.begin_fight();
        knockout.tick_clock(20.0);
        knockout.end();
        assert_eq!(knockout.banner(), Some(RoundBanner::KnockOut));

        let mut time_up = Round::new(1);
        time_up.begin_fight();
        assert!(time_up.tick_clock(MAX_ROUND_TIME));
        time_up.end();
        assert_eq!(time_up.banner(), Some(RoundBanner::TimeUp));
    }

    #[test]
    fn best_of_three_needs_two() {
        assert_eq!(rounds_to_exceed(), 1);
    }
}
