//! Session state machine
//!
//! Owns every piece of mutable run state. The driver loop calls [`Session::tick`]
//! and the event methods; the presentation layer only ever sees
//! [`SessionSnapshot`] values.
//!
//! ```text
//! Idle -> Playing <-> Paused
//!         Playing -> GameOver -> Idle
//! ```
//!
//! Within one tick the round controller runs first, then combo decay, then
//! power-up expiry. Nothing advances unless the state is `Playing`.

use super::clock::{Clock, sanitize_dt};
use super::combo::{ComboTracker, combo_multiplier};
use super::powerup::{Activation, PowerUpKind, PowerUpRegistry};
use super::round::{RoundController, RoundEvent, RoundPhase};
use super::state::{
    Difficulty, GameOverSummary, Level, PowerUpView, SessionEvent, SessionSnapshot, SessionState,
};
use crate::error::SessionError;
use crate::rank::rank;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    tuning: Tuning,
    level: Level,
    difficulty: Difficulty,
    score: u64,
    health: u32,
    enemies_killed: u32,
    /// Survival time; advances on every playing tick
    clock: Clock,
    /// Drives combo decay; frozen during round transitions
    scoring_clock: Clock,
    round: RoundController,
    combo: ComboTracker,
    power_ups: PowerUpRegistry,
    summary: Option<GameOverSummary>,
    events: Vec<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Idle session with the shipped balance
    pub fn new() -> Self {
        Self::build(Tuning::default())
    }

    pub fn with_tuning(tuning: Tuning) -> Result<Self, SessionError> {
        tuning.validate()?;
        Ok(Self::build(tuning))
    }

    fn build(tuning: Tuning) -> Self {
        Self {
            state: SessionState::Idle,
            level: Level::FIRST,
            difficulty: Difficulty::default(),
            score: 0,
            health: tuning.max_health,
            enemies_killed: 0,
            clock: Clock::new(),
            scoring_clock: Clock::new(),
            round: RoundController::new(&tuning),
            combo: ComboTracker::new(tuning.combo_decay_window),
            power_ups: PowerUpRegistry::new(&tuning),
            summary: None,
            events: Vec::new(),
            tuning,
        }
    }

    fn reset_run(&mut self) {
        self.score = 0;
        self.health = self.tuning.max_health;
        self.enemies_killed = 0;
        self.clock.reset();
        self.scoring_clock.reset();
        self.round.reset();
        self.combo = ComboTracker::new(self.tuning.combo_decay_window);
        self.power_ups.clear();
        self.summary = None;
        self.events.clear();
    }

    fn require(&self, expected: SessionState, op: &'static str) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            log::debug!("Rejected {} while {:?}", op, self.state);
            Err(SessionError::transition(op, self.state))
        }
    }

    // === Lifecycle ===

    /// Begin a run from the start screen
    pub fn start(&mut self, level: u8, difficulty: Difficulty) -> Result<(), SessionError> {
        self.require(SessionState::Idle, "start")?;
        let level = Level::new(level)?;

        self.reset_run();
        self.level = level;
        self.difficulty = difficulty;
        self.state = SessionState::Playing;
        self.events.push(SessionEvent::Started { level, difficulty });
        log::info!(
            "Session started: level {} ({}), difficulty {}",
            level.number(),
            level.name(),
            difficulty
        );
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.require(SessionState::Playing, "pause")?;
        self.state = SessionState::Paused;
        log::info!("Paused at {:.2}s", self.clock.now());
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.require(SessionState::Paused, "resume")?;
        self.state = SessionState::Playing;
        log::info!("Resumed at {:.2}s", self.clock.now());
        Ok(())
    }

    /// ESC key behavior: pause when playing, resume when paused
    pub fn toggle_pause(&mut self) -> Result<SessionState, SessionError> {
        match self.state {
            SessionState::Playing => self.pause()?,
            SessionState::Paused => self.resume()?,
            state => return Err(SessionError::transition("toggle pause", state)),
        }
        Ok(self.state)
    }

    /// "Play Again" from the game-over screen
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.require(SessionState::GameOver, "restart")?;
        self.reset_run();
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Abandon the current run and return to the start screen
    pub fn quit_to_menu(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Idle {
            return Err(SessionError::transition("quit to menu", self.state));
        }
        log::info!("Returning to menu from {:?}", self.state);
        self.reset_run();
        self.state = SessionState::Idle;
        Ok(())
    }

    // === Frame update ===

    /// Advance all timers by `dt` seconds. Malformed deltas count as zero.
    pub fn tick(&mut self, dt: f64) -> Result<(), SessionError> {
        self.require(SessionState::Playing, "tick")?;
        let dt = sanitize_dt(dt);

        let now = self.clock.advance(dt);
        if self.round.phase() != RoundPhase::Transition {
            self.scoring_clock.advance(dt);
        }

        let round_events = self.round.tick(dt);
        self.push_round_events(round_events);

        if let Some(lost) = self.combo.tick(self.scoring_clock.now()) {
            log::debug!("Combo of {} decayed", lost);
            self.events.push(SessionEvent::ComboBroken { lost });
        }

        for kind in self.power_ups.tick(now) {
            log::debug!("{} expired at {:.2}s", kind.name(), now);
            self.events.push(SessionEvent::PowerUpExpired { kind });
        }
        Ok(())
    }

    fn push_round_events(&mut self, round_events: Vec<RoundEvent>) {
        for event in round_events {
            match event {
                RoundEvent::Advanced { round, reason } => {
                    log::info!("Round {} begins ({:?})", round, reason);
                    self.events.push(SessionEvent::RoundAdvanced { round, reason });
                }
                RoundEvent::Settled { round, phase } => {
                    if phase == RoundPhase::Boss {
                        log::info!("Boss round {}", round);
                    }
                    self.events.push(SessionEvent::PhaseSettled { round, phase });
                }
            }
        }
    }

    // === Gameplay events ===

    /// Register a successful hit worth `points` before the combo multiplier.
    /// Returns the points actually awarded.
    pub fn apply_hit(&mut self, points: u32) -> Result<u64, SessionError> {
        self.require(SessionState::Playing, "apply hit")?;

        let count = self.combo.register_hit(self.scoring_clock.now());
        let multiplier = self.multiplier(count);
        let awarded = (points as f64 * multiplier).floor() as u64;

        self.score = self.score.saturating_add(awarded);
        self.round.record_score(awarded);
        self.enemies_killed = self.enemies_killed.saturating_add(1);
        Ok(awarded)
    }

    /// Take `amount` damage. Returns remaining health.
    pub fn apply_damage(&mut self, amount: u32) -> Result<u32, SessionError> {
        self.require(SessionState::Playing, "apply damage")?;

        let lost = self.combo.register_damage();
        if lost > 0 {
            self.events.push(SessionEvent::ComboBroken { lost });
        }

        self.health = self.health.saturating_sub(amount);
        self.events.push(SessionEvent::Damaged {
            amount,
            health: self.health,
        });

        if self.health == 0 {
            self.finish();
        }
        Ok(self.health)
    }

    pub fn collect_power_up(&mut self, kind: PowerUpKind) -> Result<Activation, SessionError> {
        self.require(SessionState::Playing, "collect power-up")?;

        let activation = self.power_ups.activate(kind, self.clock.now());
        let refreshed = activation == Activation::Refreshed;
        log::debug!(
            "{} {} at {:.2}s",
            kind.name(),
            if refreshed { "refreshed" } else { "activated" },
            self.clock.now()
        );
        self.events.push(SessionEvent::PowerUpActivated { kind, refreshed });
        Ok(activation)
    }

    /// Collect a power-up by its string tag (`"shield"`, `"speed"`, `"rapidfire"`)
    pub fn collect_power_up_tag(&mut self, tag: &str) -> Result<Activation, SessionError> {
        let kind = tag.parse::<PowerUpKind>()?;
        self.collect_power_up(kind)
    }

    /// Boss killed. Returns whether the boss round ended; outside a boss
    /// phase this does nothing.
    pub fn notify_boss_defeated(&mut self) -> Result<bool, SessionError> {
        self.require(SessionState::Playing, "notify boss defeated")?;
        let round_events = self.round.notify_boss_defeated();
        let cleared = !round_events.is_empty();
        self.push_round_events(round_events);
        Ok(cleared)
    }

    fn finish(&mut self) {
        let summary = GameOverSummary {
            score: self.score,
            level: self.level,
            difficulty: self.difficulty,
            survival_time: self.clock.now(),
            enemies_killed: self.enemies_killed,
            round_reached: self.round.number(),
            rank: rank(self.score),
        };
        log::info!(
            "Game over: score {}, round {}, {:.1}s survived, rank {}",
            summary.score,
            summary.round_reached,
            summary.survival_time,
            summary.rank
        );
        self.state = SessionState::GameOver;
        self.summary = Some(summary.clone());
        self.events.push(SessionEvent::GameOver { summary });
    }

    // === Read access ===

    pub fn multiplier(&self, count: u32) -> f64 {
        combo_multiplier(count, self.tuning.combo_step_hits, self.tuning.combo_step_bonus)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let now = self.clock.now();
        SessionSnapshot {
            state: self.state,
            score: self.score,
            health: self.health,
            combo: self.combo.count(),
            multiplier: self.multiplier(self.combo.count()),
            level: self.level,
            difficulty: self.difficulty,
            active_power_ups: self
                .power_ups
                .active_list()
                .iter()
                .map(|p| PowerUpView {
                    kind: p.kind,
                    name: p.kind.name(),
                    remaining: p.remaining(now),
                })
                .collect(),
            current_round: self.round.number(),
            round_phase: self.round.phase(),
            survival_time: now,
            enemies_killed: self.enemies_killed,
        }
    }

    /// Final stats, present only in `GameOver`
    pub fn summary(&self) -> Option<&GameOverSummary> {
        self.summary.as_ref()
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[inline]
    pub fn survival_time(&self) -> f64 {
        self.clock.now()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn round(&self) -> &RoundController {
        &self.round
    }

    pub fn combo(&self) -> &ComboTracker {
        &self.combo
    }

    pub fn power_ups(&self) -> &PowerUpRegistry {
        &self.power_ups
    }
}
