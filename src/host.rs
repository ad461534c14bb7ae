//! Host-side driving of a simulation
//!
//! The core only knows how to advance one tick. `Session` owns the tick loop:
//! it holds the latest input snapshot, stops scheduling once the game reaches
//! a terminal phase, and handles restart requests.

use crate::sim::state::{GameEvent, GamePhase};
use crate::sim::view::{self, Frame};
use crate::sim::{BreakoutInput, BreakoutState, ShooterInput, ShooterState, breakout, shooter};

/// A game that can be ticked by a `Session`
pub trait Simulation {
    /// Held-key snapshot consumed by one tick
    type Input: Clone + Default;

    /// Replace the whole state with a fresh session
    fn restart(&mut self, seed: u64);
    /// Advance one tick (no-op once terminal)
    fn step(&mut self, input: &Self::Input);
    fn phase(&self) -> GamePhase;
    fn score(&self) -> u32;
    /// Drawable projection of the current state
    fn frame(&self) -> Frame;
    /// Events from the last tick, including actions taken just before it
    fn events(&self) -> &[GameEvent];
}

impl Simulation for ShooterState {
    type Input = ShooterInput;

    fn restart(&mut self, seed: u64) {
        *self = ShooterState::new(self.tuning, seed);
    }

    fn step(&mut self, input: &ShooterInput) {
        shooter::step(self, input);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn frame(&self) -> Frame {
        view::shooter_frame(self)
    }

    fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

impl Simulation for BreakoutState {
    type Input = BreakoutInput;

    /// Breakout has no randomness; the seed is unused
    fn restart(&mut self, _seed: u64) {
        *self = BreakoutState::new(self.tuning);
    }

    fn step(&mut self, input: &BreakoutInput) {
        breakout::step(self, input);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn frame(&self) -> Frame {
        view::breakout_frame(self)
    }

    fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

/// Tick scheduler for one game
pub struct Session<S: Simulation> {
    sim: S,
    /// Held-key snapshot, updated by the input collaborator between ticks
    pub input: S::Input,
    base_seed: u64,
    restarts: u64,
    ticks: u64,
}

impl<S: Simulation> Session<S> {
    pub fn new(sim: S, seed: u64) -> Self {
        Self {
            sim,
            input: S::Input::default(),
            base_seed: seed,
            restarts: 0,
            ticks: 0,
        }
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// Mutable access for out-of-tick actions such as firing
    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    /// Whether another tick would be scheduled
    pub fn is_running(&self) -> bool {
        !self.sim.phase().is_terminal()
    }

    /// Ticks run since the last (re)start
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Seed of the current session
    pub fn seed(&self) -> u64 {
        self.base_seed.wrapping_add(self.restarts)
    }

    /// Run one tick with the held input. Returns false once terminal.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.sim.step(&self.input);
        self.ticks += 1;
        if !self.is_running() {
            log::info!(
                "Session ended ({}) after {} ticks, score {}",
                self.sim.phase().as_str(),
                self.ticks,
                self.sim.score()
            );
        }
        true
    }

    /// Run up to `max_ticks` ticks, stopping at a terminal phase.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, max_ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < max_ticks && self.tick() {
            ran += 1;
        }
        ran
    }

    /// Like `advance`, but asks `drive` for the input before every tick.
    /// The driver may also act on the state directly (e.g. fire).
    pub fn advance_with<F>(&mut self, max_ticks: u64, mut drive: F) -> u64
    where
        F: FnMut(&mut S) -> S::Input,
    {
        let mut ran = 0;
        while ran < max_ticks && self.is_running() {
            self.input = drive(&mut self.sim);
            self.tick();
            ran += 1;
        }
        ran
    }

    /// Throw the current game away and start a fresh one with the next seed.
    /// Held input is released.
    pub fn restart(&mut self) {
        self.restarts += 1;
        self.ticks = 0;
        self.input = S::Input::default();
        let seed = self.seed();
        self.sim.restart(seed);
    }
}

/// Demo driver for the shooter: line up under the lowest enemy still above
/// the ship and fire when roughly aligned. Returns the input and whether to
/// fire.
pub fn shooter_autopilot(state: &ShooterState) -> (ShooterInput, bool) {
    let ship = state.player.aabb();
    let ship_x = ship.center().x;

    let target = state
        .enemies
        .iter()
        .filter(|e| e.aabb().bottom() < ship.top())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.aabb().center().x);

    let mut input = ShooterInput::default();
    let Some(target_x) = target else {
        return (input, false);
    };

    let dead_zone = state.tuning.player_speed;
    if target_x < ship_x - dead_zone {
        input.move_left = true;
    } else if target_x > ship_x + dead_zone {
        input.move_right = true;
    }
    let aligned = (target_x - ship_x).abs() < state.tuning.enemy_width / 2.0;
    (input, aligned)
}

/// Demo driver for breakout: keep the paddle center under the ball
pub fn breakout_autopilot(state: &BreakoutState) -> BreakoutInput {
    let paddle_x = state.paddle.aabb().center().x;
    let dead_zone = state.tuning.paddle_speed / 2.0;
    BreakoutInput {
        move_left: state.ball.pos.x < paddle_x - dead_zone,
        move_right: state.ball.pos.x > paddle_x + dead_zone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BreakoutTuning, ShooterTuning};
    use glam::Vec2;

    #[test]
    fn test_advance_stops_at_terminal() {
        let mut state = BreakoutState::new(BreakoutTuning::default());
        state.ball.pos = Vec2::new(100.0, 590.0);
        state.ball.vel = Vec2::new(0.0, 6.0);
        let mut session = Session::new(state, 0);

        // Top edge passes 600 on the fourth tick
        assert_eq!(session.advance(100), 4);
        assert!(!session.is_running());
        assert_eq!(session.sim().phase(), GamePhase::GameOver);
        assert_eq!(session.advance(100), 0);
        assert!(!session.tick());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = Session::new(ShooterState::new(ShooterTuning::default(), 10), 10);
        session.input.move_left = true;
        session.advance(30);
        shooter::fire(session.sim_mut());
        session.sim_mut().phase = GamePhase::GameOver;

        session.restart();
        assert!(session.is_running());
        assert_eq!(session.ticks(), 0);
        assert_eq!(session.restarts(), 1);
        assert_eq!(session.seed(), 11);
        assert_eq!(session.input, ShooterInput::default());

        let sim = session.sim();
        assert_eq!(sim.seed, 11);
        assert_eq!(sim.score, 0);
        assert_eq!(sim.frame, 0);
        assert!(sim.bullets.is_empty());
        assert!(sim.enemies.is_empty());
        assert_eq!(sim.player.pos.x, 376.0);
    }

    #[test]
    fn test_held_input_applies_each_tick() {
        let mut session = Session::new(BreakoutState::new(BreakoutTuning::default()), 0);
        session.input.move_left = true;
        session.advance(3);
        assert_eq!(session.sim().paddle.pos.x, 350.0 - 24.0);
        assert_eq!(session.ticks(), 3);
    }

    #[test]
    fn test_shooter_autopilot_tracks_and_fires() {
        let mut state = ShooterState::new(ShooterTuning::default(), 1);
        state.spawn_enemy_at(10.0);
        let (input, fire) = shooter_autopilot(&state);
        assert!(input.move_left);
        assert!(!input.move_right);
        assert!(!fire);

        state.enemies[0].pos.x = 380.0;
        let (input, fire) = shooter_autopilot(&state);
        assert!(!input.move_left && !input.move_right);
        assert!(fire);
    }

    #[test]
    fn test_shooter_autopilot_idle_without_targets() {
        let state = ShooterState::new(ShooterTuning::default(), 1);
        assert_eq!(shooter_autopilot(&state), (ShooterInput::default(), false));
    }

    #[test]
    fn test_breakout_autopilot_follows_ball() {
        let mut state = BreakoutState::new(BreakoutTuning::default());
        state.ball.pos.x = 100.0;
        assert!(breakout_autopilot(&state).move_left);
        state.ball.pos.x = 700.0;
        assert!(breakout_autopilot(&state).move_right);
        state.ball.pos.x = 401.0;
        assert_eq!(breakout_autopilot(&state), BreakoutInput::default());
    }

    #[test]
    fn test_driven_session_scores() {
        let mut session = Session::new(ShooterState::new(ShooterTuning::default(), 7), 7);
        session.advance_with(1200, |s| {
            let (input, fire) = shooter_autopilot(s);
            if fire {
                shooter::fire(s);
            }
            input
        });
        assert!(session.sim().score > 0);
    }

    #[test]
    fn test_driver_sees_fire_events() {
        let mut session = Session::new(ShooterState::new(ShooterTuning::default(), 7), 7);
        let mut fired = 0;
        let mut reported = 0;
        let count = |s: &ShooterState| {
            s.events()
                .iter()
                .filter(|e| matches!(e, GameEvent::BulletFired { .. }))
                .count()
        };
        for _ in 0..600 {
            session.advance_with(1, |s| {
                reported += count(&*s);
                let (input, fire) = shooter_autopilot(s);
                if fire && shooter::fire(s) {
                    fired += 1;
                }
                input
            });
        }
        reported += count(session.sim());

        assert!(fired > 0);
        assert_eq!(reported, fired);
    }
}
