//! Vertical shooter: a ship at the bottom fires upward at enemies falling
//! from the top. The run ends when an enemy reaches the ship.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::{GameEvent, GamePhase, seeded_rng};
use crate::settings::ShooterTuning;

/// Held-key snapshot for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShooterInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Tick number used for the spawn timer; the state's own frame counter
    /// is used when `None`
    pub spawn_tick: Option<u64>,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A bullet travelling up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bullet {
    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An enemy falling down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Complete shooter state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShooterState {
    pub tuning: ShooterTuning,
    /// Seed the session was reset with
    pub seed: u64,
    pub player: Player,
    /// Oldest first
    pub bullets: Vec<Bullet>,
    /// Oldest first
    pub enemies: Vec<Enemy>,
    /// Enemies destroyed this session
    pub score: u32,
    pub phase: GamePhase,
    /// Ticks processed so far
    pub frame: u64,
    /// Spawn position RNG
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
    /// Events from the last tick, led by the fire actions taken before it
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Fire events waiting for the next tick
    #[serde(skip)]
    queued: Vec<GameEvent>,
}

impl ShooterState {
    /// Fresh session: ship centered, no bullets or enemies, score 0
    pub fn new(tuning: ShooterTuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        log::info!("Shooter reset with seed {seed}");
        Self {
            player: Player {
                pos: Vec2::new(
                    tuning.width / 2.0 - tuning.player_width / 2.0,
                    tuning.player_y(),
                ),
                size: Vec2::new(tuning.player_width, tuning.player_height),
            },
            tuning,
            seed,
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            phase: GamePhase::Running,
            frame: 0,
            rng: seeded_rng(seed),
            next_id: 1,
            events: Vec::new(),
            queued: Vec::new(),
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current enemy fall speed (pixels per tick)
    pub fn enemy_speed(&self) -> f32 {
        self.tuning.enemy_speed(self.score)
    }

    /// Spawn an enemy just above the playfield at the given x
    pub fn spawn_enemy_at(&mut self, x: f32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, -self.tuning.enemy_height),
            size: Vec2::new(self.tuning.enemy_width, self.tuning.enemy_height),
        });
        self.events.push(GameEvent::EnemySpawned { id });
        id
    }

    /// Spawn an enemy at a random x in `[0, width - enemy_width)`
    pub fn spawn_enemy(&mut self) -> u32 {
        let max_x = self.tuning.width - self.tuning.enemy_width;
        let x = self.rng.random::<f32>() * max_x;
        log::debug!("Spawning enemy at x={x:.1}");
        self.spawn_enemy_at(x)
    }
}

/// Advance the shooter by one tick
pub fn step(state: &mut ShooterState, input: &ShooterInput) {
    if state.phase.is_terminal() {
        return;
    }
    state.events.clear();
    state.events.append(&mut state.queued);
    let t = state.tuning;

    // Ship
    if input.move_left {
        state.player.pos.x -= t.player_speed;
    }
    if input.move_right {
        state.player.pos.x += t.player_speed;
    }
    state.player.pos.x = state.player.pos.x.min(t.width - t.player_width).max(0.0);

    // Bullets
    for bullet in &mut state.bullets {
        bullet.pos.y -= t.bullet_speed;
    }
    state.bullets.retain(|b| b.aabb().bottom() > 0.0);

    // Enemies
    let enemy_speed = state.enemy_speed();
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy_speed;
    }

    // Checked before off-screen enemies are culled
    let ship = state.player.aabb();
    let reached_ship = state.enemies.iter().any(|e| {
        let b = e.aabb();
        b.bottom() >= ship.top() && b.overlaps_x(&ship)
    });
    if reached_ship {
        log::debug!("Shooter game over at frame {} with score {}", state.frame, state.score);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        return;
    }
    state.enemies.retain(|e| e.pos.y < t.height);

    // Newest bullet first; each bullet takes out the newest enemy it overlaps
    for i in (0..state.bullets.len()).rev() {
        let bullet_box = state.bullets[i].aabb();
        let Some(j) = state
            .enemies
            .iter()
            .rposition(|e| e.aabb().overlaps(&bullet_box))
        else {
            continue;
        };
        let bullet = state.bullets.remove(i);
        let enemy = state.enemies.remove(j);
        state.score += 1;
        state.events.push(GameEvent::EnemyDestroyed {
            enemy_id: enemy.id,
            bullet_id: bullet.id,
        });
    }

    let spawn_tick = input.spawn_tick.unwrap_or(state.frame);
    if spawn_tick % t.spawn_interval == 0 {
        state.spawn_enemy();
    }
    state.frame += 1;
}

/// Fire a bullet from the ship's nose.
///
/// Rejected after the run ended and while the newest bullet is still within
/// `fire_clearance` of the ship. Returns whether a bullet was added. The
/// `BulletFired` event is reported with the next tick's events.
pub fn fire(state: &mut ShooterState) -> bool {
    if state.phase.is_terminal() {
        return false;
    }
    let t = state.tuning;
    let min_y = state.player.pos.y - t.fire_clearance;
    if state.bullets.last().is_some_and(|b| b.pos.y > min_y) {
        return false;
    }

    let id = state.next_entity_id();
    state.bullets.push(Bullet {
        id,
        pos: Vec2::new(
            state.player.pos.x + t.player_width / 2.0 - t.bullet_width / 2.0,
            state.player.pos.y - t.bullet_height,
        ),
        size: Vec2::new(t.bullet_width, t.bullet_height),
    });
    state.queued.push(GameEvent::BulletFired { id });
    true
}
