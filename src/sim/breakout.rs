//! Breakout: a paddle at the bottom keeps a ball in play while it clears a
//! fixed brick grid. The ball speeds up as the grid empties.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::{
    HitAxis, ball_on_paddle, ball_wall_collision, classify_brick_hit, paddle_bounce,
};
use super::state::{GameEvent, GamePhase};
use crate::settings::BreakoutTuning;

/// Held-key snapshot for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreakoutInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// The player's paddle (y never changes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Base velocity per tick, before the speed multiplier
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn aabb(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }
}

/// A grid brick. Destroyed bricks stay in the grid, flagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub row: u32,
    pub col: u32,
    pub rect: Aabb,
    pub destroyed: bool,
}

/// Complete breakout state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakoutState {
    pub tuning: BreakoutTuning,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Row-major, top row first
    pub bricks: Vec<Brick>,
    /// Bricks destroyed this session
    pub score: u32,
    pub phase: GamePhase,
    /// Ticks processed so far
    pub frame: u64,
    /// Events from the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl BreakoutState {
    /// Fresh session: full grid, paddle centered, ball at the playfield
    /// center heading up and right
    pub fn new(tuning: BreakoutTuning) -> Self {
        let tuning = tuning.sanitized();
        log::info!(
            "Breakout reset with {}x{} bricks",
            tuning.brick_rows,
            tuning.brick_cols
        );
        Self {
            paddle: Paddle {
                pos: Vec2::new(
                    tuning.width / 2.0 - tuning.paddle_width / 2.0,
                    tuning.paddle_y(),
                ),
                size: Vec2::new(tuning.paddle_width, tuning.paddle_height),
            },
            ball: Ball {
                pos: Vec2::new(tuning.width / 2.0, tuning.height / 2.0),
                vel: Vec2::new(tuning.ball_base_speed, -tuning.ball_base_speed),
                radius: tuning.ball_radius,
            },
            bricks: build_grid(&tuning),
            tuning,
            score: 0,
            phase: GamePhase::Running,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Bricks still standing
    pub fn bricks_left(&self) -> u32 {
        self.tuning.total_bricks().saturating_sub(self.score)
    }

    /// Current ball displacement multiplier
    pub fn speed_multiplier(&self) -> f32 {
        self.tuning.speed_multiplier(self.score)
    }

    /// Grid brick at (row, col)
    pub fn brick(&self, row: u32, col: u32) -> Option<&Brick> {
        if row >= self.tuning.brick_rows || col >= self.tuning.brick_cols {
            return None;
        }
        self.bricks.get((row * self.tuning.brick_cols + col) as usize)
    }
}

/// Lay out the brick grid, centered horizontally
fn build_grid(tuning: &BreakoutTuning) -> Vec<Brick> {
    let left = tuning.brick_left_offset();
    let pitch_x = tuning.brick_width + tuning.brick_padding;
    let pitch_y = tuning.brick_height + tuning.brick_padding;

    let mut bricks = Vec::with_capacity(tuning.total_bricks() as usize);
    for row in 0..tuning.brick_rows {
        for col in 0..tuning.brick_cols {
            bricks.push(Brick {
                row,
                col,
                rect: Aabb::new(
                    left + col as f32 * pitch_x,
                    tuning.brick_top_offset + row as f32 * pitch_y,
                    tuning.brick_width,
                    tuning.brick_height,
                ),
                destroyed: false,
            });
        }
    }
    bricks
}

/// Advance breakout by one tick
pub fn step(state: &mut BreakoutState, input: &BreakoutInput) {
    if state.phase.is_terminal() {
        return;
    }
    state.events.clear();
    let t = state.tuning;

    // Paddle
    if input.move_left {
        state.paddle.pos.x -= t.paddle_speed;
    }
    if input.move_right {
        state.paddle.pos.x += t.paddle_speed;
    }
    state.paddle.pos.x = state.paddle.pos.x.min(t.width - t.paddle_width).max(0.0);

    // Ball motion, scaled by how much of the grid is gone
    let displacement = state.ball.vel * state.speed_multiplier();
    state.ball.pos += displacement;

    let walls = ball_wall_collision(state.ball.pos, state.ball.radius, state.ball.vel, t.width);
    if walls.flip_x {
        state.ball.vel.x = -state.ball.vel.x;
    }
    if walls.flip_y {
        state.ball.vel.y = -state.ball.vel.y;
    }

    let paddle = state.paddle.aabb();
    if ball_on_paddle(state.ball.pos, state.ball.radius, state.ball.vel, &paddle) {
        state.ball.vel = paddle_bounce(state.ball.pos.x, &paddle, t.ball_base_speed);
        state.events.push(GameEvent::PaddleHit);
    }

    // Every overlapping brick is resolved on its own, so two bricks hit on the
    // same axis cancel each other's flip
    let ball_box = state.ball.aabb();
    let previous = ball_box.translated(-displacement);
    for brick in state.bricks.iter_mut().filter(|b| !b.destroyed) {
        if !ball_box.overlaps(&brick.rect) {
            continue;
        }
        brick.destroyed = true;
        state.score += 1;
        state.events.push(GameEvent::BrickDestroyed {
            row: brick.row,
            col: brick.col,
        });
        match classify_brick_hit(&previous, &brick.rect) {
            HitAxis::Vertical => state.ball.vel.y = -state.ball.vel.y,
            HitAxis::Horizontal => state.ball.vel.x = -state.ball.vel.x,
        }
    }

    state.frame += 1;

    if state.ball.aabb().top() > t.height {
        log::debug!("Breakout game over at frame {} with score {}", state.frame, state.score);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
    } else if state.score >= t.total_bricks() {
        log::debug!("Breakout cleared at frame {}", state.frame);
        state.phase = GamePhase::Cleared;
        state.events.push(GameEvent::Cleared { score: state.score });
    }
}
