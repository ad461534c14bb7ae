//! Read-only projection of game state for a renderer
//!
//! A `Frame` lists shapes in draw order (back to front) together with the
//! score and phase. Destroyed bricks are left out.

use serde::{Deserialize, Serialize};

use super::breakout::BreakoutState;
use super::shooter::ShooterState;
use super::state::GamePhase;

/// What a shape depicts, for picking colors and sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ShapeKind {
    Player,
    Bullet { id: u32 },
    Enemy { id: u32 },
    Paddle,
    Ball,
    Brick { row: u32, col: u32 },
}

/// Where a shape is, in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Geometry {
    /// Top-left corner and size
    Rect { x: f32, y: f32, width: f32, height: f32 },
    /// Center and radius
    Circle { x: f32, y: f32, radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub geometry: Geometry,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Playfield size
    pub width: f32,
    pub height: f32,
    pub shapes: Vec<Shape>,
    pub score: u32,
    pub phase: GamePhase,
}

impl Frame {
    /// Scoreboard text
    pub fn status_line(&self) -> String {
        match self.phase {
            GamePhase::Running => format!("Score: {}", self.score),
            GamePhase::GameOver => format!("Game over! Final score: {}", self.score),
            GamePhase::Cleared => format!("Cleared! Final score: {}", self.score),
        }
    }
}

fn rect(kind: ShapeKind, pos: glam::Vec2, size: glam::Vec2) -> Shape {
    Shape {
        kind,
        geometry: Geometry::Rect {
            x: pos.x,
            y: pos.y,
            width: size.x,
            height: size.y,
        },
    }
}

/// Ship, then bullets, then enemies (each oldest first)
pub fn shooter_frame(state: &ShooterState) -> Frame {
    let mut shapes = Vec::with_capacity(1 + state.bullets.len() + state.enemies.len());
    shapes.push(rect(ShapeKind::Player, state.player.pos, state.player.size));
    shapes.extend(
        state
            .bullets
            .iter()
            .map(|b| rect(ShapeKind::Bullet { id: b.id }, b.pos, b.size)),
    );
    shapes.extend(
        state
            .enemies
            .iter()
            .map(|e| rect(ShapeKind::Enemy { id: e.id }, e.pos, e.size)),
    );

    Frame {
        width: state.tuning.width,
        height: state.tuning.height,
        shapes,
        score: state.score,
        phase: state.phase,
    }
}

/// Standing bricks (row-major), then paddle, then ball
pub fn breakout_frame(state: &BreakoutState) -> Frame {
    let mut shapes: Vec<Shape> = state
        .bricks
        .iter()
        .filter(|b| !b.destroyed)
        .map(|b| {
            rect(
                ShapeKind::Brick {
                    row: b.row,
                    col: b.col,
                },
                b.rect.pos,
                b.rect.size,
            )
        })
        .collect();
    shapes.push(rect(ShapeKind::Paddle, state.paddle.pos, state.paddle.size));
    shapes.push(Shape {
        kind: ShapeKind::Ball,
        geometry: Geometry::Circle {
            x: state.ball.pos.x,
            y: state.ball.pos.y,
            radius: state.ball.radius,
        },
    });

    Frame {
        width: state.tuning.width,
        height: state.tuning.height,
        shapes,
        score: state.score,
        phase: state.phase,
    }
}
