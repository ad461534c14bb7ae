//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `step` per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod breakout;
pub mod collision;
pub mod shooter;
pub mod state;
pub mod view;

pub use aabb::Aabb;
pub use breakout::{Ball, BreakoutInput, BreakoutState, Brick, Paddle};
pub use collision::{HitAxis, WallHit, ball_wall_collision, classify_brick_hit, paddle_bounce};
pub use shooter::{Bullet, Enemy, Player, ShooterInput, ShooterState};
pub use state::{GameEvent, GamePhase, seeded_rng};
pub use view::{Frame, Geometry, Shape, ShapeKind, breakout_frame, shooter_frame};
