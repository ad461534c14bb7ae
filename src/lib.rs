//! Canvas Arcade - simulation cores for two small canvas games
//!
//! Core modules:
//! - `sim`: Deterministic per-tick simulation (shooter and breakout)
//! - `settings`: Tuning values and playfield size, loadable from JSON
//! - `host`: Tick scheduler, restart handling and demo autopilots
//!
//! Rendering and input devices are left to the embedding host: it feeds an
//! input snapshot into `step` once per frame and draws the shapes returned by
//! `view`.

pub mod host;
pub mod settings;
pub mod sim;

pub use host::{Session, Simulation};
pub use settings::{BreakoutTuning, Settings, ShooterTuning};

/// Default game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    /// Gap between the ship's lower edge and the canvas bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 16.0;
    pub const PLAYER_SPEED: f32 = 8.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 6.0;
    pub const BULLET_HEIGHT: f32 = 18.0;
    pub const BULLET_SPEED: f32 = 12.0;
    /// The last bullet must be this far above the ship before another fires
    pub const FIRE_CLEARANCE: f32 = 60.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 44.0;
    pub const ENEMY_HEIGHT: f32 = 44.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.5;
    /// Added to enemy speed for every `ENEMY_SPEED_SCORE_STEP` points
    pub const ENEMY_SPEED_STEP: f32 = 0.7;
    pub const ENEMY_SPEED_SCORE_STEP: u32 = 10;
    /// Ticks between enemy spawns
    pub const ENEMY_SPAWN_INTERVAL: u64 = 60;

    /// Breakout paddle
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_BOTTOM_MARGIN: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Breakout ball
    pub const BALL_RADIUS: f32 = 8.0;
    /// Per-axis speed at launch and after every paddle bounce
    pub const BALL_BASE_SPEED: f32 = 6.0;
    /// Extra speed factor reached when every brick is gone (1.0 -> 2.5)
    pub const BALL_MAX_SPEED_BONUS: f32 = 1.5;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLS: u32 = 10;
    /// Largest configurable grid side
    pub const MAX_BRICK_LINES: u32 = 256;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 8.0;
    pub const BRICK_TOP_OFFSET: f32 = 50.0;
}
