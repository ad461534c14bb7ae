//! Game tuning and playfield configuration
//!
//! Every value has a default taken from `crate::consts`; a JSON file only
//! needs to name the fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Shooter playfield and balance values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterTuning {
    /// Playfield width (canvas pixels)
    pub width: f32,
    /// Playfield height (canvas pixels)
    pub height: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the ship and the bottom of the playfield
    pub player_bottom_margin: f32,
    /// Horizontal pixels per tick while a direction is held
    pub player_speed: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Upward pixels per tick
    pub bullet_speed: f32,
    /// Distance the newest bullet must clear above the ship before the next shot
    pub fire_clearance: f32,

    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Downward pixels per tick at score 0
    pub enemy_base_speed: f32,
    /// Speed added per completed score step
    pub enemy_speed_step: f32,
    /// Points per speed step
    pub enemy_speed_score_step: u32,
    /// Ticks between enemy spawns
    pub spawn_interval: u64,
}

impl Default for ShooterTuning {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            player_speed: PLAYER_SPEED,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            fire_clearance: FIRE_CLEARANCE,

            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_step: ENEMY_SPEED_STEP,
            enemy_speed_score_step: ENEMY_SPEED_SCORE_STEP,
            spawn_interval: ENEMY_SPAWN_INTERVAL,
        }
    }
}

impl ShooterTuning {
    /// Fixed y of the ship's top edge
    pub fn player_y(&self) -> f32 {
        self.height - self.player_height - self.player_bottom_margin
    }

    /// Enemy fall speed for the given score (rises in discrete steps)
    pub fn enemy_speed(&self, score: u32) -> f32 {
        let steps = score / self.enemy_speed_score_step.max(1);
        self.enemy_base_speed + steps as f32 * self.enemy_speed_step
    }

    /// Clamp values the simulation cannot work with, logging each correction
    pub fn sanitized(mut self) -> Self {
        let widest = self.player_width.max(self.enemy_width).max(self.bullet_width);
        if self.width < widest {
            log::warn!(
                "shooter width {} narrower than widest entity, using {}",
                self.width,
                widest
            );
            self.width = widest;
        }
        if self.spawn_interval == 0 {
            log::warn!("shooter spawn_interval must be positive, using 1");
            self.spawn_interval = 1;
        }
        if self.enemy_speed_score_step == 0 {
            log::warn!("shooter enemy_speed_score_step must be positive, using 1");
            self.enemy_speed_score_step = 1;
        }
        self
    }
}

/// Breakout playfield and balance values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutTuning {
    pub width: f32,
    pub height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_margin: f32,
    pub paddle_speed: f32,

    pub ball_radius: f32,
    /// Per-axis ball speed at launch and after each paddle bounce
    pub ball_base_speed: f32,
    /// Extra multiplier reached once every brick is destroyed
    pub max_speed_bonus: f32,

    pub brick_rows: u32,
    pub brick_cols: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_top_offset: f32,
}

impl Default for BreakoutTuning {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            max_speed_bonus: BALL_MAX_SPEED_BONUS,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_top_offset: BRICK_TOP_OFFSET,
        }
    }
}

impl BreakoutTuning {
    /// Number of bricks in a fresh grid
    pub fn total_bricks(&self) -> u32 {
        self.brick_rows.saturating_mul(self.brick_cols)
    }

    /// Fixed y of the paddle's top edge
    pub fn paddle_y(&self) -> f32 {
        self.height - self.paddle_height - self.paddle_bottom_margin
    }

    /// Left offset that centers the brick grid horizontally
    pub fn brick_left_offset(&self) -> f32 {
        let cols = self.brick_cols as f32;
        let grid_width = cols * self.brick_width + (cols - 1.0) * self.brick_padding;
        (self.width - grid_width) / 2.0
    }

    /// Ball displacement multiplier: 1.0 with the grid intact, rising
    /// linearly to `1.0 + max_speed_bonus` with every brick gone
    pub fn speed_multiplier(&self, score: u32) -> f32 {
        let total = self.total_bricks().max(1) as f32;
        let left = total - score as f32;
        1.0 + self.max_speed_bonus * (1.0 - left / total)
    }

    /// Clamp values the simulation cannot work with, logging each correction
    pub fn sanitized(mut self) -> Self {
        if self.brick_rows == 0 {
            log::warn!("breakout brick_rows must be positive, using 1");
            self.brick_rows = 1;
        }
        if self.brick_cols == 0 {
            log::warn!("breakout brick_cols must be positive, using 1");
            self.brick_cols = 1;
        }
        if self.brick_rows > MAX_BRICK_LINES {
            log::warn!(
                "breakout brick_rows {} too large, using {MAX_BRICK_LINES}",
                self.brick_rows
            );
            self.brick_rows = MAX_BRICK_LINES;
        }
        if self.brick_cols > MAX_BRICK_LINES {
            log::warn!(
                "breakout brick_cols {} too large, using {MAX_BRICK_LINES}",
                self.brick_cols
            );
            self.brick_cols = MAX_BRICK_LINES;
        }
        if self.paddle_width <= 0.0 {
            log::warn!("breakout paddle_width must be positive, using {PADDLE_WIDTH}");
            self.paddle_width = PADDLE_WIDTH;
        }
        if self.width < self.paddle_width {
            log::warn!(
                "breakout width {} narrower than paddle, using {}",
                self.width,
                self.paddle_width
            );
            self.width = self.paddle_width;
        }
        self
    }
}

/// Top-level configuration for the runner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed; the runner picks one from the clock when absent
    pub seed: Option<u64>,
    pub shooter: ShooterTuning,
    pub breakout: BreakoutTuning,
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Cannot read settings {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Sanitize both game tunings
    pub fn sanitized(self) -> Self {
        Self {
            seed: self.seed,
            shooter: self.shooter.sanitized(),
            breakout: self.breakout.sanitized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "shooter": { "width": 480 } }"#)
            .expect("valid json");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.shooter.width, 480.0);
        assert_eq!(settings.shooter.player_width, PLAYER_WIDTH);
        assert_eq!(settings.breakout, BreakoutTuning::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ shooter: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/canvas-arcade.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_enemy_speed_steps() {
        let tuning = ShooterTuning::default();
        assert_eq!(tuning.enemy_speed(0), 2.5);
        assert_eq!(tuning.enemy_speed(9), 2.5);
        assert!((tuning.enemy_speed(10) - 3.2).abs() < 1e-5);
        assert!((tuning.enemy_speed(25) - 3.9).abs() < 1e-5);
    }

    #[test]
    fn test_speed_multiplier_range() {
        let tuning = BreakoutTuning::default();
        assert_eq!(tuning.total_bricks(), 50);
        assert_eq!(tuning.speed_multiplier(0), 1.0);
        assert!((tuning.speed_multiplier(25) - 1.75).abs() < 1e-5);
        assert!((tuning.speed_multiplier(50) - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_sanitize_zero_grid() {
        let tuning = BreakoutTuning {
            brick_rows: 0,
            brick_cols: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.total_bricks(), 1);

        let shooter = ShooterTuning {
            spawn_interval: 0,
            width: 10.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(shooter.spawn_interval, 1);
        assert_eq!(shooter.width, PLAYER_WIDTH);
    }

    #[test]
    fn test_sanitize_huge_grid() {
        let tuning = BreakoutTuning {
            brick_rows: 70_000,
            brick_cols: 70_000,
            ..Default::default()
        };
        // Unsanitized values saturate instead of overflowing
        assert_eq!(tuning.total_bricks(), u32::MAX);

        let tuning = tuning.sanitized();
        assert_eq!(tuning.brick_rows, MAX_BRICK_LINES);
        assert_eq!(tuning.brick_cols, MAX_BRICK_LINES);
        assert_eq!(tuning.total_bricks(), MAX_BRICK_LINES * MAX_BRICK_LINES);
    }

    #[test]
    fn test_grid_is_centered() {
        let tuning = BreakoutTuning::default();
        // 10 * 70 + 9 * 8 = 772
        assert!((tuning.brick_left_offset() - 14.0).abs() < 1e-5);
    }
}
