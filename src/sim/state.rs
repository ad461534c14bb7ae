//! State types shared by both games

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Session phase. Exactly one holds at any time; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Ticks are processed
    #[default]
    Running,
    /// Player lost (shooter: ship hit, breakout: ball fell out)
    GameOver,
    /// Every brick destroyed (breakout only)
    Cleared,
}

impl GamePhase {
    /// Terminal phases halt further ticks
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Running => "running",
            GamePhase::GameOver => "game_over",
            GamePhase::Cleared => "cleared",
        }
    }
}

/// Something notable that happened during the last tick (or fire action)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired { id: u32 },
    EnemySpawned { id: u32 },
    EnemyDestroyed { enemy_id: u32, bullet_id: u32 },
    PaddleHit,
    BrickDestroyed { row: u32, col: u32 },
    GameOver { score: u32 },
    Cleared { score: u32 },
}

/// Seeded RNG for a fresh session
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
