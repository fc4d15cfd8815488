use std::time::Duration;

use crate::GameData;
use crate::demo::DEMO_MAX_SCORE;

pub const DEFAULT_STORAGE_KEY: &str = "jeopardy-game-storage";
pub const DEFAULT_AUTO_CLOSE_MS: u32 = 3000;

/// How the score percentage on the summary is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum ScoreCeiling {
    /// Sum of the values in the loaded bank.
    #[default]
    Derived,
    /// A fixed maximum regardless of the loaded bank.
    Fixed(u32),
}

impl ScoreCeiling {
    /// Resolves the maximum possible score for `data`.
    ///
    /// `Derived` falls back to [`DEMO_MAX_SCORE`] when no bank is loaded or the bank is worth nothing.
    pub fn resolve(self, data: Option<&GameData>) -> u32 {
        match self {
            Self::Fixed(value) => value,
            Self::Derived => data
                .map(GameData::total_value)
                .filter(|total| *total > 0)
                .unwrap_or(DEMO_MAX_SCORE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Session storage entry the game state is mirrored into.
    pub storage_key: String,
    /// Delay before an answered question closes on its own.
    pub auto_close_ms: u32,
    pub score_ceiling: ScoreCeiling,
    /// Written as `version` in the persisted envelope.
    pub snapshot_version: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            auto_close_ms: DEFAULT_AUTO_CLOSE_MS,
            score_ceiling: ScoreCeiling::Derived,
            snapshot_version: 0,
        }
    }
}

impl GameConfig {
    pub fn auto_close_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.auto_close_ms))
    }
}
