//! Editor configuration: history depth, dead-space import, playback limits.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the dead-space importer treats overlapping detector ranges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Fail the import with an error.
    #[default]
    Reject,
    /// Coalesce overlapping ranges into one dead-space segment.
    Merge,
}

/// Dead-space import settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadSpaceConfig {
    pub overlap_policy: OverlapPolicy,
    /// Ranges shorter than this (seconds) are discarded before import.
    pub min_duration: f64,
}

impl Default for DeadSpaceConfig {
    fn default() -> Self {
        Self {
            overlap_policy: OverlapPolicy::Reject,
            min_duration: 0.0,
        }
    }
}

/// Playback settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub min_rate: f64,
    pub max_rate: f64,
}

impl PlaybackConfig {
    /// Rates offered by the speed menu.
    pub const SPEED_OPTIONS: [f64; 9] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 2.5, 3.0];
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            min_rate: 0.25,
            max_rate: 3.0,
        }
    }
}

/// Top-level editor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo entries.
    pub history_depth: usize,
    pub dead_space: DeadSpaceConfig,
    pub playback: PlaybackConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: 50,
            dead_space: DeadSpaceConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(
            history_depth = config.history_depth,
            overlap_policy = ?config.dead_space.overlap_policy,
            "Editor config loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_depth == 0 {
            return Err(ConfigError::Invalid {
                reason: "history_depth must be at least 1".into(),
            });
        }
        if !(self.dead_space.min_duration >= 0.0) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "dead_space.min_duration must be >= 0, got {}",
                    self.dead_space.min_duration
                ),
            });
        }
        let PlaybackConfig { min_rate, max_rate } = self.playback;
        if !(min_rate > 0.0 && min_rate <= max_rate) {
            return Err(ConfigError::Invalid {
                reason: format!("playback rate range [{min_rate}, {max_rate}] is empty"),
            });
        }
        Ok(())
    }
}
