use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{ExerciseType, FormCheckError, Result};

/// Tunables for the auto-detect orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Consecutive classifier agreements an exercise must exceed before it
    /// is locked in, unless overridden in `lock_frames`.
    pub default_lock_frames: u32,
    pub lock_frames: BTreeMap<ExerciseType, u32>,
    /// Lock threshold once movement shows a plank is really a push-up.
    pub dynamic_lock_frames: u32,
    /// Shoulder height range, in normalised units, that counts as movement.
    pub movement_variance_threshold: f32,
    pub shoulder_history_len: usize,
    /// Frame rate assumed when converting lock frames into seconds.
    pub nominal_fps: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let lock_frames = [
            (ExerciseType::Plank, 30),
            (ExerciseType::RussianTwist, 12),
            (ExerciseType::LateralRaise, 12),
            (ExerciseType::PullUp, 4),
            (ExerciseType::LatPulldown, 4),
            (ExerciseType::BenchPress, 4),
            (ExerciseType::LegRaises, 4),
        ]
        .into_iter()
        .collect();

        Self {
            default_lock_frames: 6,
            lock_frames,
            dynamic_lock_frames: 4,
            movement_variance_threshold: 0.05,
            shoulder_history_len: 30,
            nominal_fps: 6.0,
        }
    }
}

impl EngineConfig {
    pub fn lock_frames_for(&self, exercise: ExerciseType) -> u32 {
        self.lock_frames
            .get(&exercise)
            .copied()
            .unwrap_or(self.default_lock_frames)
    }

    /// Parses a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_lock_frames == 0 || self.dynamic_lock_frames == 0 {
            return Err(FormCheckError::InvalidConfig(
                "lock frame counts must be at least 1".into(),
            ));
        }
        if let Some((exercise, _)) = self.lock_frames.iter().find(|(_, frames)| **frames == 0) {
            return Err(FormCheckError::InvalidConfig(format!(
                "lock frames for {exercise} must be at least 1"
            )));
        }
        if self.nominal_fps.is_nan() || self.nominal_fps <= 0.0 {
            return Err(FormCheckError::InvalidConfig(format!(
                "nominal_fps must be positive, got {}",
                self.nominal_fps
            )));
        }
        if self.shoulder_history_len == 0 {
            return Err(FormCheckError::InvalidConfig(
                "shoulder_history_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
