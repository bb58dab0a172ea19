//! Offline replay of recorded landmark sessions.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::engine::GeometricRuleEngine;
use crate::exercises::{ExerciseType, Feedback};
use crate::pose::PoseLandmark;
use crate::reps::RepTimestamp;
use crate::{FormCheckError, Result};

/// One captured frame, stamped in ms on the video timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub timestamp: f64,
    pub landmarks: Vec<PoseLandmark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedSession {
    #[serde(default)]
    pub recording_start: f64,
    pub frames: Vec<RecordedFrame>,
}

impl RecordedSession {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Fails on the first frame stamped earlier than its predecessor.
    pub fn check_monotonic(&self) -> Result<()> {
        for (index, pair) in self.frames.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(FormCheckError::NonMonotonicTimestamp {
                    index: index + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }
        Ok(())
    }
}

/// Summary of a replayed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    /// The selected exercise, or the one auto-detect locked onto.
    pub exercise: Option<ExerciseType>,
    pub rep_count: u32,
    pub rep_timestamps: Vec<RepTimestamp>,
    pub frames_analyzed: usize,
    /// Mean score over frames that reached an exercise analyser.
    pub mean_score: f32,
    pub good_form_ratio: f32,
    pub last_feedback: Option<Feedback>,
}

impl SessionReport {
    /// Bundle sent alongside the video for remote deep analysis. Rep
    /// timestamps travel as a JSON-encoded string.
    pub fn upload_manifest(&self) -> Result<Value> {
        let exercise = self.exercise.map(|e| e.name()).unwrap_or_default();
        Ok(json!({
            "exercise": exercise,
            "repCount": self.rep_count,
            "repTimestamps": serde_json::to_string(&self.rep_timestamps)?,
        }))
    }
}

/// Replays `session` through a fresh engine set to `exercise`.
pub fn run_session(
    session: &RecordedSession,
    exercise: ExerciseType,
    config: EngineConfig,
) -> Result<SessionReport> {
    config.validate()?;
    session.check_monotonic()?;

    let mut engine = GeometricRuleEngine::with_config(config);
    engine.set_exercise(exercise);
    engine.set_recording_start_time(session.recording_start);
    info!(frames = session.frames.len(), exercise = %exercise, "replaying session");

    let mut scored = 0usize;
    let mut score_sum = 0.0f32;
    let mut good = 0usize;
    let mut last_feedback = None;
    for frame in &session.frames {
        let feedback = engine.analyze_frame(&frame.landmarks, frame.timestamp);
        if feedback.detected_exercise.is_some() {
            scored += 1;
            score_sum += feedback.score;
            if feedback.is_good_form {
                good += 1;
            }
        }
        last_feedback = Some(feedback);
    }
    debug!(scored, "session replay finished");

    let ratio = |n: usize| if scored == 0 { 0.0 } else { n as f32 / scored as f32 };
    Ok(SessionReport {
        exercise: engine.active_exercise(),
        rep_count: engine.rep_count(),
        rep_timestamps: engine.rep_timestamps().to_vec(),
        frames_analyzed: session.frames.len(),
        mean_score: if scored == 0 { 0.0 } else { score_sum / scored as f32 },
        good_form_ratio: ratio(good),
        last_feedback,
    })
}
