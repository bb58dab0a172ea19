//! Core library for the FormCheck analysis engine.
//!
//! The engine turns per-frame pose landmarks into exercise feedback: it
//! classifies the exercise being performed, counts repetitions (or hold
//! time), scores form across five biomechanical pillars and picks the
//! correction to show. Each module owns one stage of that pipeline and the
//! [`GeometricRuleEngine`] ties them together for a single session.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod exercises;
pub mod geometry;
pub mod pose;
pub mod reps;
pub mod scoring;
pub mod session;

pub use classifier::classify;
pub use config::EngineConfig;
pub use engine::GeometricRuleEngine;
pub use error::{FormCheckError, Result};
pub use exercises::{ExerciseAnalyzer, ExerciseType, Feedback, QualityFlag};
pub use pose::{CameraView, PoseLandmark};
pub use reps::{RepPhase, RepTimestamp};
pub use scoring::ScoreBreakdown;
pub use session::{run_session, RecordedFrame, RecordedSession, SessionReport};
