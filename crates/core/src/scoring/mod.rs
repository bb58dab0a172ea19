//! Biomechanical form scoring.
//!
//! Every exercise is scored on five independent pillars. An exercise supplies
//! rules for the pillars it cares about through [`PillarRules`]; any pillar
//! without a rule scores a flat 100.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::pose::{CameraView, Pose, PoseLandmark};
use crate::reps::RepPhase;

/// Frames of landmark history kept per scorer (about one second at 30 fps).
pub const HISTORY_CAPACITY: usize = 30;

/// History-relative rules need at least this many frames.
pub const MIN_HISTORY_FOR_DRIFT: usize = 5;

/// Score assigned to a pillar without an exercise-specific rule.
pub const DEFAULT_PILLAR_SCORE: f32 = 100.0;

/// The five sub-scores plus the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: f32,
    pub stability: f32,
    pub rom: f32,
    pub posture: f32,
    pub efficiency: f32,
    pub bracing: f32,
}

/// Identifies one scoring pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pillar {
    Stability,
    RangeOfMotion,
    Posture,
    Efficiency,
    Bracing,
}

impl Pillar {
    pub const ALL: [Pillar; 5] = [
        Pillar::Stability,
        Pillar::RangeOfMotion,
        Pillar::Posture,
        Pillar::Efficiency,
        Pillar::Bracing,
    ];
}

impl ScoreBreakdown {
    pub fn pillar(&self, pillar: Pillar) -> f32 {
        match pillar {
            Pillar::Stability => self.stability,
            Pillar::RangeOfMotion => self.rom,
            Pillar::Posture => self.posture,
            Pillar::Efficiency => self.efficiency,
            Pillar::Bracing => self.bracing,
        }
    }
}

/// Per-exercise pillar weights. The five weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarWeights {
    pub stability: f32,
    pub rom: f32,
    pub posture: f32,
    pub efficiency: f32,
    pub bracing: f32,
}

impl PillarWeights {
    pub const fn new(
        stability: f32,
        rom: f32,
        posture: f32,
        efficiency: f32,
        bracing: f32,
    ) -> Self {
        Self {
            stability,
            rom,
            posture,
            efficiency,
            bracing,
        }
    }

    pub fn sum(&self) -> f32 {
        self.stability + self.rom + self.posture + self.efficiency + self.bracing
    }

    /// Weighted total clamped to `[0, 100]`.
    pub fn total(&self, breakdown: &ScoreBreakdown) -> f32 {
        let total = breakdown.stability * self.stability
            + breakdown.rom * self.rom
            + breakdown.posture * self.posture
            + breakdown.efficiency * self.efficiency
            + breakdown.bracing * self.bracing;
        if total.is_finite() {
            total.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// Inputs visible to a pillar rule.
#[derive(Debug, Clone, Copy)]
pub struct PillarContext<'a> {
    pub pose: Pose<'a>,
    pub phase: RepPhase,
    pub view: CameraView,
    pub history: &'a LandmarkHistory,
}

impl PillarContext<'_> {
    /// Oldest buffered frame, once enough history exists to judge drift.
    pub fn baseline(&self) -> Option<Pose<'_>> {
        if self.history.len() < MIN_HISTORY_FOR_DRIFT {
            return None;
        }
        self.history.oldest()
    }
}

pub type PillarFn = fn(&PillarContext<'_>) -> f32;

/// Optional rule per pillar; `None` scores [`DEFAULT_PILLAR_SCORE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PillarRules {
    pub stability: Option<PillarFn>,
    pub rom: Option<PillarFn>,
    pub posture: Option<PillarFn>,
    pub efficiency: Option<PillarFn>,
    pub bracing: Option<PillarFn>,
}

impl PillarRules {
    pub const NONE: PillarRules = PillarRules {
        stability: None,
        rom: None,
        posture: None,
        efficiency: None,
        bracing: None,
    };

    pub fn rule(&self, pillar: Pillar) -> Option<PillarFn> {
        match pillar {
            Pillar::Stability => self.stability,
            Pillar::RangeOfMotion => self.rom,
            Pillar::Posture => self.posture,
            Pillar::Efficiency => self.efficiency,
            Pillar::Bracing => self.bracing,
        }
    }
}

/// Bounded drop-oldest buffer of recent frames.
#[derive(Debug, Clone)]
pub struct LandmarkHistory {
    frames: VecDeque<Vec<PoseLandmark>>,
    capacity: usize,
}

impl Default for LandmarkHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl LandmarkHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, landmarks: &[PoseLandmark]) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(landmarks.to_vec());
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<Pose<'_>> {
        self.frames.front().and_then(|frame| Pose::new(frame))
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Scores frames for one exercise and owns that exercise's history buffer.
#[derive(Debug, Clone)]
pub struct BiomechanicalScorer {
    rules: PillarRules,
    history: LandmarkHistory,
}

impl BiomechanicalScorer {
    pub fn new(rules: PillarRules) -> Self {
        Self {
            rules,
            history: LandmarkHistory::default(),
        }
    }

    pub fn history(&self) -> &LandmarkHistory {
        &self.history
    }

    /// Records the frame in the history buffer, then evaluates every pillar.
    /// `total` is left at zero for the caller to fill in.
    pub fn analyze_pillars(
        &mut self,
        pose: Pose<'_>,
        phase: RepPhase,
        view: CameraView,
    ) -> ScoreBreakdown {
        self.history.push(pose.landmarks());
        let context = PillarContext {
            pose,
            phase,
            view,
            history: &self.history,
        };
        let score = |pillar: Pillar| {
            self.rules
                .rule(pillar)
                .map(|rule| rule(&context))
                .unwrap_or(DEFAULT_PILLAR_SCORE)
        };

        ScoreBreakdown {
            total: 0.0,
            stability: score(Pillar::Stability),
            rom: score(Pillar::RangeOfMotion),
            posture: score(Pillar::Posture),
            efficiency: score(Pillar::Efficiency),
            bracing: score(Pillar::Bracing),
        }
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}
