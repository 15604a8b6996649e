//! Session control: active pose selection and the per-frame tick.
//!
//! The controller is the single owner of the mutable session state (active
//! pose index and score history). Every mutating call takes `&mut self`, so
//! ticks are serialized by construction.
//!
//! ## Per-frame sequence
//!
//! 1. Body detected: evaluate the active pose, push the raw score into the
//!    smoother, emit joint status, corrections and the smoothed score.
//! 2. No body: clear the score history and emit the waiting message with a
//!    score of 0.
//!
//! Switching pose, even to the pose already active, clears the history.

use deha_core::{Error, LandmarkFrame, Result};
use serde::Serialize;

use crate::catalog::{PoseCatalog, PoseDefinition};
use crate::config::EngineConfig;
use crate::evaluator::{evaluate, JointStatus};
use crate::smoother::ScoreSmoother;

const ESCAPE: u8 = 27;

/// Discrete input events from the keyboard collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    SelectPose(char),
    NextPose,
    PreviousPose,
    Quit,
}

impl SessionInput {
    /// Map a raw key code; only the low byte is significant
    pub fn from_key_code(code: i32) -> Option<Self> {
        match (code & 0xFF) as u8 {
            ESCAPE => Some(Self::Quit),
            b @ b'0'..=b'9' => Some(Self::SelectPose(b as char)),
            _ => None,
        }
    }
}

/// Whether the surrounding loop should keep requesting ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// Colour band for the displayed score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        if score >= 70 {
            ScoreBand::Good
        } else if score >= 40 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

/// Renderer payload for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameFeedback {
    pub pose_name: &'static str,
    pub body_detected: bool,
    pub joint_status: JointStatus,
    /// Ordered corrections; never truncated here
    pub feedback: Vec<String>,
    pub raw_score: u8,
    pub score: u8,
}

impl FrameFeedback {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }

    /// The first `max` corrections, for renderers with limited room
    pub fn displayed_feedback(&self, max: usize) -> &[String] {
        &self.feedback[..self.feedback.len().min(max)]
    }
}

/// Owns the active pose and score history for one coaching session
#[derive(Debug, Clone)]
pub struct SessionController {
    catalog: PoseCatalog,
    config: EngineConfig,
    active: usize,
    pose: &'static PoseDefinition,
    smoother: ScoreSmoother,
    body_detected: bool,
}

impl SessionController {
    pub fn new(catalog: PoseCatalog, config: EngineConfig) -> Result<Self> {
        config.validate(&catalog)?;
        let active = catalog
            .index_of_key(config.initial_pose_key)
            .ok_or_else(|| Error::UnknownPose(config.initial_pose_key.to_string()))?;
        let pose = catalog
            .get(active)
            .ok_or_else(|| Error::UnknownPose(config.initial_pose_key.to_string()))?;

        Ok(Self {
            catalog,
            smoother: ScoreSmoother::new(config.smoothing_window),
            config,
            active,
            pose,
            body_detected: false,
        })
    }

    /// Standard catalog with the first pose active and a default window
    pub fn with_defaults() -> Self {
        let config = EngineConfig::default();
        let catalog = *PoseCatalog::standard();
        Self {
            pose: catalog.first(),
            catalog,
            smoother: ScoreSmoother::new(config.smoothing_window),
            config,
            active: 0,
            body_detected: false,
        }
    }

    pub fn catalog(&self) -> &PoseCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_pose(&self) -> &'static PoseDefinition {
        self.pose
    }

    /// Activate the pose at `index` and clear score history.
    ///
    /// Returns `false` and changes nothing for an out-of-range index.
    pub fn select_index(&mut self, index: usize) -> bool {
        let Some(pose) = self.catalog.get(index) else {
            return false;
        };
        self.active = index;
        self.pose = pose;
        self.smoother.reset();
        tracing::debug!(pose = pose.name, "pose selected");
        true
    }

    /// Activate the pose bound to `key`; unknown keys are ignored
    pub fn select_key(&mut self, key: char) -> bool {
        match self.catalog.index_of_key(key) {
            Some(index) => self.select_index(index),
            None => {
                tracing::trace!(%key, "ignoring unknown pose key");
                false
            }
        }
    }

    pub fn next_pose(&mut self) {
        self.select_index(self.catalog.next_index(self.active));
    }

    pub fn previous_pose(&mut self) {
        self.select_index(self.catalog.previous_index(self.active));
    }

    pub fn handle_input(&mut self, input: SessionInput) -> SessionControl {
        match input {
            SessionInput::SelectPose(key) => {
                self.select_key(key);
            }
            SessionInput::NextPose => self.next_pose(),
            SessionInput::PreviousPose => self.previous_pose(),
            SessionInput::Quit => return SessionControl::Quit,
        }
        SessionControl::Continue
    }

    /// Clear score history without changing pose
    pub fn reset(&mut self) {
        self.smoother.reset();
    }

    /// Process one frame; `None` means the detector found no body
    pub fn tick(&mut self, frame: Option<&LandmarkFrame>) -> FrameFeedback {
        let pose = self.active_pose();

        let Some(frame) = frame else {
            if self.body_detected {
                tracing::debug!(pose = pose.name, "body lost");
            }
            self.body_detected = false;
            self.smoother.reset();

            return FrameFeedback {
                pose_name: pose.name,
                body_detected: false,
                joint_status: JointStatus::new(),
                feedback: vec![self.config.waiting_message.clone()],
                raw_score: 0,
                score: 0,
            };
        };

        if !self.body_detected {
            tracing::debug!(pose = pose.name, "body detected");
        }
        self.body_detected = true;

        let result = evaluate(pose, frame);
        let score = self.smoother.push(result.raw_score);

        tracing::trace!(
            pose = pose.name,
            raw_score = result.raw_score,
            score,
            corrections = result.feedback.len(),
            "tick"
        );

        FrameFeedback {
            pose_name: pose.name,
            body_detected: true,
            joint_status: result.joint_status,
            feedback: result.feedback,
            raw_score: result.raw_score,
            score,
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::with_defaults()
    }
}
