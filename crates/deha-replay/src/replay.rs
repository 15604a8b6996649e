//! Replay of recorded detector output through a session controller.
//!
//! Input is JSON lines, one object per camera frame:
//!
//! ```json
//! {"timestamp_ms": 33, "width": 1280, "height": 720, "landmarks": [...], "key": 50}
//! ```
//!
//! `landmarks` is `null` (or absent) when no body was detected. `key` is an
//! optional raw key code read after the frame was shown.

use std::io::{BufRead, Write};

use deha_core::{Error, FrameSize, LandmarkFrame, NormalizedLandmark, Result};
use deha_pose::{
    EngineConfig, FrameFeedback, JointStatus, ScoreBand, SessionControl, SessionController,
    SessionInput,
};
use serde::{Deserialize, Serialize};

/// One recorded detector result
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedFrame {
    pub timestamp_ms: u64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub landmarks: Option<Vec<NormalizedLandmark>>,
    #[serde(default)]
    pub key: Option<i32>,
}

impl RecordedFrame {
    pub fn landmark_frame(&self) -> Result<Option<LandmarkFrame>> {
        let Some(landmarks) = &self.landmarks else {
            return Ok(None);
        };
        // An empty detection list means no body, same as null.
        if landmarks.is_empty() {
            return Ok(None);
        }
        let size = FrameSize::new(self.width, self.height)?;
        LandmarkFrame::from_normalized(landmarks, size).map(Some)
    }
}

/// Renderer payload as written to the output stream
#[derive(Debug, Clone, Serialize)]
pub struct RenderedFrame<'a> {
    pub timestamp_ms: u64,
    pub fps: f64,
    pub pose: &'static str,
    pub body_detected: bool,
    pub score: u8,
    pub band: ScoreBand,
    pub corrections: &'a [String],
    /// Set to the all-clear message when a detected pose needs no corrections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    pub joint_status: &'a JointStatus,
}

impl<'a> RenderedFrame<'a> {
    pub fn new(
        feedback: &'a FrameFeedback,
        timestamp_ms: u64,
        fps: f64,
        config: &'a EngineConfig,
    ) -> Self {
        let all_clear = feedback.body_detected && feedback.feedback.is_empty();
        Self {
            timestamp_ms,
            fps,
            pose: feedback.pose_name,
            body_detected: feedback.body_detected,
            score: feedback.score,
            band: feedback.band(),
            corrections: feedback.displayed_feedback(config.max_displayed_corrections),
            message: all_clear.then_some(config.all_clear_message.as_str()),
            joint_status: &feedback.joint_status,
        }
    }
}

/// Frame rate from successive frame timestamps
#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    last_ms: Option<u64>,
    fps: f64,
}

impl FpsMeter {
    const MIN_INTERVAL_MS: f64 = 1e-3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `timestamp_ms` and return the instantaneous rate.
    ///
    /// Timestamps must be non-decreasing.
    pub fn tick(&mut self, timestamp_ms: u64) -> Result<f64> {
        if let Some(last) = self.last_ms {
            if timestamp_ms < last {
                return Err(Error::TimestampRegression {
                    previous_ms: last,
                    current_ms: timestamp_ms,
                });
            }
            let dt = (timestamp_ms - last) as f64;
            self.fps = 1000.0 / dt.max(Self::MIN_INTERVAL_MS);
        }
        self.last_ms = Some(timestamp_ms);
        Ok(self.fps)
    }
}

/// Totals reported when a replay finishes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub detected_frames: usize,
    pub quit_requested: bool,
}

/// Drives a session controller from a recorded stream
pub struct Replayer {
    session: SessionController,
    fps: FpsMeter,
}

impl Replayer {
    pub fn new(session: SessionController) -> Self {
        Self {
            session,
            fps: FpsMeter::new(),
        }
    }

    /// Run one recorded frame: tick, then apply any key pressed after it
    pub fn step(
        &mut self,
        record: &RecordedFrame,
    ) -> Result<(FrameFeedback, f64, SessionControl)> {
        let fps = self.fps.tick(record.timestamp_ms)?;
        let frame = record.landmark_frame()?;
        let feedback = self.session.tick(frame.as_ref());

        let control = match record.key.and_then(SessionInput::from_key_code) {
            Some(input) => self.session.handle_input(input),
            None => SessionControl::Continue,
        };

        Ok((feedback, fps, control))
    }

    /// Replay every line of `input`, writing one JSON object per frame to `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for (line_no, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: RecordedFrame = serde_json::from_str(&line)?;
            let (feedback, fps, control) = self.step(&record)?;

            summary.frames += 1;
            if feedback.body_detected {
                summary.detected_frames += 1;
            }

            let rendered =
                RenderedFrame::new(&feedback, record.timestamp_ms, fps, self.session.config());
            serde_json::to_writer(&mut output, &rendered)?;
            writeln!(output)?;

            if control == SessionControl::Quit {
                tracing::info!(frame = line_no + 1, "quit requested");
                summary.quit_requested = true;
                break;
            }
        }

        Ok(summary)
    }
}
