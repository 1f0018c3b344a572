mod store;

use crate::emotion::{BoundingBox, Emotion, FaceDetection};
use serde::{Deserialize, Serialize};

pub use store::{load_session, save_session, SessionError};

/// Frames needed before a live session offers feedback.
pub const MIN_FRAMES_FOR_FEEDBACK: usize = 10;

/// One sampled webcam frame and whatever the detector found in it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionFrame {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub results: Vec<FaceDetection>,
}

impl SessionFrame {
    pub fn has_face(&self) -> bool {
        !self.results.is_empty()
    }
}

/// A frame reduced to its first detected face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmotionSample {
    pub emotion: Emotion,
    pub confidence: f64,
    pub timestamp: i64,
    pub bbox: BoundingBox,
}

/// Face-present frames only, first detection per frame, input order kept.
pub fn samples(frames: &[SessionFrame]) -> Vec<EmotionSample> {
    frames
        .iter()
        .filter_map(|frame| {
            frame.results.first().map(|det| EmotionSample {
                emotion: det.emotion,
                confidence: det.confidence,
                timestamp: frame.timestamp,
                bbox: det.bbox,
            })
        })
        .collect()
}

/// Wall-clock span of the raw frame list in seconds.
pub fn session_duration_secs(frames: &[SessionFrame]) -> f64 {
    match (frames.first(), frames.last()) {
        (Some(first), Some(last)) => (last.timestamp - first.timestamp) as f64 / 1000.0,
        _ => 0.0,
    }
}

/// Growing history of a live practice session.
#[derive(Clone, Debug, Default)]
pub struct SessionRecorder {
    frames: Vec<SessionFrame>,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, timestamp: i64, results: Vec<FaceDetection>) {
        if let Some(last) = self.frames.last() {
            if timestamp < last.timestamp {
                tracing::warn!(
                    timestamp,
                    previous = last.timestamp,
                    "frame recorded out of order"
                );
            }
        }
        self.frames.push(SessionFrame { timestamp, results });
    }

    pub fn record_now(&mut self, results: Vec<FaceDetection>) {
        self.record(chrono::Utc::now().timestamp_millis(), results);
    }

    pub fn frames(&self) -> &[SessionFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames where at least one face was found.
    pub fn detected_count(&self) -> usize {
        self.frames.iter().filter(|f| f.has_face()).count()
    }

    pub fn has_enough_frames(&self) -> bool {
        self.frames.len() > MIN_FRAMES_FOR_FEEDBACK
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn into_frames(self) -> Vec<SessionFrame> {
        self.frames
    }
}
