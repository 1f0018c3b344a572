//! Session feedback analysis.
//!
//! Turns the frame history of a practice session into seven 0-100
//! presentation scores with feedback sentences and an emotion breakdown.
//! The analysis is a pure function of its input.

mod distribution;
pub mod feedback;
pub mod metrics;

use crate::session::{samples, session_duration_secs, SessionFrame};
use serde::{Deserialize, Serialize};

pub use distribution::{emotion_distribution, EmotionShare};
pub use feedback::{format_duration, ScoreBand};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub confidence: u8,
    pub confidence_feedback: String,
    pub eye_contact: u8,
    pub eye_contact_feedback: String,
    pub communication: u8,
    pub communication_feedback: String,
    pub composure: u8,
    pub composure_feedback: String,
    pub presence: u8,
    pub presence_feedback: String,
    pub timing: u8,
    pub timing_feedback: String,
    pub readiness: u8,
    pub readiness_feedback: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub metrics: Metrics,
    /// Seconds between the first and last recorded frame.
    pub duration: f64,
    /// Frames with a detected face.
    pub total_frames: usize,
    pub emotion_distribution: Vec<EmotionShare>,
}

/// Scores a recorded session.
///
/// Returns `None` when there is nothing to score: no frames at all, or no
/// frame with a detected face. Callers should ask for a longer or clearer
/// session in that case.
pub fn analyze(frames: &[SessionFrame]) -> Option<SessionReport> {
    if frames.is_empty() {
        tracing::debug!("no frames to analyze");
        return None;
    }

    let duration = session_duration_secs(frames);
    let samples = samples(frames);
    if samples.is_empty() {
        tracing::debug!(frames = frames.len(), "no face detected in any frame");
        return None;
    }

    let confidence = metrics::confidence(&samples);
    let eye_contact = metrics::eye_contact(&samples, frames.len());
    let communication = metrics::communication(&samples);
    let composure = metrics::composure(&samples);
    let presence = metrics::presence(&samples);
    let timing = metrics::timing(&samples);
    let readiness = metrics::readiness(&samples, duration);

    tracing::debug!(
        frames = frames.len(),
        samples = samples.len(),
        duration,
        confidence,
        eye_contact,
        communication,
        composure,
        presence,
        timing,
        readiness,
        "session analyzed"
    );

    Some(SessionReport {
        metrics: Metrics {
            confidence,
            confidence_feedback: feedback::confidence(confidence, &samples),
            eye_contact,
            eye_contact_feedback: feedback::eye_contact(eye_contact),
            communication,
            communication_feedback: feedback::communication(communication, &samples),
            composure,
            composure_feedback: feedback::composure(composure, &samples),
            presence,
            presence_feedback: feedback::presence(presence, &samples),
            timing,
            timing_feedback: feedback::timing(timing),
            readiness,
            readiness_feedback: feedback::readiness(readiness, duration),
        },
        duration,
        total_frames: samples.len(),
        emotion_distribution: emotion_distribution(&samples),
    })
}
