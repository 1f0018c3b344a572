//! Presentation helpers and the plain-text report export.

use crate::analysis::{format_duration, Metrics, ScoreBand, SessionReport};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Scores at or above this count as strengths.
pub const STRENGTH_THRESHOLD: u8 = 70;

/// Length of the on-screen focus-area list.
pub const MAX_FOCUS_AREAS: usize = 3;

const BANNER_RULE: &str = "═══════════════════════════════════════════════════════════";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Confidence,
    EyeContact,
    Communication,
    Composure,
    Presence,
    Timing,
    Readiness,
}

impl MetricKind {
    /// Display order.
    pub const ALL: [MetricKind; 7] = [
        MetricKind::Confidence,
        MetricKind::EyeContact,
        MetricKind::Communication,
        MetricKind::Composure,
        MetricKind::Presence,
        MetricKind::Timing,
        MetricKind::Readiness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Confidence => "Confidence",
            MetricKind::EyeContact => "Eye Contact",
            MetricKind::Communication => "Communication",
            MetricKind::Composure => "Composure",
            MetricKind::Presence => "Presence",
            MetricKind::Timing => "Timing",
            MetricKind::Readiness => "Readiness",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MetricKind::Confidence => "Maintain positive body language",
            MetricKind::EyeContact => "Practice proper engagement",
            MetricKind::Communication => "Clear and effective speech",
            MetricKind::Composure => "Stay calm under pressure",
            MetricKind::Presence => "Professional demeanor",
            MetricKind::Timing => "Pacing and rhythm",
            MetricKind::Readiness => "Interview preparedness",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricEntry<'a> {
    pub kind: MetricKind,
    pub score: u8,
    pub feedback: &'a str,
}

impl MetricEntry<'_> {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

impl Metrics {
    pub fn score(&self, kind: MetricKind) -> u8 {
        match kind {
            MetricKind::Confidence => self.confidence,
            MetricKind::EyeContact => self.eye_contact,
            MetricKind::Communication => self.communication,
            MetricKind::Composure => self.composure,
            MetricKind::Presence => self.presence,
            MetricKind::Timing => self.timing,
            MetricKind::Readiness => self.readiness,
        }
    }

    pub fn feedback(&self, kind: MetricKind) -> &str {
        match kind {
            MetricKind::Confidence => &self.confidence_feedback,
            MetricKind::EyeContact => &self.eye_contact_feedback,
            MetricKind::Communication => &self.communication_feedback,
            MetricKind::Composure => &self.composure_feedback,
            MetricKind::Presence => &self.presence_feedback,
            MetricKind::Timing => &self.timing_feedback,
            MetricKind::Readiness => &self.readiness_feedback,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = MetricEntry<'_>> {
        MetricKind::ALL.into_iter().map(move |kind| MetricEntry {
            kind,
            score: self.score(kind),
            feedback: self.feedback(kind),
        })
    }
}

/// Rounded mean of the seven scores.
pub fn overall_score(metrics: &Metrics) -> u8 {
    let sum: u32 = metrics.entries().map(|e| u32::from(e.score)).sum();
    (f64::from(sum) / MetricKind::ALL.len() as f64).round() as u8
}

pub fn strengths(metrics: &Metrics) -> Vec<MetricEntry<'_>> {
    metrics
        .entries()
        .filter(|e| e.score >= STRENGTH_THRESHOLD)
        .collect()
}

/// Weakest metrics first, capped at `MAX_FOCUS_AREAS`.
pub fn focus_areas(metrics: &Metrics) -> Vec<MetricEntry<'_>> {
    let mut below: Vec<_> = metrics
        .entries()
        .filter(|e| e.score < STRENGTH_THRESHOLD)
        .collect();
    below.sort_by_key(|e| e.score);
    below.truncate(MAX_FOCUS_AREAS);
    below
}

pub fn report_file_name(generated_at: DateTime<Local>) -> String {
    format!("feedback-report-{}.txt", generated_at.timestamp_millis())
}

/// Renders the downloadable text report.
///
/// The summary lists every metric below the strength threshold, not just
/// the capped focus areas.
pub fn render_text(report: &SessionReport, generated_at: DateTime<Local>) -> String {
    let metrics = &report.metrics;
    let mut out = String::new();

    out.push_str(&format!(
        "
╔════════════════════════════════════════════════════════════╗
║        SESSION FEEDBACK COMPREHENSIVE REPORT               ║
╚════════════════════════════════════════════════════════════╝

Generated: {}
Session Duration: {}
Frames Analyzed: {}

OVERALL SCORE: {}/100

{BANNER_RULE}

DETAILED ANALYSIS
{BANNER_RULE}

",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        format_duration(report.duration),
        report.total_frames,
        overall_score(metrics),
    ));

    for entry in metrics.entries() {
        out.push_str(&format!(
            "
{} - {}/100
{}
{}

Feedback: {}

",
            entry.kind.label().to_uppercase(),
            entry.score,
            "-".repeat(60),
            entry.kind.description(),
            entry.feedback,
        ));
    }

    out.push_str(&format!(
        "\n{BANNER_RULE}\n\nSUMMARY\n{BANNER_RULE}\n\nSTRENGTHS:\n"
    ));
    for entry in strengths(metrics) {
        out.push_str(&format!(
            "  ✓ {} ({}/100)\n",
            entry.kind.label(),
            entry.score
        ));
    }

    out.push_str("\nFOCUS AREAS:\n");
    for entry in metrics.entries().filter(|e| e.score < STRENGTH_THRESHOLD) {
        out.push_str(&format!(
            "  → {} ({}/100)\n",
            entry.kind.label(),
            entry.score
        ));
    }

    out.push_str(&format!(
        "\n{BANNER_RULE}\n\nThank you for practicing!\n\n{BANNER_RULE}\n"
    ));
    out
}
