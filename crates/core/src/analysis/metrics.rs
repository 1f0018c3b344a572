//! Score formulas for the seven presentation metrics.
//!
//! Every function expects a non-empty sample slice; `analyze` checks that
//! before any of them run.

use crate::emotion::Emotion;
use crate::session::EmotionSample;

/// Head movement between consecutive samples that still counts as steady.
pub const STABILITY_THRESHOLD_PX: f64 = 50.0;

/// Session length at which the readiness duration bonus is saturated.
pub const FULL_PRACTICE_SECS: f64 = 60.0;

pub(crate) fn to_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}

pub(crate) fn ratio(samples: &[EmotionSample], pred: impl Fn(Emotion) -> bool) -> f64 {
    let hits = samples.iter().filter(|s| pred(s.emotion)).count();
    hits as f64 / samples.len() as f64
}

pub(crate) fn positive_ratio(samples: &[EmotionSample]) -> f64 {
    ratio(samples, |e| e.is_positive())
}

pub(crate) fn mean_confidence(samples: &[EmotionSample]) -> f64 {
    samples.iter().map(|s| s.confidence).sum::<f64>() / samples.len() as f64
}

/// Number of adjacent sample pairs whose emotion differs.
pub(crate) fn emotion_changes(samples: &[EmotionSample]) -> usize {
    samples
        .windows(2)
        .filter(|w| w[0].emotion != w[1].emotion)
        .count()
}

/// Mean of per-sample steadiness: 1 for the first sample and for small
/// moves, 0.5 for moves of at least `STABILITY_THRESHOLD_PX`.
pub(crate) fn mean_stability(samples: &[EmotionSample]) -> f64 {
    let moved: f64 = samples
        .windows(2)
        .map(|w| {
            if w[1].bbox.displacement(&w[0].bbox) < STABILITY_THRESHOLD_PX {
                1.0
            } else {
                0.5
            }
        })
        .sum();
    (1.0 + moved) / samples.len() as f64
}

/// Per-emotion sum of run lengths, in first-recorded order.
///
/// A run is closed when the emotion changes or the last index is reached,
/// and is credited with `i - start`. The final sample therefore never
/// counts toward its own run, and a lone sample produces a single zero.
pub(crate) fn run_totals(samples: &[EmotionSample]) -> Vec<(Emotion, usize)> {
    let mut totals: Vec<(Emotion, usize)> = Vec::new();
    let Some(first) = samples.first() else {
        return totals;
    };

    let last = samples.len() - 1;
    let mut current = first.emotion;
    let mut start = 0;

    for (i, sample) in samples.iter().enumerate() {
        if sample.emotion != current || i == last {
            let len = i - start;
            match totals.iter_mut().find(|(e, _)| *e == current) {
                Some((_, total)) => *total += len,
                None => totals.push((current, len)),
            }
            current = sample.emotion;
            start = i;
        }
    }
    totals
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

pub fn confidence(samples: &[EmotionSample]) -> u8 {
    let score = (positive_ratio(samples) * 0.6 + mean_confidence(samples) * 0.4) * 100.0;
    to_score(score)
}

/// Head steadiness blended with the share of raw frames that had a face.
pub fn eye_contact(samples: &[EmotionSample], raw_frames: usize) -> u8 {
    let detection_rate = samples.len() as f64 / raw_frames.max(1) as f64;
    let score = (mean_stability(samples) * 0.5 + detection_rate * 0.5) * 100.0;
    to_score(score)
}

pub fn communication(samples: &[EmotionSample]) -> u8 {
    let clarity = positive_ratio(samples);
    let penalty = ratio(samples, |e| e.is_negative());
    to_score((clarity - penalty * 0.5) * 100.0)
}

pub fn composure(samples: &[EmotionSample]) -> u8 {
    let change_rate = emotion_changes(samples) as f64 / samples.len() as f64;
    let score = ((1.0 - change_rate) * 0.4 + positive_ratio(samples) * 0.6) * 100.0;
    to_score(score)
}

pub fn presence(samples: &[EmotionSample]) -> u8 {
    let score = (positive_ratio(samples) * 0.6 + mean_confidence(samples) * 0.4) * 100.0;
    to_score(score)
}

/// Penalises uneven time spent across emotions, measured in sample ticks.
pub fn timing(samples: &[EmotionSample]) -> u8 {
    let totals: Vec<f64> = run_totals(samples)
        .into_iter()
        .map(|(_, len)| len as f64)
        .collect();
    let normalized = population_std_dev(&totals) / samples.len() as f64;
    to_score((1.0 - (normalized * 5.0).min(1.0)) * 100.0)
}

pub fn readiness(samples: &[EmotionSample], duration_secs: f64) -> u8 {
    let duration_bonus = (duration_secs / FULL_PRACTICE_SECS).min(1.0);
    let score = (positive_ratio(samples) * 0.4
        + mean_confidence(samples) * 0.4
        + duration_bonus * 0.2)
        * 100.0;
    to_score(score)
}
