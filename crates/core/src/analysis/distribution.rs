use crate::analysis::feedback::to_fixed;
use crate::emotion::Emotion;
use crate::session::EmotionSample;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmotionShare {
    pub emotion: Emotion,
    pub count: usize,
    /// Share of usable samples, one decimal place.
    pub percentage: String,
}

/// Tally per emotion in order of first appearance.
pub fn emotion_distribution(samples: &[EmotionSample]) -> Vec<EmotionShare> {
    let mut counts: Vec<(Emotion, usize)> = Vec::new();
    for sample in samples {
        match counts.iter_mut().find(|(e, _)| *e == sample.emotion) {
            Some((_, count)) => *count += 1,
            None => counts.push((sample.emotion, 1)),
        }
    }

    let total = samples.len() as f64;
    counts
        .into_iter()
        .map(|(emotion, count)| EmotionShare {
            emotion,
            count,
            percentage: to_fixed(count as f64 / total * 100.0, 1),
        })
        .collect()
}
