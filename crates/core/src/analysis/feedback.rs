//! Canned feedback sentences, one per score band per metric.

use crate::analysis::metrics::{emotion_changes, positive_ratio, ratio};
use crate::emotion::Emotion;
use crate::session::EmotionSample;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreBand::Excellent
        } else if score >= 60 {
            ScoreBand::Good
        } else if score >= 40 {
            ScoreBand::Fair
        } else {
            ScoreBand::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// `{minutes}m {seconds}s`, both floored.
pub fn format_duration(secs: f64) -> String {
    let minutes = (secs / 60.0).floor() as i64;
    let seconds = (secs % 60.0).floor() as i64;
    format!("{minutes}m {seconds}s")
}

/// Fixed-point text with exact ties rounded up (`6.25` -> `"6.3"`).
pub(crate) fn to_fixed(value: f64, decimals: u32) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.prec$}", prec = decimals as usize)
}

fn percent(value: f64) -> String {
    to_fixed(value * 100.0, 0)
}

pub fn confidence(score: u8, samples: &[EmotionSample]) -> String {
    let positive = percent(positive_ratio(samples));
    match ScoreBand::from_score(score) {
        ScoreBand::Excellent => format!(
            "Excellent! You maintained positive body language {positive}% of the time. Your confident demeanor came through clearly."
        ),
        ScoreBand::Good => format!(
            "Good confidence overall. You showed positive emotions {positive}% of the time. Try to maintain more consistent positive body language."
        ),
        ScoreBand::Fair => "Your confidence could improve. Focus on maintaining a calm, positive expression even when thinking or pausing.".to_owned(),
        ScoreBand::NeedsImprovement => "Work on projecting more confidence. Practice maintaining a neutral or slightly positive expression to appear more self-assured.".to_owned(),
    }
}

pub fn eye_contact(score: u8) -> String {
    match ScoreBand::from_score(score) {
        ScoreBand::Excellent => "Excellent eye contact! You maintained steady focus on the camera, demonstrating strong engagement.",
        ScoreBand::Good => "Good eye contact overall. Try to reduce head movements and maintain a more consistent gaze at the camera.",
        ScoreBand::Fair => "Your eye contact needs improvement. Practice looking directly at the camera and minimizing head movements.",
        ScoreBand::NeedsImprovement => "Work on maintaining eye contact. Keep your head steady and look directly at the camera to show engagement.",
    }
    .to_owned()
}

pub fn communication(score: u8, samples: &[EmotionSample]) -> String {
    match ScoreBand::from_score(score) {
        ScoreBand::Excellent => "Excellent communication clarity! Your expressions suggest clear, articulate delivery throughout the session.".to_owned(),
        ScoreBand::Good => {
            let neutral = percent(ratio(samples, |e| e == Emotion::Neutral));
            format!(
                "Good communication skills. Maintain composed, neutral expressions ({neutral}% achieved) for clearer delivery."
            )
        }
        ScoreBand::Fair => "Communication could be clearer. Avoid showing confusion or frustration - maintain a calm, confident expression.".to_owned(),
        ScoreBand::NeedsImprovement => "Focus on clear communication. Practice delivering your message with a calm, neutral expression to appear more articulate.".to_owned(),
    }
}

pub fn composure(score: u8, samples: &[EmotionSample]) -> String {
    let changes = emotion_changes(samples);
    match ScoreBand::from_score(score) {
        ScoreBand::Excellent => "Excellent composure! You maintained a calm, steady demeanor throughout with minimal emotional fluctuation.".to_owned(),
        ScoreBand::Good => format!(
            "Good composure overall. You had {changes} emotional shifts - try to maintain even more consistency."
        ),
        ScoreBand::Fair => format!(
            "Your composure could improve. Practice staying calm and avoiding visible emotional reactions ({changes} changes detected)."
        ),
        ScoreBand::NeedsImprovement => "Work on maintaining composure. Reduce emotional fluctuations and practice staying calm under pressure.".to_owned(),
    }
}

pub fn presence(score: u8, samples: &[EmotionSample]) -> String {
    match ScoreBand::from_score(score) {
        ScoreBand::Excellent => format!(
            "Excellent professional presence! You projected confidence and professionalism {}% of the time.",
            percent(positive_ratio(samples))
        ),
        ScoreBand::Good => "Good professional demeanor. Maintain positive expressions more consistently to strengthen your presence.".to_owned(),
        ScoreBand::Fair => "Your professional presence needs work. Focus on projecting confidence and maintaining a professional demeanor.".to_owned(),
        ScoreBand::NeedsImprovement => "Work on your professional presence. Practice maintaining confident, neutral expressions throughout.".to_owned(),
    }
}

pub fn timing(score: u8) -> String {
    match ScoreBand::from_score(score) {
        ScoreBand::Excellent => "Excellent pacing! Your emotional expressions showed good rhythm and natural timing throughout.",
        ScoreBand::Good => "Good pacing overall. Work on maintaining more consistent timing in your responses and expressions.",
        ScoreBand::Fair => "Your pacing needs improvement. Practice maintaining steady rhythm and avoiding rushed or prolonged expressions.",
        ScoreBand::NeedsImprovement => "Focus on improving your timing. Maintain consistent pacing and rhythm in your delivery.",
    }
    .to_owned()
}

pub fn readiness(score: u8, duration_secs: f64) -> String {
    match ScoreBand::from_score(score) {
        ScoreBand::Excellent => format!(
            "You're well-prepared! Strong confidence and composure for {} demonstrates excellent readiness.",
            format_duration(duration_secs)
        ),
        ScoreBand::Good => "Good preparation level. Continue practicing to build more confidence and maintain it for longer periods.".to_owned(),
        ScoreBand::Fair => "More preparation needed. Practice maintaining confidence and positive demeanor for extended periods.".to_owned(),
        ScoreBand::NeedsImprovement => "Significant preparation required. Spend more time practicing to build confidence and interview readiness.".to_owned(),
    }
}
