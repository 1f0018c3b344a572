use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Facial emotion labels reported by the detection backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Emotion {
    Happy,
    Neutral,
    Sad,
    Angry,
    Surprise,
    Fear,
    Disgust,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Neutral,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprise,
        Emotion::Fear,
        Emotion::Disgust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Neutral => "Neutral",
            Emotion::Sad => "Sad",
            Emotion::Angry => "Angry",
            Emotion::Surprise => "Surprise",
            Emotion::Fear => "Fear",
            Emotion::Disgust => "Disgust",
        }
    }

    /// Calm, composed expressions: the set every positive-ratio metric counts.
    pub fn is_positive(&self) -> bool {
        matches!(self, Emotion::Happy | Emotion::Neutral)
    }

    /// Expressions read as confusion or frustration.
    pub fn is_negative(&self) -> bool {
        matches!(self, Emotion::Angry | Emotion::Disgust | Emotion::Fear)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown emotion label: {0}")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEmotion(s.to_owned()))
    }
}

/// Face rectangle in source-frame pixels.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Distance between the top-left corners of two boxes.
    pub fn displacement(&self, other: &BoundingBox) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One face found in a frame. Extra backend fields are ignored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FaceDetection {
    pub emotion: Emotion,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for e in Emotion::ALL {
            assert_eq!(e.as_str().parse::<Emotion>(), Ok(e));
        }
        assert_eq!(
            "Excited".parse::<Emotion>(),
            Err(UnknownEmotion("Excited".to_owned()))
        );
    }

    #[test]
    fn positive_and_negative_sets_are_disjoint() {
        let positive: Vec<_> = Emotion::ALL.into_iter().filter(Emotion::is_positive).collect();
        let negative: Vec<_> = Emotion::ALL.into_iter().filter(Emotion::is_negative).collect();
        assert_eq!(positive, vec![Emotion::Happy, Emotion::Neutral]);
        assert_eq!(negative, vec![Emotion::Angry, Emotion::Fear, Emotion::Disgust]);
        assert!(!Emotion::Sad.is_positive() && !Emotion::Sad.is_negative());
        assert!(!Emotion::Surprise.is_positive() && !Emotion::Surprise.is_negative());
    }

    #[test]
    fn displacement_is_euclidean() {
        let a = BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let b = BoundingBox {
            x: 30.0,
            y: 40.0,
            width: 99.0,
            height: 1.0,
        };
        assert_eq!(a.displacement(&b), 50.0);
    }

    #[test]
    fn detection_ignores_extra_backend_fields() {
        let json = r##"{
            "bbox": {"x": 12, "y": 34, "width": 100, "height": 120},
            "emotion": "Surprise",
            "confidence": 0.71,
            "probabilities": {"Surprise": 0.71, "Happy": 0.2},
            "emoji": ":O",
            "color": "#FFD700"
        }"##;
        let det: FaceDetection = serde_json::from_str(json).expect("valid detection");
        assert_eq!(det.emotion, Emotion::Surprise);
        assert_eq!(det.bbox.x, 12.0);
        assert_eq!(det.bbox.height, 120.0);
    }

    #[test]
    fn unknown_label_fails_to_deserialize() {
        let json = r#"{"emotion":"Bored","confidence":0.5,"bbox":{"x":0,"y":0,"width":1,"height":1}}"#;
        assert!(serde_json::from_str::<FaceDetection>(json).is_err());
    }
}
