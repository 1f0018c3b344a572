//! Client side of the emotion detection backend.

mod http;
mod scripted;

use crate::emotion::FaceDetection;
use crate::util::is_http_retryable;
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub use http::HttpEmotionDetector;
pub use scripted::ScriptedDetector;

pub const DETECT_PATH: &str = "/api/detect";
pub const HEALTH_PATH: &str = "/api/health";

/// An encoded still image, as captured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    pub bytes: Bytes,
    pub mime: String,
}

impl CapturedImage {
    pub fn new(bytes: impl Into<Bytes>, mime: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime: mime.into(),
        }
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DetectRequest {
    pub image: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DetectResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<FaceDetection>,
    #[serde(default)]
    pub faces_detected: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectResponse {
    pub fn into_results(self) -> Result<Vec<FaceDetection>, DetectError> {
        if !self.success {
            return Err(DetectError::Rejected(
                self.error.unwrap_or_else(|| "unsuccessful response".to_owned()),
            ));
        }
        if self.faces_detected != self.results.len() {
            tracing::debug!(
                faces_detected = self.faces_detected,
                results = self.results.len(),
                "face count disagrees with results"
            );
        }
        Ok(self.results)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("http error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("http error {0}: {1}")]
    HttpStatus(u16, String),

    #[error("invalid detection response: {0}")]
    InvalidResponse(String),

    #[error("detection rejected: {0}")]
    Rejected(String),
}

impl DetectError {
    pub fn is_retryable(&self) -> bool {
        match self {
            DetectError::Network(e) => !e.is_decode() && !e.is_builder(),
            DetectError::HttpStatus(status, _) => is_http_retryable(*status),
            DetectError::InvalidResponse(_) | DetectError::Rejected(_) => false,
        }
    }
}

pub trait EmotionDetector: Send + Sync {
    /// Faces found in one image; an empty list means no face.
    fn detect(&self, image: CapturedImage) -> BoxFuture<'_, Result<Vec<FaceDetection>, DetectError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;

    #[test]
    fn data_url_is_base64_encoded() {
        let image = CapturedImage::new(vec![0xffu8, 0xd8, 0xff], "image/jpeg");
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn parses_backend_response() {
        let json = r#"{
            "success": true,
            "faces_detected": 1,
            "results": [{
                "bbox": {"x": 210, "y": 96, "width": 188, "height": 188},
                "emotion": "Happy",
                "confidence": 0.97,
                "probabilities": {"Happy": 0.97},
                "facial_analysis": {"engagement": 0.8}
            }],
            "facial_analysis": {"engagement": 0.8}
        }"#;
        let response: DetectResponse = serde_json::from_str(json).expect("valid response");
        let faces = response.into_results().expect("success");
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].emotion, Emotion::Happy);
    }

    #[test]
    fn no_face_is_empty_success() {
        let response: DetectResponse =
            serde_json::from_str(r#"{"success": true, "faces_detected": 0, "results": []}"#)
                .expect("valid response");
        assert_eq!(response.into_results().expect("success"), Vec::new());
    }

    #[test]
    fn error_body_is_rejected() {
        let response: DetectResponse =
            serde_json::from_str(r#"{"error": "Invalid image data"}"#).expect("valid response");
        match response.into_results() {
            Err(DetectError::Rejected(msg)) => assert_eq!(msg, "Invalid image data"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn only_transient_statuses_retry() {
        assert!(DetectError::HttpStatus(503, String::new()).is_retryable());
        assert!(!DetectError::HttpStatus(400, String::new()).is_retryable());
        assert!(!DetectError::Rejected("no".to_owned()).is_retryable());
    }
}
