use crate::detect::{CapturedImage, DetectError, EmotionDetector};
use crate::emotion::FaceDetection;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Replays canned detections in order, wrapping around at the end.
///
/// A `None` entry answers with a rejected request.
#[derive(Clone, Debug)]
pub struct ScriptedDetector {
    script: Arc<Vec<Option<Vec<FaceDetection>>>>,
    next: Arc<AtomicUsize>,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Option<Vec<FaceDetection>>>) -> Self {
        Self {
            script: Arc::new(script),
            next: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl EmotionDetector for ScriptedDetector {
    fn detect(&self, _image: CapturedImage) -> BoxFuture<'_, Result<Vec<FaceDetection>, DetectError>> {
        async move {
            if self.script.is_empty() {
                return Ok(Vec::new());
            }
            let i = self.next.fetch_add(1, Ordering::SeqCst) % self.script.len();
            self.script[i]
                .clone()
                .ok_or_else(|| DetectError::Rejected("scripted failure".to_owned()))
        }
        .boxed()
    }
}
