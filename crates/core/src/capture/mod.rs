//! Timed capture loop that feeds stills to a detector and records the session.

mod image_dir;

use crate::config::CaptureInterval;
use crate::detect::{CapturedImage, EmotionDetector};
use crate::session::SessionRecorder;
use futures::future::BoxFuture;
use tokio::time::{interval, MissedTickBehavior};

pub use image_dir::ImageDirSource;

#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("capture i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("no images found in {0}")]
    NoImages(String),
}

/// Source of camera stills. `None` means the source is exhausted.
pub trait FrameSource: Send {
    fn next_image(&mut self) -> BoxFuture<'_, Result<Option<CapturedImage>, CaptureError>>;
}

#[derive(Clone, Debug, Default)]
pub struct CaptureConfig {
    pub interval: CaptureInterval,
    /// Stop after this many recorded frames.
    pub max_frames: Option<usize>,
}

/// Captures one still per tick until the source runs dry or `max_frames`
/// frames are recorded.
///
/// Frames whose detection request fails are skipped rather than recorded
/// as faceless, so they do not lower the detection rate.
pub async fn record_session<S, D>(
    source: &mut S,
    detector: &D,
    config: &CaptureConfig,
) -> Result<SessionRecorder, CaptureError>
where
    S: FrameSource + ?Sized,
    D: EmotionDetector + ?Sized,
{
    let mut recorder = SessionRecorder::new();
    let mut ticker = interval(config.interval.duration());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut skipped = 0usize;

    loop {
        if config.max_frames.is_some_and(|max| recorder.len() >= max) {
            break;
        }
        ticker.tick().await;

        let Some(image) = source.next_image().await? else {
            break;
        };

        match detector.detect(image).await {
            Ok(results) => {
                tracing::debug!(
                    frame = recorder.len(),
                    faces = results.len(),
                    "frame recorded"
                );
                recorder.record_now(results);
            }
            Err(e) => {
                skipped += 1;
                tracing::warn!(error = %e, "detection failed, frame skipped");
            }
        }
    }

    tracing::info!(
        frames = recorder.len(),
        with_face = recorder.detected_count(),
        skipped,
        "capture finished"
    );
    Ok(recorder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::detect::ScriptedDetector;
    use crate::emotion::{BoundingBox, Emotion, FaceDetection};
    use futures::FutureExt;

    struct CountingSource {
        remaining: usize,
    }

    impl FrameSource for CountingSource {
        fn next_image(&mut self) -> BoxFuture<'_, Result<Option<CapturedImage>, CaptureError>> {
            async move {
                if self.remaining == 0 {
                    return Ok(None);
                }
                self.remaining -= 1;
                Ok(Some(CapturedImage::new(vec![0u8; 4], "image/png")))
            }
            .boxed()
        }
    }

    fn fast() -> CaptureConfig {
        CaptureConfig {
            interval: CaptureInterval::new(1).expect("nonzero"),
            max_frames: None,
        }
    }

    fn neutral() -> Vec<FaceDetection> {
        vec![FaceDetection {
            emotion: Emotion::Neutral,
            confidence: 0.9,
            bbox: BoundingBox::default(),
        }]
    }

    #[tokio::test]
    async fn records_until_source_is_exhausted() {
        let detector = ScriptedDetector::new(vec![Some(neutral()), Some(Vec::new())]);
        let mut source = CountingSource { remaining: 6 };

        let recorder = record_session(&mut source, &detector, &fast())
            .await
            .expect("recorded");
        assert_eq!(recorder.len(), 6);
        assert_eq!(recorder.detected_count(), 3);

        let report = analyze(recorder.frames()).expect("report");
        assert_eq!(report.total_frames, 3);
    }

    #[tokio::test]
    async fn failed_detections_are_not_recorded() {
        let detector = ScriptedDetector::new(vec![Some(neutral()), None, None]);
        let mut source = CountingSource { remaining: 6 };

        let recorder = record_session(&mut source, &detector, &fast())
            .await
            .expect("recorded");
        assert_eq!(detector.calls(), 6);
        assert_eq!(recorder.len(), 2);
    }

    #[tokio::test]
    async fn stops_at_max_frames() {
        let detector = ScriptedDetector::new(vec![Some(neutral())]);
        let mut source = CountingSource { remaining: 100 };
        let config = CaptureConfig {
            max_frames: Some(4),
            ..fast()
        };

        let recorder = record_session(&mut source, &detector, &config)
            .await
            .expect("recorded");
        assert_eq!(recorder.len(), 4);
        assert_eq!(source.remaining, 96);
    }
}
