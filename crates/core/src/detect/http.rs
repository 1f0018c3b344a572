use crate::config::DetectorConfig;
use crate::detect::{
    CapturedImage, DetectError, DetectRequest, DetectResponse, EmotionDetector, DETECT_PATH,
    HEALTH_PATH,
};
use crate::emotion::FaceDetection;
use crate::util::retry_with_backoff;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;

#[derive(Clone)]
pub struct HttpEmotionDetector {
    client: Client,
    config: DetectorConfig,
}

impl HttpEmotionDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, DetectError> {
        let client = Client::builder()
            .timeout(config.timeout.duration())
            .build()?;
        Ok(Self { client, config })
    }

    /// Checks that the backend is up before a session starts.
    pub async fn health(&self) -> Result<(), DetectError> {
        let url = self.config.api_url.endpoint(HEALTH_PATH);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DetectError::HttpStatus(status.as_u16(), body));
        }
        tracing::debug!(%url, "detection backend healthy");
        Ok(())
    }

    async fn post_detect(&self, request: &DetectRequest) -> Result<DetectResponse, DetectError> {
        let url = self.config.api_url.endpoint(DETECT_PATH);
        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            tracing::debug!(%url, status = status.as_u16(), "detect request failed");
            return Err(DetectError::HttpStatus(status.as_u16(), body));
        }

        response
            .json::<DetectResponse>()
            .await
            .map_err(|e| DetectError::InvalidResponse(e.to_string()))
    }
}

impl EmotionDetector for HttpEmotionDetector {
    fn detect(&self, image: CapturedImage) -> BoxFuture<'_, Result<Vec<FaceDetection>, DetectError>> {
        async move {
            let request = DetectRequest {
                image: image.to_data_url(),
            };
            let response = retry_with_backoff(
                &self.config.retry,
                || self.post_detect(&request),
                DetectError::is_retryable,
            )
            .await?;
            response.into_results()
        }
        .boxed()
    }
}
