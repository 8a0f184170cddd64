// SPDX-FileCopyrightText: 2026 Parkwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the hosted object-detection model.
//!
//! The image goes up as a multipart form (field `file`) to
//! `<api_url>/<model_id>?api_key=<key>`; the response's `predictions`
//! array comes back as [`Detection`]s.

use std::time::Duration;

use async_trait::async_trait;
use parkwatch_config::model::DetectionConfig;
use parkwatch_core::{Detection, DetectionAdapter, ImageUpload, ParkwatchError};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::types::DetectionResponse;

#[derive(Debug, Clone)]
pub struct DetectionClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    timeout: Duration,
}

impl DetectionClient {
    pub fn new(config: &DetectionConfig) -> Result<Self, ParkwatchError> {
        let base = format!(
            "{}/{}",
            config.api_url.trim_end_matches('/'),
            config.model_id.trim_matches('/')
        );
        let endpoint = match config.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => reqwest::Url::parse_with_params(&base, [("api_key", key)]),
            None => reqwest::Url::parse(&base),
        }
        .map_err(|e| ParkwatchError::Config(format!("invalid detection endpoint `{base}`: {e}")))?;

        if config.api_key.is_none() {
            debug!("no detection.api_key configured, calling endpoint without one");
        }

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParkwatchError::Detection {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    fn request_failed(&self, e: reqwest::Error) -> ParkwatchError {
        if e.is_timeout() {
            return ParkwatchError::Timeout {
                duration: self.timeout,
            };
        }
        ParkwatchError::Detection {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

#[async_trait]
impl DetectionAdapter for DetectionClient {
    fn name(&self) -> &str {
        "roboflow"
    }

    async fn detect(&self, image: &ImageUpload) -> Result<Vec<Detection>, ParkwatchError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|e| self.request_failed(e))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.request_failed(e))?;

        let status = response.status();
        debug!(status = %status, file = %image.file_name, "detection response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ParkwatchError::detection(format!(
                "detection endpoint returned {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(|e| self.request_failed(e))?;
        let parsed: DetectionResponse =
            serde_json::from_str(&body).map_err(|e| ParkwatchError::Detection {
                message: format!("failed to parse detection response: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!(
            file = %image.file_name,
            detections = parsed.predictions.len(),
            "detection complete"
        );
        Ok(parsed.predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(url: &str, key: Option<&str>) -> DetectionConfig {
        DetectionConfig {
            api_url: url.to_string(),
            model_id: "lot-model/2".to_string(),
            api_key: key.map(str::to_string),
            request_timeout_secs: 5,
        }
    }

    fn image() -> ImageUpload {
        ImageUpload::new("lot.jpg", vec![0xFF, 0xD8, 0xFF])
    }

    #[tokio::test]
    async fn uploads_file_field_and_parses_predictions() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "time": 0.12,
            "image": {"width": 640, "height": 480},
            "predictions": [
                {"x": 10, "y": 20, "width": 30, "height": 40, "class": "empty", "confidence": 0.91, "detection_id": "a"},
                {"x": 50, "y": 20, "width": 30, "height": 40, "class": "occupied", "confidence": 0.42, "detection_id": "b"}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/lot-model/2"))
            .and(query_param("api_key", "secret"))
            .and(body_string_contains("name=\"file\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let client = DetectionClient::new(&config(&server.uri(), Some("secret"))).unwrap();
        let detections = client.detect(&image()).await.unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[1].class.as_deref(), Some("occupied"));
        assert_eq!(detections[0].detection_id.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn missing_predictions_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = DetectionClient::new(&config(&server.uri(), None)).unwrap();
        assert!(client.detect(&image()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_status_is_detection_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
            .mount(&server)
            .await;

        let client = DetectionClient::new(&config(&server.uri(), Some("nope"))).unwrap();
        let err = client.detect(&image()).await.unwrap_err();
        assert!(matches!(err, ParkwatchError::Detection { .. }));
        assert!(err.to_string().contains("403"), "got: {err}");
    }

    #[tokio::test]
    async fn malformed_body_is_detection_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = DetectionClient::new(&config(&server.uri(), None)).unwrap();
        let err = client.detect(&image()).await.unwrap_err();
        assert!(err.to_string().contains("parse"), "got: {err}");
    }

    #[tokio::test]
    async fn slow_endpoint_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let mut config = config(&server.uri(), None);
        config.request_timeout_secs = 1;
        let client = DetectionClient::new(&config).unwrap();
        let err = client.detect(&image()).await.unwrap_err();
        assert!(
            matches!(err, ParkwatchError::Timeout { duration } if duration == Duration::from_secs(1)),
            "got: {err}"
        );
    }

    #[test]
    fn invalid_url_is_config_error() {
        let err = DetectionClient::new(&config("not a url", None)).unwrap_err();
        assert!(matches!(err, ParkwatchError::Config(_)));
    }
}
