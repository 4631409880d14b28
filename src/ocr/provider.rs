//! OCR Providers
//!
//! Defines the provider trait and the Google Cloud Vision document text client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::types::{OcrError, TextAnnotation};

/// Document text detection provider
#[async_trait]
pub trait VisionProviderTrait: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Whether a credential is configured
    fn is_configured(&self) -> bool;

    /// Run dense document text detection on a base64-encoded image.
    ///
    /// `Ok(None)` means the provider found no text.
    async fn annotate(&self, image_base64: &str) -> Result<Option<TextAnnotation>, OcrError>;
}

/// Google Cloud Vision `images:annotate` client
pub struct GoogleVisionProvider {
    /// Endpoint URL (without the `key` query parameter)
    endpoint: String,
    api_key: Option<String>,
    language_hints: Vec<String>,
    client: reqwest::Client,
}

impl GoogleVisionProvider {
    pub const DEFAULT_ENDPOINT: &'static str = "https://vision.googleapis.com/v1/images:annotate";

    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        language_hints: Vec<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}, using defaults", e);
                reqwest::Client::new()
            });

        Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            language_hints,
            client,
        }
    }

    fn request_body(&self, image_base64: &str) -> serde_json::Value {
        serde_json::json!({
            "requests": [{
                "image": { "content": image_base64 },
                "features": [{ "type": "DOCUMENT_TEXT_DETECTION" }],
                "imageContext": { "languageHints": self.language_hints },
            }]
        })
    }
}

/// `images:annotate` response envelope
#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
    #[serde(default)]
    error: Option<ProviderStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    full_text_annotation: Option<TextAnnotation>,
    #[serde(default)]
    error: Option<ProviderStatus>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderStatus {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl VisionProviderTrait for GoogleVisionProvider {
    fn name(&self) -> &str {
        "google-vision"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn annotate(&self, image_base64: &str) -> Result<Option<TextAnnotation>, OcrError> {
        let api_key = self.api_key.as_deref().ok_or(OcrError::MissingCredential)?;

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&self.request_body(image_base64))
            .send()
            .await
            .map_err(|e| OcrError::Provider(format!("Failed to call Vision API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnnotateResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Vision API returned {}", status));
            return Err(OcrError::Provider(message));
        }

        let parsed: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| OcrError::Provider(format!("Failed to parse response: {}", e)))?;

        let Some(first) = parsed.responses.into_iter().next() else {
            return Ok(None);
        };
        if let Some(error) = first.error {
            return Err(OcrError::Provider(error.message));
        }

        Ok(first.full_text_annotation)
    }
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub response: Option<TextAnnotation>,
    pub error: Option<String>,
    pub configured: bool,
    pub calls: std::sync::atomic::AtomicUsize,
    pub last_image: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MockProvider {
    pub fn returning(response: Option<TextAnnotation>) -> Self {
        Self {
            response,
            error: None,
            configured: true,
            calls: Default::default(),
            last_image: Default::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::returning(None)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl VisionProviderTrait for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn annotate(&self, image_base64: &str) -> Result<Option<TextAnnotation>, OcrError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_image.lock().unwrap() = Some(image_base64.to_string());
        match &self.error {
            Some(message) => Err(OcrError::Provider(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}
