//! Application state management

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::ocr::{GoogleVisionProvider, OcrService, VisionProviderTrait};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    ocr: OcrService,
}

impl AppState {
    /// Create application state backed by Google Cloud Vision
    pub fn new(config: Config) -> Self {
        let provider = GoogleVisionProvider::new(
            &config.vision.endpoint,
            config.vision.api_key.clone(),
            config.vision.language_hints.clone(),
            Duration::from_secs(config.vision.timeout_secs),
        );
        if !provider.is_configured() {
            tracing::warn!("GOOGLE_VISION_API_KEY is not set; OCR requests will fail");
        }
        Self::with_provider(config, Arc::new(provider))
    }

    /// Create application state with an explicit OCR provider
    pub fn with_provider(config: Config, provider: Arc<dyn VisionProviderTrait>) -> Self {
        let ocr = OcrService::new(config.filter.clone(), provider);
        Self {
            inner: Arc::new(AppStateInner { config, ocr }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the OCR service
    pub fn ocr(&self) -> &OcrService {
        &self.inner.ocr
    }
}
