//! OCR Service
//!
//! Validates the uploaded image, calls the provider and runs the page
//! annotation through the text region filter.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::Instrument;

use super::{
    filter::{FilterConfig, TextRegionFilter},
    provider::VisionProviderTrait,
    types::{FilterResult, OcrError},
};

/// Strip a leading `data:image/...;base64,` prefix, if present
pub fn strip_data_uri_prefix(image: &str) -> &str {
    let image = image.trim();
    if let Some(rest) = image.strip_prefix("data:image/") {
        if let Some(pos) = rest.find(";base64,") {
            return &rest[pos + ";base64,".len()..];
        }
    }
    image
}

/// Drop line wrapping from a base64 payload and reject non-base64 characters.
///
/// Only allocates when the payload contains whitespace.
fn normalize_base64(image: &str) -> Result<Cow<'_, str>, OcrError> {
    let image: Cow<'_, str> = if image.contains(char::is_whitespace) {
        Cow::Owned(image.split_whitespace().collect())
    } else {
        Cow::Borrowed(image)
    };

    let invalid = image
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(*c, '+' | '/' | '=' | '-' | '_')));
    if let Some(c) = invalid {
        return Err(OcrError::InvalidImage(format!(
            "unexpected character {:?} in base64 image",
            c
        )));
    }
    Ok(image)
}

/// Provider errors mentioning billing get a dedicated message
fn translate_provider_error(error: OcrError) -> OcrError {
    match error {
        OcrError::Provider(message) if message.to_lowercase().contains("billing") => {
            tracing::warn!("Vision API billing is not enabled: {}", message);
            OcrError::BillingDisabled
        }
        other => other,
    }
}

/// Quote capture OCR service
pub struct OcrService {
    provider: Arc<dyn VisionProviderTrait>,
    filter: TextRegionFilter,
}

impl OcrService {
    pub fn new(config: FilterConfig, provider: Arc<dyn VisionProviderTrait>) -> Self {
        Self {
            provider,
            filter: TextRegionFilter::new(config),
        }
    }

    /// Extract body text and page number from a photographed page
    pub async fn extract(&self, image: Option<&str>) -> Result<FilterResult, OcrError> {
        let image = image
            .map(strip_data_uri_prefix)
            .filter(|i| !i.is_empty())
            .ok_or(OcrError::MissingImage)?;

        if !self.provider.is_configured() {
            tracing::error!("{} credential is not configured", self.provider.name());
            return Err(OcrError::MissingCredential);
        }

        let image = normalize_base64(image)?;

        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("ocr_extract", %request_id, provider = self.provider.name());

        async move {
            let annotation = self
                .provider
                .annotate(&image)
                .await
                .map_err(translate_provider_error)?;

            let page = annotation.as_ref().and_then(|a| a.pages.first());
            if page.is_none() {
                tracing::info!("No text detected");
            }

            let result = self.filter.filter(page);
            tracing::info!(
                blocks = page.map(|p| p.blocks.len()).unwrap_or(0),
                body_chars = result.body_text.chars().count(),
                page_number = %result.page_number,
                "Extracted page text"
            );
            Ok::<_, OcrError>(result)
        }
        .instrument(span)
        .await
    }
}
