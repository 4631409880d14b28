//! OCR routes
//!
//! Quote capture: the client posts a photo of a book page and gets back the
//! page's body text plus the page number printed in the header or footer.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the OCR router
pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(extract_text))
}

/// Extraction request
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Base64 image, optionally as a `data:image/...;base64,` URI
    #[serde(default)]
    pub image: Option<String>,
}

/// Extraction response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub success: bool,
    /// Cleaned body text (empty when no usable text was found)
    pub text: String,
    /// Page number, empty when none was found
    pub page_number: String,
}

/// Extract body text and page number from a page photo
async fn extract_text(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let result = state.ocr().extract(request.image.as_deref()).await?;

    Ok(Json(ExtractResponse {
        success: true,
        text: result.body_text,
        page_number: result.page_number,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::ocr::{MockProvider, TextAnnotation};
    use crate::routes::app;
    use crate::state::AppState;

    fn annotation() -> TextAnnotation {
        serde_json::from_value(serde_json::json!({
            "pages": [{
                "width": 1000,
                "height": 1500,
                "blocks": [
                    {
                        "boundingBox": {"vertices": [{"x": 50, "y": 10}, {"x": 900, "y": 100}]},
                        "confidence": 0.95,
                        "paragraphs": [{"words": [{"symbols": [
                            {"text": "C"}, {"text": "h"}, {"text": "."},
                            {"text": "3", "property": {"detectedBreak": {"type": "SPACE"}}},
                            {"text": "A"}, {"text": " Long Running Header"}
                        ]}]}]
                    },
                    {
                        "boundingBox": {"vertices": [{"x": 100, "y": 300}, {"x": 800, "y": 1200}]},
                        "confidence": 0.9,
                        "paragraphs": [{"words": [{"symbols": [{"text": "Body"}, {"text": "."}]}]}]
                    },
                    {
                        "boundingBox": {"vertices": [{"x": 900, "y": 500}, {"x": 990, "y": 600}]},
                        "confidence": 0.99,
                        "paragraphs": [{"words": [{"symbols": [{"text": "Note"}]}]}]
                    },
                    {
                        "boundingBox": {"vertices": [{"x": 450, "y": 1400}, {"x": 520, "y": 1430}]},
                        "confidence": 0.3,
                        "paragraphs": [{"words": [{"symbols": [{"text": "42"}]}]}]
                    }
                ]
            }]
        }))
        .unwrap()
    }

    async fn post_json(state: AppState, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::post("/api/v1/ocr/extract")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_extract_success() {
        let provider = Arc::new(MockProvider::returning(Some(annotation())));
        let state = AppState::with_provider(Config::default(), provider);

        let (status, body) = post_json(state, r#"{"image": "data:image/jpeg;base64,aGVsbG8="}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["text"], "Body.");
        assert_eq!(body["pageNumber"], "42");
    }

    #[tokio::test]
    async fn test_extract_no_text_found() {
        let provider = Arc::new(MockProvider::returning(None));
        let state = AppState::with_provider(Config::default(), provider);

        let (status, body) = post_json(state, r#"{"image": "aGVsbG8="}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "");
        assert_eq!(body["pageNumber"], "");
    }

    #[tokio::test]
    async fn test_extract_missing_image() {
        let provider = Arc::new(MockProvider::returning(None));
        let state = AppState::with_provider(Config::default(), provider.clone());

        let (status, body) = post_json(state, "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "missing_image");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extract_malformed_json() {
        let provider = Arc::new(MockProvider::returning(None));
        let state = AppState::with_provider(Config::default(), provider);

        let (status, body) = post_json(state, "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_extract_billing_disabled() {
        let provider = Arc::new(MockProvider::failing(
            "Cloud Vision API has not been used in project 1 before or it is disabled. Billing must be enabled.",
        ));
        let state = AppState::with_provider(Config::default(), provider);

        let (status, body) = post_json(state, r#"{"image": "aGVsbG8="}"#).await;

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["error"], "billing_disabled");
        assert_eq!(body["message"], crate::ocr::BILLING_GUIDANCE);
    }

    #[tokio::test]
    async fn test_extract_provider_failure() {
        let provider = Arc::new(MockProvider::failing("Request had invalid authentication credentials."));
        let state = AppState::with_provider(Config::default(), provider);

        let (status, body) = post_json(state, r#"{"image": "aGVsbG8="}"#).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "provider_error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("invalid authentication credentials"));
    }

    #[tokio::test]
    async fn test_health() {
        let state = AppState::with_provider(
            Config::default(),
            Arc::new(MockProvider::returning(None)),
        );
        let request = Request::get("/api/v1/health").body(Body::empty()).unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
