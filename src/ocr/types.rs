//! OCR Types
//!
//! Page annotation model returned by the document text detector, plus the
//! filtered result handed back to clients.

use serde::{Deserialize, Serialize};

/// Full-text annotation for one image (`fullTextAnnotation`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    #[serde(default)]
    pub pages: Vec<PageAnnotation>,
    /// Provider's own concatenated text (unfiltered)
    #[serde(default)]
    pub text: String,
}

/// A single OCR'd page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnnotation {
    /// Page width in pixels
    #[serde(default)]
    pub width: u32,
    /// Page height in pixels
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Contiguous text region detected by the provider
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub bounding_box: Option<BoundingPoly>,
    /// Detection confidence (0-1), zero when the provider omits it
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Block {
    /// Axis-aligned bounds of the block, all zero without a bounding box
    pub fn bounds(&self) -> Rect {
        self.bounding_box
            .as_ref()
            .map(BoundingPoly::bounds)
            .unwrap_or_default()
    }
}

/// Polygon outline, in pixels. Vertex order is not guaranteed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

impl BoundingPoly {
    /// Min/max rectangle over all vertices; absent coordinates count as 0
    pub fn bounds(&self) -> Rect {
        if self.vertices.is_empty() {
            return Rect::default();
        }

        let mut rect = Rect {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
        };
        for vertex in &self.vertices {
            let x = vertex.x.unwrap_or(0) as f64;
            let y = vertex.y.unwrap_or(0) as f64;
            rect.min_x = rect.min_x.min(x);
            rect.max_x = rect.max_x.max(x);
            rect.min_y = rect.min_y.min(y);
            rect.max_y = rect.max_y.max(y);
        }
        rect
    }
}

/// Polygon vertex. The provider drops zero-valued coordinates from the JSON.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Axis-aligned rectangle (pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

/// One glyph (or short fragment) of recognized text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub property: Option<TextProperty>,
}

impl Symbol {
    /// Break hint following this symbol, if any
    pub fn detected_break(&self) -> Option<BreakType> {
        self.property
            .as_ref()
            .and_then(|p| p.detected_break.as_ref())
            .map(|b| b.break_type)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProperty {
    #[serde(default)]
    pub detected_break: Option<DetectedBreak>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectedBreak {
    #[serde(rename = "type", default)]
    pub break_type: BreakType,
}

/// Break hint kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakType {
    Space,
    SureSpace,
    EolSureSpace,
    Hyphen,
    LineBreak,
    /// Any break kind not listed above
    #[default]
    #[serde(other)]
    Unknown,
}

/// Cleaned page text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    /// Body text with margins and noise removed, paragraphs separated by a blank line
    pub body_text: String,
    /// Page number found in the header/footer band, empty if none
    pub page_number: String,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.body_text.is_empty() && self.page_number.is_empty()
    }
}

/// Message shown when the provider project has no billing account attached
pub const BILLING_GUIDANCE: &str = "Google Cloud Vision API 결제가 활성화되어 있지 않습니다. \
Google Cloud Console에서 결제 계정을 연결한 뒤 다시 시도해 주세요. \
(Billing is not enabled for the Google Cloud Vision API. \
Link a billing account in the Google Cloud Console and try again.)";

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("No image was provided")]
    MissingImage,

    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error("OCR provider credential is not configured")]
    MissingCredential,

    #[error("{}", BILLING_GUIDANCE)]
    BillingDisabled,

    #[error("OCR provider error: {0}")]
    Provider(String),
}

impl OcrError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::MissingImage | Self::InvalidImage(_) => StatusCode::BAD_REQUEST,
            Self::BillingDisabled => StatusCode::PAYMENT_REQUIRED,
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
            Self::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingImage => "missing_image",
            Self::InvalidImage(_) => "invalid_image",
            Self::MissingCredential => "missing_credential",
            Self::BillingDisabled => "billing_disabled",
            Self::Provider(_) => "provider_error",
        }
    }
}
