//! OCR Module
//!
//! Turns a photographed book page into quote-ready text.
//!
//! The provider (Google Cloud Vision dense document detection) returns
//! block-level annotations; [`TextRegionFilter`] keeps the body text and
//! recovers the page number from the header/footer bands.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quote_scan_server::ocr::{FilterConfig, GoogleVisionProvider, OcrService};
//!
//! let provider = GoogleVisionProvider::new(
//!     GoogleVisionProvider::DEFAULT_ENDPOINT,
//!     Some(api_key),
//!     vec!["ko".into(), "en".into()],
//!     Duration::from_secs(30),
//! );
//! let service = OcrService::new(FilterConfig::default(), Arc::new(provider));
//!
//! let result = service.extract(Some("data:image/jpeg;base64,...")).await?;
//! println!("p.{}: {}", result.page_number, result.body_text);
//! ```

mod filter;
mod provider;
mod service;
mod types;

pub use filter::{collapse_blank_lines, BlockClass, FilterConfig, LineBreakMode, TextRegionFilter};
pub use provider::{GoogleVisionProvider, VisionProviderTrait};
pub use service::{strip_data_uri_prefix, OcrService};
pub use types::{
    Block, BoundingPoly, BreakType, DetectedBreak, FilterResult, OcrError, PageAnnotation,
    Paragraph, Rect, Symbol, TextAnnotation, TextProperty, Vertex, Word, BILLING_GUIDANCE,
};

#[cfg(test)]
pub(crate) use provider::MockProvider;
