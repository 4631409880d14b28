//! Text Region Filter
//!
//! Rebuilds the body text of a photographed book page from the provider's
//! block annotations. Running headers, footers and side notes are dropped
//! using fixed page bands, and the page number is recovered from whatever
//! short numeric block sits in the header or footer band.

use std::sync::OnceLock;

use regex::Regex;

use super::types::{Block, BreakType, FilterResult, PageAnnotation, Rect};

/// How end-of-line break hints are rendered inside a paragraph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineBreakMode {
    /// `EOL_SURE_SPACE` / `LINE_BREAK` become a single space
    #[default]
    Space,
    /// `EOL_SURE_SPACE` / `LINE_BREAK` become a newline (keeps verse layout)
    Newline,
}

impl LineBreakMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "space" => Some(Self::Space),
            "newline" => Some(Self::Newline),
            _ => None,
        }
    }
}

/// Filter thresholds, as fractions of the page size
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Blocks starting right of `width * ratio` are side notes
    pub right_margin_ratio: f64,
    /// Blocks ending above `height * ratio` are in the header band
    pub top_margin_ratio: f64,
    /// Blocks starting below `height * ratio` are in the footer band
    pub bottom_margin_ratio: f64,
    /// Minimum block confidence (0-1)
    pub min_confidence: f64,
    /// Band blocks shorter than this (in characters) may be page numbers
    pub max_page_number_len: usize,
    pub line_breaks: LineBreakMode,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            right_margin_ratio: 0.85,
            top_margin_ratio: 0.15,
            bottom_margin_ratio: 0.85,
            min_confidence: 0.5,
            max_page_number_len: 15,
            line_breaks: LineBreakMode::Space,
        }
    }
}

/// Where a block ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockClass {
    /// Kept as body text
    Body,
    /// Dropped: below the confidence threshold
    LowConfidence,
    /// Dropped: starts in the right-hand margin
    RightMargin,
    /// Dropped: running header or footer
    Margin,
    /// Header/footer block holding the page number
    PageNumber,
}

/// Pixel thresholds for one page
#[derive(Debug, Clone, Copy)]
struct PageBands {
    right: f64,
    top: f64,
    bottom: f64,
}

impl PageBands {
    fn new(page: &PageAnnotation, config: &FilterConfig) -> Self {
        let width = page.width as f64;
        let height = page.height as f64;
        Self {
            right: width * config.right_margin_ratio,
            top: height * config.top_margin_ratio,
            bottom: height * config.bottom_margin_ratio,
        }
    }

    fn in_header_or_footer(&self, rect: &Rect) -> bool {
        rect.max_y < self.top || rect.min_y > self.bottom
    }
}

fn digit_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("valid digit pattern"))
}

fn blank_line_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n{3,}").expect("valid newline pattern"))
}

/// Collapse runs of three or more newlines into a single blank line
pub fn collapse_blank_lines(text: &str) -> String {
    blank_line_run().replace_all(text, "\n\n").into_owned()
}

impl Block {
    /// Reassemble the block's text from its symbols and break hints.
    ///
    /// Each paragraph is terminated by a newline; the result is trimmed.
    pub fn text(&self, line_breaks: LineBreakMode) -> String {
        let mut text = String::new();
        for paragraph in &self.paragraphs {
            for word in &paragraph.words {
                for symbol in &word.symbols {
                    text.push_str(&symbol.text);
                    match symbol.detected_break() {
                        Some(BreakType::Space | BreakType::SureSpace) => text.push(' '),
                        Some(BreakType::EolSureSpace | BreakType::LineBreak) => {
                            match line_breaks {
                                LineBreakMode::Space => text.push(' '),
                                LineBreakMode::Newline => text.push('\n'),
                            }
                        }
                        _ => {}
                    }
                }
            }
            text.push('\n');
        }
        text.trim().to_string()
    }
}

/// Splits a page annotation into body text and page number
#[derive(Debug, Clone, Default)]
pub struct TextRegionFilter {
    config: FilterConfig,
}

impl TextRegionFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Filter one page. A missing page yields an empty result.
    pub fn filter(&self, page: Option<&PageAnnotation>) -> FilterResult {
        let Some(page) = page else {
            return FilterResult::default();
        };

        let bands = PageBands::new(page, &self.config);
        let mut body = String::new();
        let mut page_number = String::new();

        for (index, block) in page.blocks.iter().enumerate() {
            let text = block.text(self.config.line_breaks);
            match self.classify_text(block, &text, &bands) {
                BlockClass::Body => {
                    body.push_str(&text);
                    body.push_str("\n\n");
                }
                BlockClass::PageNumber => {
                    // Later blocks overwrite earlier ones
                    if let Some(digits) = digit_run().find(&text) {
                        page_number = digits.as_str().to_string();
                    }
                }
                class => {
                    tracing::debug!(
                        block = index,
                        ?class,
                        confidence = block.confidence,
                        "Dropping OCR block: {:?}",
                        text
                    );
                }
            }
        }

        FilterResult {
            body_text: collapse_blank_lines(body.trim()),
            page_number,
        }
    }

    /// Classify a single block of `page`
    pub fn classify(&self, block: &Block, page: &PageAnnotation) -> BlockClass {
        let bands = PageBands::new(page, &self.config);
        let text = block.text(self.config.line_breaks);
        self.classify_text(block, &text, &bands)
    }

    /// Gate order: confidence, right margin, then header/footer band
    fn classify_text(&self, block: &Block, text: &str, bands: &PageBands) -> BlockClass {
        let rect = block.bounds();
        let in_band = bands.in_header_or_footer(&rect);
        let short_numeric = text.chars().count() < self.config.max_page_number_len
            && text.bytes().any(|b| b.is_ascii_digit());
        let likely_page_number = in_band && short_numeric;

        if block.confidence < self.config.min_confidence && !likely_page_number {
            return BlockClass::LowConfidence;
        }
        if rect.min_x > bands.right {
            return BlockClass::RightMargin;
        }
        if in_band {
            return if short_numeric {
                BlockClass::PageNumber
            } else {
                BlockClass::Margin
            };
        }
        BlockClass::Body
    }
}
