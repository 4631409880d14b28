//! Configuration management for the quote scan server

use std::env;
use std::str::FromStr;

use crate::ocr::{FilterConfig, GoogleVisionProvider, LineBreakMode};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub vision: VisionConfig,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum request body size; photos arrive base64-encoded
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub language_hints: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                body_limit_bytes: 20 * 1024 * 1024,
            },
            vision: VisionConfig {
                endpoint: GoogleVisionProvider::DEFAULT_ENDPOINT.to_string(),
                api_key: None,
                language_hints: vec!["ko".to_string(), "en".to_string()],
                timeout_secs: 30,
            },
            filter: FilterConfig::default(),
        }
    }
}

/// Read and parse an env var, keeping `default` when unset or malformed
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let line_breaks = match env::var("OCR_LINE_BREAKS") {
            Ok(raw) => LineBreakMode::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring invalid OCR_LINE_BREAKS={:?}", raw);
                defaults.filter.line_breaks
            }),
            Err(_) => defaults.filter.line_breaks,
        };

        let language_hints = match env::var("VISION_LANGUAGE_HINTS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.vision.language_hints,
        };

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port),
                body_limit_bytes: parse_var("BODY_LIMIT_BYTES", defaults.server.body_limit_bytes),
            },
            vision: VisionConfig {
                endpoint: env::var("GOOGLE_VISION_ENDPOINT").unwrap_or(defaults.vision.endpoint),
                api_key: env::var("GOOGLE_VISION_API_KEY").ok(),
                language_hints,
                timeout_secs: parse_var("VISION_TIMEOUT_SECS", defaults.vision.timeout_secs),
            },
            filter: FilterConfig {
                right_margin_ratio: parse_var("OCR_RIGHT_MARGIN", defaults.filter.right_margin_ratio),
                top_margin_ratio: parse_var("OCR_TOP_MARGIN", defaults.filter.top_margin_ratio),
                bottom_margin_ratio: parse_var("OCR_BOTTOM_MARGIN", defaults.filter.bottom_margin_ratio),
                min_confidence: parse_var("OCR_MIN_CONFIDENCE", defaults.filter.min_confidence),
                max_page_number_len: parse_var(
                    "OCR_MAX_PAGE_NUMBER_LEN",
                    defaults.filter.max_page_number_len,
                ),
                line_breaks,
            },
        }
    }
}
