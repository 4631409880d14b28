//! Quote Scan Server Library
//!
//! OCR backend for capturing quotes from photographed book pages.
//! The server binary is in main.rs.
//!
//! # Modules
//!
//! - `ocr`: provider client and the header/footer text region filter
//! - `routes`: HTTP surface (`/api/v1/ocr/extract`, health)
//! - `config`, `state`, `error`: service plumbing

pub mod config;
pub mod error;
pub mod ocr;
pub mod routes;
pub mod state;
