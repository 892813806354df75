// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::significant_drop_tightening)]

//! URL extraction for email corpora
//!
//! Parses `.eml` messages, decodes their MIME parts, renders the textual
//! content and collects every `http://` / `https://` URL found in it. A batch
//! coordinator runs the pipeline over a categorized corpus on a fixed worker
//! pool and writes per-file results plus a summary as JSON.
//!
//! # Example
//!
//! ```rust
//! use eml_url_extract::{extract_text, parse_message, UrlSet};
//!
//! let raw = b"From: sender@example.com\r\nSubject: Hello\r\n\r\nSee https://example.com/a";
//! let message = parse_message(raw);
//! let text = extract_text(&message).unwrap_or_default();
//! let urls = UrlSet::extract(&text);
//!
//! assert_eq!(urls.iter().collect::<Vec<_>>(), ["https://example.com/a"]);
//! ```

mod batch;
mod config;
mod content;
mod discover;
mod error;
mod extracted;
pub mod logging;
mod parser;
mod pipeline;
mod types;

pub use batch::BatchCoordinator;
pub use config::BatchConfig;
pub use content::{extract_text, html_to_text};
pub use discover::{discover_category, has_extension, names_match, resolve_dir, resolve_name};
pub use error::{ExtractError, Result};
pub use extracted::UrlSet;
pub use parser::{parse_message, read_message};
pub use pipeline::{extract_file, process_file};
pub use types::*;
