//! Core types for parsed messages and extraction results

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Content-Transfer-Encoding of a MIME part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferEncoding {
    /// 7bit, 8bit, binary or no header at all
    #[default]
    Identity,
    Base64,
    QuotedPrintable,
}

impl TransferEncoding {
    /// Parse a Content-Transfer-Encoding header value.
    ///
    /// Unknown tokens fall back to identity so the payload passes through.
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Identity;
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "base64" => Self::Base64,
            "quoted-printable" => Self::QuotedPrintable,
            _ => Self::Identity,
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Identity => "identity",
            Self::Base64 => "base64",
            Self::QuotedPrintable => "quoted-printable",
        };
        f.write_str(s)
    }
}

/// A leaf body part with its payload already decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimePart {
    /// Lowercased mime type, e.g. `text/plain`
    pub content_type: String,

    /// Encoding the payload was transported in
    pub encoding: TransferEncoding,

    /// Decoded payload bytes
    pub payload: Vec<u8>,
}

impl MimePart {
    pub fn new(
        content_type: impl Into<String>,
        encoding: TransferEncoding,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            content_type: content_type.into().to_ascii_lowercase(),
            encoding,
            payload,
        }
    }

    /// Parts the content extractor reads: `text/plain` and `text/html`
    #[must_use]
    pub fn is_textual(&self) -> bool {
        matches!(self.content_type.as_str(), "text/plain" | "text/html")
    }

    #[must_use]
    pub fn is_html(&self) -> bool {
        self.content_type == "text/html"
    }

    /// Payload as text; invalid UTF-8 sequences are replaced
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

/// A message reduced to its headers and flattened leaf parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    /// All headers in file order, keys as written
    pub headers: Vec<(String, String)>,

    /// Top-level mime type, lowercased
    pub content_type: String,

    /// Leaf parts in depth-first order
    pub parts: Vec<MimePart>,
}

impl ParsedMessage {
    /// First value of a header, matched case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.content_type.starts_with("multipart/")
    }

    #[must_use]
    pub fn is_html(&self) -> bool {
        self.content_type == "text/html"
    }
}

/// Per-file extraction result, as written to the results document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileResult {
    pub file: String,
    pub urls: Vec<String>,
    pub url_count: usize,
}

impl FileResult {
    /// Build a result from already deduplicated URLs
    #[must_use]
    pub fn new(path: &Path, urls: Vec<String>) -> Self {
        Self {
            file: path.display().to_string(),
            url_count: urls.len(),
            urls,
        }
    }

    /// Result for a file whose pipeline failed
    #[must_use]
    pub fn empty(path: &Path) -> Self {
        Self::new(path, Vec::new())
    }
}

/// Aggregate counts over one batch run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub total_emails_processed: usize,
    pub total_urls_extracted: usize,
    pub unique_urls_count: usize,
}

impl BatchSummary {
    /// Sum per-file counts and union per-file URL sets.
    ///
    /// Both operations are order independent, so results may arrive in any
    /// completion order.
    #[must_use]
    pub fn from_results(results: &[FileResult]) -> Self {
        let unique: HashSet<&str> = results
            .iter()
            .flat_map(|r| r.urls.iter().map(String::as_str))
            .collect();

        Self {
            total_emails_processed: results.len(),
            total_urls_extracted: results.iter().map(|r| r.url_count).sum(),
            unique_urls_count: unique.len(),
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} emails, extracted {} URLs, {} unique",
            self.total_emails_processed, self.total_urls_extracted, self.unique_urls_count
        )
    }
}
