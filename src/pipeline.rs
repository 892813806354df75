//! Per-file pipeline: read, parse, extract text, extract URLs

use crate::content::extract_text;
use crate::error::Result;
use crate::extracted::UrlSet;
use crate::parser::{parse_message, read_message};
use crate::types::FileResult;
use std::path::Path;
use tracing::{error, info, info_span};

/// Run the full pipeline on one message file.
///
/// Only an unreadable file is an error; a message without text or URLs
/// yields an empty set.
pub fn extract_file(path: &Path) -> Result<UrlSet> {
    let _span = info_span!("extract", file = %path.display()).entered();
    info!("Reading email file");

    let raw = read_message(path)?;
    let message = parse_message(&raw);

    Ok(extract_text(&message).map_or_else(UrlSet::default, |text| UrlSet::extract(&text)))
}

/// Run the pipeline and fold any failure into an empty result
#[must_use]
pub fn process_file(path: &Path) -> FileResult {
    match extract_file(path) {
        Ok(urls) => FileResult::new(path, urls.into_vec()),
        Err(e) => {
            error!("{e}");
            FileResult::empty(path)
        }
    }
}
