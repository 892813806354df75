//! Message parser: raw bytes to headers plus decoded leaf parts

use crate::error::{ExtractError, Result};
use crate::types::{MimePart, ParsedMessage, TransferEncoding};
use mailparse::{body::Body, MailHeaderMap, ParsedMail};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, debug_span, warn};

const MAX_EMBED_DEPTH: usize = 16;

/// Read a message file into memory.
///
/// The handle is dropped before returning on every path.
pub fn read_message(path: &Path) -> Result<Vec<u8>> {
    let file_access = |source: std::io::Error| ExtractError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(file_access)?;
    let mut raw = Vec::new();
    file.read_to_end(&mut raw).map_err(file_access)?;
    Ok(raw)
}

/// Parse raw message bytes into a [`ParsedMessage`].
///
/// Never fails: invalid UTF-8 is replaced before parsing, undecodable
/// payloads are kept in their transported form, and a message whose header
/// block cannot be parsed is kept whole as one `text/plain` part.
#[must_use]
pub fn parse_message(raw: &[u8]) -> ParsedMessage {
    let _span = debug_span!("parse").entered();
    let text = String::from_utf8_lossy(raw);

    let parsed = match mailparse::parse_mail(text.as_bytes()) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Malformed message structure, keeping raw text: {e}");
            return ParsedMessage {
                headers: Vec::new(),
                content_type: "text/plain".into(),
                parts: vec![MimePart::new(
                    "text/plain",
                    TransferEncoding::Identity,
                    text.to_string().into_bytes(),
                )],
            };
        }
    };

    let headers = parsed
        .headers
        .iter()
        .map(|h| (h.get_key(), h.get_value()))
        .collect();
    let content_type = parsed.ctype.mimetype.to_ascii_lowercase();

    let mut parts = Vec::new();
    walk(&parsed, 0, &mut parts);

    debug!("Parsed {content_type} message with {} parts", parts.len());

    ParsedMessage {
        headers,
        content_type,
        parts,
    }
}

/// Depth-first walk pushing every leaf; attached `message/rfc822` bodies are
/// parsed and walked in place of the attachment itself.
fn walk(part: &ParsedMail, depth: usize, parts: &mut Vec<MimePart>) {
    let mimetype = part.ctype.mimetype.to_ascii_lowercase();

    if mimetype.starts_with("multipart/") {
        if part.subparts.is_empty() {
            debug!("Skipping multipart container without parsable children");
        }
        for sub in &part.subparts {
            walk(sub, depth, parts);
        }
        return;
    }

    let leaf = decode_part(part);
    if mimetype == "message/rfc822" && depth < MAX_EMBED_DEPTH {
        match mailparse::parse_mail(&leaf.payload) {
            Ok(embedded) => {
                walk(&embedded, depth + 1, parts);
                return;
            }
            Err(e) => debug!("Embedded message unparsable, keeping as attachment: {e}"),
        }
    }
    parts.push(leaf);
}

fn decode_part(part: &ParsedMail) -> MimePart {
    let encoding = TransferEncoding::from_header(
        part.headers
            .get_first_value("Content-Transfer-Encoding")
            .as_deref(),
    );

    MimePart::new(&part.ctype.mimetype, encoding, decode_payload(part))
}

fn decode_payload(part: &ParsedMail) -> Vec<u8> {
    match part.get_body_encoded() {
        Body::Base64(body) | Body::QuotedPrintable(body) => {
            body.get_decoded().unwrap_or_else(|e| {
                debug!("Payload decoding failed, keeping encoded bytes: {e}");
                body.get_raw().to_vec()
            })
        }
        Body::SevenBit(body) | Body::EightBit(body) => body.get_raw().to_vec(),
        Body::Binary(body) => body.get_raw().to_vec(),
    }
}
