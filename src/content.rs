//! Text extraction from parsed messages

use crate::types::ParsedMessage;
use tracing::{debug, info};

/// Concatenate the text of all `text/plain` and `text/html` parts.
///
/// HTML is rendered to plain text when the message is `text/html` at the top
/// level or the combined text contains an `<html` marker. Returns `None` when
/// no textual content exists.
#[must_use]
pub fn extract_text(message: &ParsedMessage) -> Option<String> {
    let mut content = String::new();
    for part in message.parts.iter().filter(|p| p.is_textual()) {
        content.push_str(&part.text());
    }

    if content.is_empty() {
        info!("No content found in email");
        return None;
    }

    if message.is_html() || contains_html_marker(&content) {
        content = html_to_text(&content);
        debug!("HTML body converted to text");
    }

    Some(content)
}

fn contains_html_marker(text: &str) -> bool {
    text.as_bytes()
        .windows(5)
        .any(|w| w.eq_ignore_ascii_case(b"<html"))
}

/// Render HTML as visible text.
///
/// Tags are dropped, `script` and `style` bodies are skipped, block-level
/// closers become line breaks and entities are decoded. Attribute values,
/// including `href`, do not survive. A `<` that cannot open a tag is text.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut in_script = false;
    let mut in_style = false;
    let mut tag = String::new();
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if !in_tag && c == '<' && chars.peek().copied().is_some_and(opens_tag) {
            in_tag = true;
            tag.clear();
        } else if in_tag && c == '>' {
            in_tag = false;
            let name = tag.to_ascii_lowercase();
            if name.starts_with("script") {
                in_script = true;
            } else if name.starts_with("/script") {
                in_script = false;
            } else if name.starts_with("style") {
                in_style = true;
            } else if name.starts_with("/style") {
                in_style = false;
            } else if !in_script && !in_style && is_line_break(&name) {
                result.push('\n');
            }
        } else if in_tag {
            tag.push(c);
        } else if !in_script && !in_style {
            result.push(c);
        }
    }

    html_escape::decode_html_entities(&result)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

const fn opens_tag(next: char) -> bool {
    next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')
}

fn is_line_break(tag: &str) -> bool {
    ["br", "/p", "/div", "/li", "/tr", "/h", "/title"]
        .iter()
        .any(|prefix| tag.starts_with(prefix))
}
