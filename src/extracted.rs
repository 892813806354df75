//! URL extraction from message text

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::info;

// `$-_` is a range spanning most ASCII punctuation: paths, queries and any
// trailing sentence punctuation stay inside the match.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
        .unwrap()
});

/// URLs found in one message, unique by exact string, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSet {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl UrlSet {
    /// Scan text for `http://` and `https://` URLs.
    ///
    /// Matches are greedy and non-overlapping; an empty set is returned when
    /// nothing matches.
    #[must_use]
    pub fn extract(text: &str) -> Self {
        let mut set = Self::default();
        let mut matched = 0usize;

        for m in URL_REGEX.find_iter(text) {
            matched += 1;
            set.insert(m.as_str());
        }

        if matched == 0 {
            info!("No URLs found in content");
        } else {
            info!("Extracted {matched} URLs ({} unique)", set.len());
        }

        set
    }

    /// Add a URL, returning `false` if it was already present
    pub fn insert(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string());
        self.urls.push(url.to_string());
        true
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

impl<'a> IntoIterator for &'a UrlSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}
