//! Content classification for fact values.
//!
//! The classifier decides whether a value looks like a security indicator
//! worth a reputation lookup. Rules are tried in priority order and the first
//! match wins:
//! 1. IPv4 or IPv6 literal
//! 2. MD5, SHA-1 or SHA-256 hex digest
//! 3. Domain-like token, optionally prefixed by a scheme and `www.`

use once_cell::sync::Lazy;
use regex::Regex;
use std::net::IpAddr;

use crate::fact::Category;

/// Hex digest lengths for MD5, SHA-1 and SHA-256.
const HASH_LENGTHS: [usize; 3] = [32, 40, 64];

static DOMAIN_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)^(?:https?://)?(?:www\.)?([\w.-]+\.[a-z]{2,})").ok());

/// Result of classifying one content string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub category: Category,

    /// Canonical lookup target: the IP literal, the digest, or the bare domain.
    pub target: Option<String>,
}

impl Classification {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            category: Category::None,
            target: None,
        }
    }

    #[must_use]
    pub fn indicator(target: impl Into<String>) -> Self {
        Self {
            category: Category::IndicatorCheck,
            target: Some(target.into()),
        }
    }
}

/// Assigns a category to a content string.
pub trait ContentClassifier: Send + Sync {
    fn classify(&self, content: &str) -> Classification;
}

/// Default classifier for IP literals, hex digests and domains.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorClassifier;

impl IndicatorClassifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn is_ip(content: &str) -> bool {
        content.parse::<IpAddr>().is_ok()
    }

    fn is_digest(content: &str) -> bool {
        HASH_LENGTHS.contains(&content.len()) && content.bytes().all(|b| b.is_ascii_hexdigit())
    }

    fn domain_of(content: &str) -> Option<&str> {
        let re = DOMAIN_PATTERN.as_ref()?;
        let caps = re.captures(content)?;
        caps.get(1).map(|m| m.as_str())
    }
}

impl ContentClassifier for IndicatorClassifier {
    fn classify(&self, content: &str) -> Classification {
        let content = content.trim();
        if content.is_empty() {
            return Classification::none();
        }

        if Self::is_ip(content) || Self::is_digest(content) {
            return Classification::indicator(content);
        }

        Self::domain_of(content).map_or_else(Classification::none, Classification::indicator)
    }
}
