use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Centralized registry for PII redaction regex patterns.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Wallet address: `0x` followed by at least 8 hex digits
    pub fn wallet_address() -> &'static Regex {
        static WALLET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b0x([A-Fa-f0-9]{4})[A-Fa-f0-9]*([A-Fa-f0-9]{4})\b").unwrap()
        });
        &WALLET_REGEX
    }

    /// Base64-like token pattern: matches opaque tokens (≥16 chars)
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}\b").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }
}

/// Redacts sensitive information from a string.
///
/// - Wallet addresses keep their first and last four hex digits: `0x1a2b...9f0e`
/// - Other opaque runs (≥16 chars) become `[REDACTED_TOKEN]`
///
/// Wallets first, so the shortened form is not picked up as a token.
pub fn redact(input: &str) -> String {
    let wallet_redacted = PiiRegexRegistry::wallet_address().replace_all(input, "0x${1}...${2}");

    PiiRegexRegistry::base64_token()
        .replace_all(&wallet_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// A wrapper that redacts sensitive strings when displayed.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
