//! Email extraction cascade.
//!
//! An ordered list of named strategies evaluated in sequence with
//! short-circuit: the earliest strategy that produces a value wins, and
//! later strategies are never consulted. This keeps the tie-break rule
//! auditable and lets each strategy be tested on its own.

use once_cell::sync::Lazy;
use regex::Regex;

/// `mailto:` scheme literal, as messaging clients often linkify addresses.
/// Stops at whitespace and at the `>`/`|` delimiters chat link markup uses.
static MAILTO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"mailto:([^\s>|]+@[^\s>|]+\.[^\s>|]+)").expect("valid mailto regex")
});

/// Standard `local@domain.tld` pattern with an alphabetic TLD of length >= 2.
static STANDARD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

/// The strategies tried by [`extract_email`], in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailStrategy {
    /// `mailto:x@y.z` literal; returns `x@y.z` exactly.
    Mailto,
    /// Maximal standard-pattern match, returned unaltered.
    Standard,
    /// "user at domain dot com" obfuscation, reassembled.
    SpelledOut,
    /// Exactly one '@' with a dotted remainder, halves rejoined.
    Loose,
}

impl EmailStrategy {
    /// All strategies in cascade order.
    pub const CASCADE: [EmailStrategy; 4] = [
        EmailStrategy::Mailto,
        EmailStrategy::Standard,
        EmailStrategy::SpelledOut,
        EmailStrategy::Loose,
    ];

    /// Stable name for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            EmailStrategy::Mailto => "mailto",
            EmailStrategy::Standard => "standard",
            EmailStrategy::SpelledOut => "spelled_out",
            EmailStrategy::Loose => "loose",
        }
    }

    /// Apply this single strategy to `text`.
    pub fn apply(&self, text: &str) -> Option<String> {
        match self {
            EmailStrategy::Mailto => apply_mailto(text),
            EmailStrategy::Standard => apply_standard(text),
            EmailStrategy::SpelledOut => apply_spelled_out(text),
            EmailStrategy::Loose => apply_loose(text),
        }
    }
}

fn apply_mailto(text: &str) -> Option<String> {
    if !text.contains("mailto:") {
        return None;
    }
    MAILTO_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

fn apply_standard(text: &str) -> Option<String> {
    STANDARD_RE.find(text).map(|m| m.as_str().to_string())
}

fn apply_spelled_out(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if !(lower.contains("at") && lower.contains("dot")) {
        return None;
    }

    // Split on the first "at", then the remainder on the first "dot".
    let (before_at, after_at) = lower.split_once("at")?;
    let (domain, tld) = after_at.split_once("dot")?;

    let username = before_at.trim();
    let domain = domain.trim();
    let tld = tld.trim();
    if username.is_empty() || domain.is_empty() || tld.is_empty() {
        return None;
    }

    Some(format!("{}@{}.{}", username, domain, tld))
}

fn apply_loose(text: &str) -> Option<String> {
    let mut parts = text.split('@');
    let username = parts.next()?.trim();
    let domain = parts.next()?.trim();
    // Exactly one '@', and the remainder must be dotted.
    if parts.next().is_some() || !domain.contains('.') {
        return None;
    }
    if username.is_empty() || domain.is_empty() {
        return None;
    }
    Some(format!("{}@{}", username, domain))
}

/// Scan `text` for an email address, returning the best candidate.
pub fn extract_email(text: &str) -> Option<String> {
    extract_email_traced(text).map(|(email, _)| email)
}

/// Like [`extract_email`], but also reports which strategy won.
pub fn extract_email_traced(text: &str) -> Option<(String, EmailStrategy)> {
    if text.is_empty() {
        return None;
    }

    for strategy in EmailStrategy::CASCADE {
        if let Some(email) = strategy.apply(text) {
            return Some((email, strategy));
        }
    }

    None
}
