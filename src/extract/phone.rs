//! Phone extraction cascade.
//!
//! Mirrors the email cascade: whole-string shortcuts first, then an
//! ordered family of patterns, then spelled-out digits. First success
//! short-circuits.

use super::normalize::{digits_only, group_canonical, normalize_phone};
use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-message `DDD-DDD-DDDD`, already canonical.
static EXACT_CANONICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("valid phone regex"));

/// Whole-message parenthesized area code with optional separators.
static EXACT_PARENS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d{3}\)\s*\d{3}[\s-]*\d{4}$").expect("valid phone regex"));

/// Whole-message bare 10 digits.
static EXACT_BARE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone regex"));

/// Pattern families tried in order against arbitrary message text.
static FAMILIES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            // 555-123-4567, (555) 123-4567, +1 555.123.4567
            "intl_prefix",
            Regex::new(r"(\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}")
                .expect("valid phone regex"),
        ),
        (
            // +1 555 123 4567
            "intl_spaced",
            Regex::new(r"\+\d{1,3}\s\d{1,3}\s\d{3,4}\s\d{4}").expect("valid phone regex"),
        ),
        (
            // 7 to 15 bare digits
            "bare_digits",
            Regex::new(r"\b\d{7,15}\b").expect("valid phone regex"),
        ),
        (
            // 555.123.4567
            "dot_separated",
            Regex::new(r"\d{3}\.\d{3}\.\d{4}").expect("valid phone regex"),
        ),
        (
            // 555 123 4567
            "space_separated",
            Regex::new(r"\d{3}\s\d{3}\s\d{4}").expect("valid phone regex"),
        ),
    ]
});

/// The stages of the phone cascade, for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneStrategy {
    /// The whole message is a phone number in a known exact shape.
    ExactFormat,
    /// One of the ordered pattern families matched inside the text.
    Pattern(&'static str),
    /// Digits written out as words ("five five five ...").
    SpelledOut,
}

impl PhoneStrategy {
    /// Stable name for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            PhoneStrategy::ExactFormat => "exact_format",
            PhoneStrategy::Pattern(name) => name,
            PhoneStrategy::SpelledOut => "spelled_out",
        }
    }
}

/// Digit words recognized by the spelled-out stage. Unknown tokens
/// contribute nothing.
fn word_digit(token: &str) -> Option<char> {
    match token {
        "zero" => Some('0'),
        "one" => Some('1'),
        "two" => Some('2'),
        "three" => Some('3'),
        "four" => Some('4'),
        "five" => Some('5'),
        "six" => Some('6'),
        "seven" => Some('7'),
        "eight" => Some('8'),
        "nine" => Some('9'),
        _ => None,
    }
}

fn apply_exact(text: &str) -> Option<String> {
    let trimmed = text.trim();

    // Already canonical, returned as-is.
    if EXACT_CANONICAL_RE.is_match(trimmed) {
        return Some(trimmed.to_string());
    }

    if EXACT_PARENS_RE.is_match(trimmed) || EXACT_BARE_RE.is_match(trimmed) {
        let digits = digits_only(trimmed);
        if digits.len() >= 10 {
            return Some(group_canonical(&digits[0..10]));
        }
    }

    None
}

fn apply_families(text: &str) -> Option<(String, &'static str)> {
    for (name, pattern) in FAMILIES.iter() {
        if let Some(m) = pattern.find(text) {
            let digits = digits_only(m.as_str());
            if digits.len() >= 7 {
                let value = if digits.len() == 10 {
                    group_canonical(&digits)
                } else {
                    m.as_str().trim().to_string()
                };
                return Some((value, name));
            }
        }
    }
    None
}

fn apply_spelled_out(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    if words.len() < 7 {
        return None;
    }

    let digits: String = words.iter().filter_map(|w| word_digit(w)).collect();
    if digits.len() >= 10 {
        return Some(group_canonical(&digits[0..10]));
    }

    None
}

/// Scan `text` for a phone number, returning the best candidate.
///
/// Exactly-10-digit matches come back in canonical `DDD-DDD-DDDD` form;
/// other in-range matches come back as the trimmed raw substring.
pub fn extract_phone(text: &str) -> Option<String> {
    extract_phone_traced(text).map(|(phone, _)| phone)
}

/// Like [`extract_phone`], but also reports which strategy won.
pub fn extract_phone_traced(text: &str) -> Option<(String, PhoneStrategy)> {
    if text.is_empty() {
        return None;
    }

    if let Some(phone) = apply_exact(text) {
        return Some((phone, PhoneStrategy::ExactFormat));
    }

    if let Some((phone, family)) = apply_families(text) {
        return Some((phone, PhoneStrategy::Pattern(family)));
    }

    if let Some(phone) = apply_spelled_out(text) {
        return Some((phone, PhoneStrategy::SpelledOut));
    }

    None
}
