//! Phone normalization helpers.
//!
//! One canonical shape is used end-to-end: `DDD-DDD-DDDD` for 10-digit
//! numbers, both at the extractor boundary and in the store.

/// Strip every non-digit character from `raw`.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Regroup a 10-digit string into the canonical `DDD-DDD-DDDD` form.
///
/// Callers must pass exactly 10 digits.
pub fn group_canonical(digits: &str) -> String {
    debug_assert_eq!(digits.len(), 10);
    format!("{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}

/// Normalize a raw matched phone substring.
///
/// - Exactly 10 digits after stripping: canonical `DDD-DDD-DDDD`.
/// - 7 to 15 digits: the raw substring trimmed, as matched. No guessing
///   at grouping for non-10-digit (international) numbers.
/// - Outside [7, 15]: `None`.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits = digits_only(raw);
    match digits.len() {
        10 => Some(group_canonical(&digits)),
        7..=15 => Some(raw.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("+1 (555) 123-4567"), "15551234567");
        assert_eq!(digits_only("no digits"), "");
    }

    #[test]
    fn test_normalize_ten_digits_grouped() {
        assert_eq!(normalize_phone("5551234567").as_deref(), Some("555-123-4567"));
        assert_eq!(normalize_phone("(555)123-4567").as_deref(), Some("555-123-4567"));
        assert_eq!(normalize_phone("555.123.4567").as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_normalize_in_range_returns_trimmed_raw() {
        assert_eq!(
            normalize_phone(" +44 20 7946 0958 ").as_deref(),
            Some("+44 20 7946 0958")
        );
        assert_eq!(normalize_phone("1234567").as_deref(), Some("1234567"));
    }

    #[test]
    fn test_normalize_out_of_range_is_none() {
        assert_eq!(normalize_phone("123456"), None);
        assert_eq!(normalize_phone("1234567890123456"), None);
        assert_eq!(normalize_phone(""), None);
    }
}
