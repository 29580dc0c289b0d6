//! End-to-end extraction properties over the public API.

use contact_intake::extract::{
    extract_email, extract_email_traced, extract_phone, extract_phone_traced, normalize_phone,
    process_message, EmailStrategy, PhoneStrategy,
};

// ---------------------------------------------------------------- email

#[test]
fn mailto_substring_is_returned_exactly() {
    for text in [
        "mailto:x@y.zw",
        "ping me at mailto:x@y.zw please",
        "link: <mailto:x@y.zw>",
    ] {
        assert_eq!(extract_email(text).as_deref(), Some("x@y.zw"), "text: {text}");
    }
}

#[test]
fn standard_email_found_in_sentence() {
    assert_eq!(
        extract_email("sounds good, reach me at First.Last+leads@big-corp.com!").as_deref(),
        Some("First.Last+leads@big-corp.com")
    );
}

#[test]
fn obfuscated_email_reassembled() {
    let (email, strategy) = extract_email_traced("jane at widgets dot io").unwrap();
    assert_eq!(email, "jane@widgets.io");
    assert_eq!(strategy, EmailStrategy::SpelledOut);
}

#[test]
fn loose_email_reassembled_from_split_halves() {
    assert_eq!(
        extract_email("jane @ widgets.io").as_deref(),
        Some("jane@widgets.io")
    );
}

#[test]
fn strategy_order_is_first_success_wins() {
    // mailto outranks a plain address appearing earlier in the text
    let (email, strategy) =
        extract_email_traced("plain a@b.co but also mailto:c@d.co").unwrap();
    assert_eq!(email, "c@d.co");
    assert_eq!(strategy, EmailStrategy::Mailto);
}

// ---------------------------------------------------------------- phone

#[test]
fn ten_digit_strings_group_canonically() {
    assert_eq!(extract_phone("5551234567").as_deref(), Some("555-123-4567"));
    assert_eq!(extract_phone("9998887777").as_deref(), Some("999-888-7777"));
}

#[test]
fn canonical_form_is_a_fixed_point() {
    assert_eq!(extract_phone("555-123-4567").as_deref(), Some("555-123-4567"));
}

#[test]
fn extraction_is_idempotent_on_digit_content() {
    let first = extract_phone("5551234567").unwrap();
    let second = extract_phone(&first).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parenthesized_area_code_regrouped() {
    assert_eq!(extract_phone("(555)123-4567").as_deref(), Some("555-123-4567"));
    assert_eq!(extract_phone("(555) 123-4567").as_deref(), Some("555-123-4567"));
}

#[test]
fn spelled_out_digits_are_recognized() {
    let (phone, strategy) =
        extract_phone_traced("five five five one two three four five six seven").unwrap();
    assert_eq!(phone, "555-123-4567");
    assert_eq!(strategy, PhoneStrategy::SpelledOut);
}

#[test]
fn international_numbers_kept_as_matched() {
    assert_eq!(
        extract_phone("call +1 555 123 4567 anytime").as_deref(),
        Some("+1 555 123 4567")
    );
}

#[test]
fn short_digit_runs_are_not_phones() {
    assert_eq!(extract_phone("my pin is 1234"), None);
    assert_eq!(extract_phone("room 555"), None);
}

#[test]
fn normalizer_agrees_with_cascade_on_ten_digits() {
    for raw in ["5551234567", "(555)123-4567", "555.123.4567"] {
        assert_eq!(normalize_phone(raw), extract_phone(raw), "raw: {raw}");
    }
}

// ------------------------------------------------------------ candidate

#[test]
fn process_message_handles_both_fields() {
    let candidate = process_message("email a@b.co, phone 555-123-4567");
    assert_eq!(candidate.email.as_deref(), Some("a@b.co"));
    assert_eq!(candidate.phone.as_deref(), Some("555-123-4567"));
    assert!(candidate.has_contact_info);
    assert!(!candidate.needs_clarification);
}

#[test]
fn process_message_never_throws_on_degenerate_input() {
    for text in ["", " ", "@", ".", "at dot", "\u{0}\u{0}"] {
        let candidate = process_message(text);
        assert!(!candidate.has_contact_info, "text: {text:?}");
        assert!(candidate.needs_clarification);
    }
}

#[test]
fn needs_clarification_iff_both_fields_absent() {
    let none = process_message("just saying hi");
    assert!(none.needs_clarification);

    let email_only = process_message("a@b.co");
    assert!(!email_only.needs_clarification);

    let phone_only = process_message("555-123-4567");
    assert!(!phone_only.needs_clarification);
}
