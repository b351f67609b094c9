//! Golden tests for the field validators.
//!
//! Known inputs and verdicts for the customer form's contact fields.

use optika_core::{validate_email, validate_phone};

struct GoldenCase {
    id: &'static str,
    input: &'static str,
    valid: bool,
}

fn phone_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase { id: "athens-landline", input: "2101234567", valid: true },
        GoldenCase { id: "mobile", input: "6971234567", valid: true },
        GoldenCase { id: "mobile-with-spaces", input: "697 123 4567", valid: true },
        GoldenCase { id: "landline-with-dashes", input: "210-123-4567", valid: true },
        GoldenCase { id: "too-short", input: "697123456", valid: false },
        GoldenCase { id: "too-long", input: "69712345678", valid: false },
        GoldenCase { id: "leading-one", input: "1971234567", valid: false },
        GoldenCase { id: "leading-nine", input: "9971234567", valid: false },
        GoldenCase { id: "empty", input: "", valid: false },
        GoldenCase { id: "letters-only", input: "call me", valid: false },
    ]
}

fn email_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase { id: "empty-is-fine", input: "", valid: true },
        GoldenCase { id: "minimal", input: "a@b.co", valid: true },
        GoldenCase { id: "dotted-local", input: "first.last@shop.example.gr", valid: true },
        GoldenCase { id: "plus-tag", input: "maria+orders@example.gr", valid: true },
        GoldenCase { id: "no-tld", input: "a@b", valid: false },
        GoldenCase { id: "no-at", input: "maria.example.gr", valid: false },
        GoldenCase { id: "one-letter-tld", input: "a@b.c", valid: false },
        GoldenCase { id: "space-in-local", input: "ma ria@example.gr", valid: false },
    ]
}

#[test]
fn test_phone_golden_cases() {
    for case in phone_cases() {
        assert_eq!(
            validate_phone(case.input),
            case.valid,
            "phone case {} ({:?})",
            case.id,
            case.input
        );
    }
}

#[test]
fn test_email_golden_cases() {
    for case in email_cases() {
        assert_eq!(
            validate_email(case.input),
            case.valid,
            "email case {} ({:?})",
            case.id,
            case.input
        );
    }
}
