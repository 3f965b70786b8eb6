mod common;

use common::FixedDetector;
use relaybot::language::{
    detect_or_default, to_iso639_1, LanguageDetector, WhatlangDetector, DEFAULT_LANGUAGE,
};

#[test]
fn test_default_substituted_when_detection_fails() {
    let detector = FixedDetector(None);
    assert_eq!(detect_or_default(&detector, "???", DEFAULT_LANGUAGE), "hi");
}

#[test]
fn test_blank_code_counts_as_failure() {
    let detector = FixedDetector(Some("  "));
    assert_eq!(detect_or_default(&detector, "text", "ta"), "ta");
}

#[test]
fn test_detected_code_is_used() {
    let detector = FixedDetector(Some("te"));
    assert_eq!(detect_or_default(&detector, "text", DEFAULT_LANGUAGE), "te");
}

#[test]
fn test_whatlang_detects_english() {
    let detected = WhatlangDetector::new()
        .detect("The quick brown fox jumps over the lazy dog while the farmer watches from the field.");
    assert_eq!(detected.as_deref(), Some("en"));
}

#[test]
fn test_whatlang_gives_up_on_empty_text() {
    assert_eq!(WhatlangDetector::new().detect(""), None);
}

#[test]
fn test_iso_mapping() {
    assert_eq!(to_iso639_1("hin"), "hi");
    assert_eq!(to_iso639_1("mar"), "mr");
    assert_eq!(to_iso639_1("tam"), "ta");
    assert_eq!(to_iso639_1("tel"), "te");
    assert_eq!(to_iso639_1("xyz"), "xyz");
}
