use pguard_passwords::prelude::*;
use pguard_passwords::pool::{has_digit, has_lower, has_special, has_upper};

#[test]
fn generated_passwords_always_cover_every_enabled_class() {
    let options = GeneratorOptions { length: 12, ..GeneratorOptions::default() };

    for _ in 0..10_000 {
        let password = generate(&options);

        assert_eq!(password.chars().count(), 12);
        assert!(has_upper(&password), "missing uppercase in {password:?}");
        assert!(has_lower(&password), "missing lowercase in {password:?}");
        assert!(has_digit(&password), "missing digit in {password:?}");
        assert!(has_special(&password), "missing special in {password:?}");
    }
}

#[test]
fn generated_passwords_pass_policy_validation() {
    for _ in 0..100 {
        let password = generate(&GeneratorOptions::default());
        let result = validate(&password);

        assert!(result.is_valid, "generated password failed policy: {:?}", result.issues);
    }
}

#[test]
fn length_bounds_are_enforced_at_the_extremes() {
    let shortest = generate(&GeneratorOptions { length: 0, ..GeneratorOptions::default() });
    let longest = generate(&GeneratorOptions { length: 9999, ..GeneratorOptions::default() });

    assert_eq!(shortest.chars().count(), 8);
    assert_eq!(longest.chars().count(), 128);
}

#[test]
fn generation_is_not_reproducible() {
    let options = GeneratorOptions::default();

    let a = generate(&options);
    let b = generate(&options);

    assert_ne!(a, b, "two generated passwords must not repeat");
}

#[test]
fn longer_passwords_always_take_longer_to_crack() {
    let mut previous = 0.0;

    for length in [8, 12, 16, 24, 48, 128] {
        let estimate = estimate_crack_time(&"aB3!".repeat(length / 4));
        assert!(estimate.seconds > previous);
        previous = estimate.seconds;
    }
}

#[test]
fn strength_report_serializes_for_api_consumers() {
    let report = check_strength("abc");
    let json = serde_json::to_value(&report).expect("report must serialize");

    assert_eq!(json["score"], 1);
    assert_eq!(json["max_score"], 7);
    assert_eq!(json["level"], "Weak");
    assert_eq!(json["color_tag"], "orange");
    assert_eq!(json["percentage"], 14);
    assert_eq!(json["feedback"][0], "Password should be at least 8 characters long");
}

#[test]
fn crack_estimate_serializes_for_api_consumers() {
    let estimate = estimate_crack_time("password");
    let json = serde_json::to_value(&estimate).expect("estimate must serialize");

    assert_eq!(json["display"], "1.7 minutes");
    assert_eq!(json["unit"], "minute");
}

#[test]
fn validation_result_serializes_for_api_consumers() {
    let result = validate("password");
    let json = serde_json::to_value(&result).expect("result must serialize");

    assert_eq!(json["is_valid"], false);
    assert!(
        json["issues"]
            .as_array()
            .expect("issues must be an array")
            .iter()
            .any(|issue| issue == "This password is too common")
    );
}

#[test]
fn end_to_end_generate_score_validate() {
    let options = GeneratorOptions::from_flags(16, true, true, true, true, false);
    let password = generate(&options);

    assert_eq!(password.chars().count(), 16);
    assert!(validate(&password).is_valid);

    let report = check_strength(&password);
    assert!(report.score >= 5, "all-class 16-char password should score high: {report:?}");
    assert_eq!(report.max_score, 7);
}
