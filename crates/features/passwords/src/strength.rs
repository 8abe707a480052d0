//! # Strength Analysis
//!
//! Rule-based strength scoring plus a combinatorial crack-time estimate.
//!
//! The rules, thresholds, and constants here are an observable contract
//! shared with existing consumers. UIs render the levels, colors, and
//! feedback strings verbatim. Keep them bit-for-bit stable rather than
//! "improving" them.

use crate::pool::{has_digit, has_lower, has_special, has_upper};
use serde::{Deserialize, Serialize};

/// Maximum achievable score.
pub const MAX_SCORE: u8 = 7;

/// Assumed attack rate in guesses per second.
///
/// A modeling assumption for a well-resourced GPU attacker, not a measured
/// fact; part of the estimate's contract.
pub const GUESSES_PER_SECOND: f64 = 1_000_000_000.0;

const KEYBOARD_PATTERNS: [&str; 5] = ["qwerty", "asdfgh", "zxcvbn", "123456", "abcdef"];

/// The eight strength levels, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrengthLevel {
    #[serde(rename = "Very Weak")]
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
    Excellent,
    Perfect,
}

impl StrengthLevel {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
            Self::Excellent => "Excellent",
            Self::Perfect => "Perfect",
        }
    }

    /// Fixed UI color tag.
    #[must_use]
    pub const fn color_tag(self) -> &'static str {
        match self {
            Self::VeryWeak => "red",
            Self::Weak => "orange",
            Self::Fair => "yellow",
            Self::Good => "lime",
            Self::Strong | Self::VeryStrong | Self::Excellent | Self::Perfect => "green",
        }
    }

    const fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Good,
            4 => Self::Strong,
            5 => Self::VeryStrong,
            6 => Self::Excellent,
            _ => Self::Perfect,
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Strength analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthReport {
    /// Additive rule score, clamped to `[0, MAX_SCORE]`.
    pub score: u8,
    /// Always [`MAX_SCORE`]; carried so consumers need no extra constant.
    pub max_score: u8,
    /// Level mapped from the final score.
    pub level: StrengthLevel,
    /// Fixed UI color tag for the level.
    pub color_tag: String,
    /// Actionable feedback, in rule order. Empty for a perfect password.
    pub feedback: Vec<String>,
    /// `round(score / max_score * 100)`.
    pub percentage: u8,
}

/// Scores a password against the fixed rule set.
///
/// Checks run in a fixed order: three length thresholds (8, 12, 16), the
/// four character classes, then two penalties: a character repeated three
/// or more times in a row, and well-known keyboard sequences. The score is
/// additive, penalties floor at zero, and the result maps onto the eight
/// [`StrengthLevel`]s.
#[must_use]
pub fn check_strength(password: &str) -> StrengthReport {
    let mut score: u8 = 0;
    let mut feedback = Vec::new();
    let length = password.chars().count();

    if length >= 8 {
        score += 1;
    } else {
        feedback.push("Password should be at least 8 characters long".to_owned());
    }
    if length >= 12 {
        score += 1;
    }
    if length >= 16 {
        score += 1;
    }

    if has_upper(password) {
        score += 1;
    } else {
        feedback.push("Add uppercase letters (A-Z)".to_owned());
    }
    if has_lower(password) {
        score += 1;
    } else {
        feedback.push("Add lowercase letters (a-z)".to_owned());
    }
    if has_digit(password) {
        score += 1;
    } else {
        feedback.push("Add numbers (0-9)".to_owned());
    }
    if has_special(password) {
        score += 1;
    } else {
        feedback.push("Add special characters (!@#$%^&*)".to_owned());
    }

    if has_repeated_run(password) {
        feedback.push("Avoid repeating characters".to_owned());
        score = score.saturating_sub(1);
    }
    if has_keyboard_pattern(password) {
        feedback.push("Avoid keyboard patterns".to_owned());
        score = score.saturating_sub(1);
    }

    let level = StrengthLevel::from_score(score);

    StrengthReport {
        score,
        max_score: MAX_SCORE,
        level,
        color_tag: level.color_tag().to_owned(),
        feedback,
        percentage: percentage(score),
    }
}

fn has_repeated_run(password: &str) -> bool {
    let mut run = 0u32;
    let mut last = None;

    for c in password.chars() {
        if Some(c) == last {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            last = Some(c);
            run = 1;
        }
    }

    false
}

fn has_keyboard_pattern(password: &str) -> bool {
    let lowered = password.to_lowercase();
    KEYBOARD_PATTERNS.iter().any(|pattern| lowered.contains(pattern))
}

fn percentage(score: u8) -> u8 {
    // round(score / MAX_SCORE * 100) in integer arithmetic
    let pct = (u32::from(score) * 200 + u32::from(MAX_SCORE)) / (2 * u32::from(MAX_SCORE));
    u8::try_from(pct).unwrap_or(100)
}

/// Time units for crack-time display, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    const TABLE: [(Self, f64); 7] = [
        (Self::Year, 31_536_000.0),
        (Self::Month, 2_592_000.0),
        (Self::Week, 604_800.0),
        (Self::Day, 86_400.0),
        (Self::Hour, 3_600.0),
        (Self::Minute, 60.0),
        (Self::Second, 1.0),
    ];

    /// Singular unit name, as rendered in displays.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }
}

/// Combinatorial crack-time estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrackEstimate {
    /// Average-case seconds to crack.
    pub seconds: f64,
    /// Human-readable rendering, e.g. `"3.2 years"`.
    pub display: String,
    /// The unit used for the display.
    pub unit: TimeUnit,
}

/// Estimates the average time to brute-force the password.
///
/// The character space is the sum of the class sizes actually present in the
/// password (26 + 26 + 10 + 32; 94 when none are recognized), the attacker
/// needs `space^length / 2` guesses on average, and the rate is
/// [`GUESSES_PER_SECOND`]. An independence assumption, deliberately simple;
/// the numbers are part of the observable contract.
#[must_use]
pub fn estimate_crack_time(password: &str) -> CrackEstimate {
    let mut space: u32 = 0;
    if has_upper(password) {
        space += 26;
    }
    if has_lower(password) {
        space += 26;
    }
    if has_digit(password) {
        space += 10;
    }
    if has_special(password) {
        space += 32;
    }
    if space == 0 {
        space = 94; // full printable ASCII
    }

    let length = i32::try_from(password.chars().count()).unwrap_or(i32::MAX);
    let combinations = f64::from(space).powi(length);
    let seconds = combinations / 2.0 / GUESSES_PER_SECOND;

    for (unit, threshold) in TimeUnit::TABLE {
        if seconds >= threshold {
            let value = seconds / threshold;
            let plural = if value > 1.0 { "s" } else { "" };
            return CrackEstimate {
                seconds,
                display: format!("{value:.1} {}{plural}", unit.as_str()),
                unit,
            };
        }
    }

    CrackEstimate { seconds, display: "Less than a second".to_owned(), unit: TimeUnit::Second }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_only_password_scores_fair() {
        let report = check_strength("password");

        assert_eq!(report.score, 2);
        assert_eq!(report.level, StrengthLevel::Fair);
        assert_eq!(report.color_tag, "yellow");
        assert_eq!(report.percentage, 29);
        assert_eq!(
            report.feedback,
            vec![
                "Add uppercase letters (A-Z)".to_owned(),
                "Add numbers (0-9)".to_owned(),
                "Add special characters (!@#$%^&*)".to_owned(),
            ]
        );
    }

    #[test]
    fn perfect_password_has_no_feedback() {
        let report = check_strength("Tr0ub4dor&Horse!");

        assert_eq!(report.score, MAX_SCORE);
        assert_eq!(report.level, StrengthLevel::Perfect);
        assert_eq!(report.percentage, 100);
        assert!(report.feedback.is_empty());
    }

    #[test]
    fn repeated_run_costs_exactly_one_point() {
        let with_run = check_strength("Aaaa111!");
        let without_run = check_strength("Aba1212!");

        assert_eq!(without_run.score - 1, with_run.score);
        assert!(with_run.feedback.contains(&"Avoid repeating characters".to_owned()));
        assert!(!without_run.feedback.contains(&"Avoid repeating characters".to_owned()));
    }

    #[test]
    fn keyboard_patterns_are_penalized() {
        let report = check_strength("Qwerty12!@");

        assert!(report.feedback.contains(&"Avoid keyboard patterns".to_owned()));
        assert_eq!(report.score, 4);
    }

    #[test]
    fn penalties_never_push_the_score_below_zero() {
        let report = check_strength("aaa");

        assert_eq!(report.score, 0);
        assert_eq!(report.level, StrengthLevel::VeryWeak);
    }

    #[test]
    fn level_table_is_complete() {
        let labels: Vec<&str> = (0..=MAX_SCORE).map(|s| StrengthLevel::from_score(s).label()).collect();
        assert_eq!(
            labels,
            ["Very Weak", "Weak", "Fair", "Good", "Strong", "Very Strong", "Excellent", "Perfect"]
        );
    }

    #[test]
    fn crack_time_for_lowercase_eight_chars() {
        let estimate = estimate_crack_time("password");

        assert_eq!(estimate.unit, TimeUnit::Minute);
        assert_eq!(estimate.display, "1.7 minutes");
    }

    #[test]
    fn crack_time_below_one_second() {
        let estimate = estimate_crack_time("1");

        assert_eq!(estimate.unit, TimeUnit::Second);
        assert_eq!(estimate.display, "Less than a second");
        assert!(estimate.seconds < 1.0);
    }

    #[test]
    fn crack_time_grows_strictly_with_length() {
        let mut previous = 0.0;

        for length in 8..=24 {
            let estimate = estimate_crack_time(&"a".repeat(length));
            assert!(estimate.seconds > previous, "length {length} must raise the estimate");
            previous = estimate.seconds;
        }
    }

    #[test]
    fn unrecognized_composition_defaults_to_printable_ascii_space() {
        let estimate = estimate_crack_time("пароль");
        let expected = 94f64.powi(6) / 2.0 / GUESSES_PER_SECOND;

        assert!((estimate.seconds - expected).abs() < f64::EPSILON * expected);
    }
}
