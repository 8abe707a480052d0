//! # Password Generation
//!
//! Random password generation with per-class guarantees.
//!
//! Lenient by design: out-of-range lengths are clamped and an empty class
//! selection falls back to a safe alphabet. The strict counterpart (report
//! issues, never clamp) lives in [`crate::policy`].

use crate::pool::{CharacterClasses, build_pool};
use rand::seq::{IndexedRandom, SliceRandom};

/// Minimum password length. Shorter requests are clamped up.
pub const MIN_LENGTH: usize = 8;

/// Maximum password length. Longer requests are clamped down.
pub const MAX_LENGTH: usize = 128;

/// Options for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Requested length, clamped into `[MIN_LENGTH, MAX_LENGTH]`.
    pub length: usize,
    /// Enabled character classes.
    pub classes: CharacterClasses,
    /// Drop the glyphs confused at a glance (`I O i l o 0 1`).
    pub exclude_ambiguous: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { length: 16, classes: CharacterClasses::all(), exclude_ambiguous: false }
    }
}

impl GeneratorOptions {
    /// Builds options from individual class switches.
    #[must_use]
    pub fn from_flags(
        length: usize,
        upper: bool,
        lower: bool,
        digit: bool,
        special: bool,
        exclude_ambiguous: bool,
    ) -> Self {
        let mut classes = CharacterClasses::empty();
        classes.set(CharacterClasses::UPPER, upper);
        classes.set(CharacterClasses::LOWER, lower);
        classes.set(CharacterClasses::DIGIT, digit);
        classes.set(CharacterClasses::SPECIAL, special);

        Self { length, classes, exclude_ambiguous }
    }
}

/// Generates a random password.
///
/// Each enabled class contributes exactly one mandatory character, drawn in
/// fixed order (upper, lower, digit, special) so every requested class is
/// represented regardless of length. The remaining positions are drawn
/// uniformly from the union pool, and the whole sequence is shuffled so the
/// mandatory characters are not predictably placed.
///
/// Every draw uses the thread-local CSPRNG; the generator is deliberately
/// not seedable.
#[must_use]
pub fn generate(options: &GeneratorOptions) -> String {
    let length = options.length.clamp(MIN_LENGTH, MAX_LENGTH);
    let pools = build_pool(options.classes, options.exclude_ambiguous);

    let mut rng = rand::rng();
    let mut chars: Vec<char> = Vec::with_capacity(length);

    for (_, pool) in pools.class_pools() {
        let pool: Vec<char> = pool.chars().collect();
        if let Some(c) = pool.choose(&mut rng) {
            chars.push(*c);
        }
    }

    let union: Vec<char> = pools.union().chars().collect();
    for _ in chars.len()..length {
        if let Some(c) = union.choose(&mut rng) {
            chars.push(*c);
        }
    }

    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{SAFE_SPECIAL, has_digit, has_lower, has_special, has_upper};

    #[test]
    fn zero_length_is_clamped_to_minimum() {
        let password = generate(&GeneratorOptions { length: 0, ..GeneratorOptions::default() });
        assert_eq!(password.chars().count(), MIN_LENGTH);
    }

    #[test]
    fn oversized_length_is_clamped_to_maximum() {
        let password = generate(&GeneratorOptions { length: 9999, ..GeneratorOptions::default() });
        assert_eq!(password.chars().count(), MAX_LENGTH);
    }

    #[test]
    fn every_enabled_class_is_represented() {
        let options = GeneratorOptions { length: 12, ..GeneratorOptions::default() };

        for _ in 0..100 {
            let password = generate(&options);
            assert!(has_upper(&password));
            assert!(has_lower(&password));
            assert!(has_digit(&password));
            assert!(has_special(&password));
        }
    }

    #[test]
    fn single_class_selection_draws_only_from_that_pool() {
        let options = GeneratorOptions::from_flags(16, false, false, true, false, false);
        let password = generate(&options);

        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn empty_selection_falls_back_to_alphanumerics() {
        let options = GeneratorOptions::from_flags(16, false, false, false, false, false);
        let password = generate(&options);

        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn ambiguous_glyphs_are_excluded_on_request() {
        let options = GeneratorOptions { length: 128, exclude_ambiguous: true, ..GeneratorOptions::default() };

        for _ in 0..20 {
            let password = generate(&options);
            for confusable in ['I', 'O', 'i', 'l', 'o', '0', '1'] {
                assert!(!password.contains(confusable), "{confusable} must not be generated");
            }
        }
    }

    #[test]
    fn special_characters_come_from_the_safe_set() {
        let options = GeneratorOptions::from_flags(64, false, false, false, true, false);
        let password = generate(&options);

        assert!(password.chars().all(|c| SAFE_SPECIAL.contains(c)));
    }
}
