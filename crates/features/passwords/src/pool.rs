//! # Character Pools
//!
//! Character-class definitions shared by generation, scoring, and
//! validation.
//!
//! Generation draws from a reduced "safe" special set that survives
//! copy/paste and shell quoting; classification recognizes the full
//! 32-character ASCII punctuation space, because scoring must credit any
//! special character a user actually typed. Both sets live here so the
//! asymmetry stays explicit.

use bitflags::bitflags;

/// Uppercase class pool.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase class pool.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Digit class pool.
pub const DIGITS: &str = "0123456789";

/// Safe special-character set used for generation.
pub const SAFE_SPECIAL: &str = "!@#$%^&*-_=+[]{}|;:,.<>?";

const AMBIGUOUS_UPPER: &[char] = &['I', 'O'];
const AMBIGUOUS_LOWER: &[char] = &['i', 'l', 'o'];
const AMBIGUOUS_DIGITS: &[char] = &['0', '1'];

bitflags! {
    /// Selection of character classes for a generation request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CharacterClasses: u8 {
        const UPPER = 1;
        const LOWER = 1 << 1;
        const DIGIT = 1 << 2;
        const SPECIAL = 1 << 3;
    }
}

/// A single character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Upper,
    Lower,
    Digit,
    Special,
}

impl CharacterClass {
    /// All classes in their fixed seed order: upper, lower, digit, special.
    pub const ORDERED: [Self; 4] = [Self::Upper, Self::Lower, Self::Digit, Self::Special];

    const fn flag(self) -> CharacterClasses {
        match self {
            Self::Upper => CharacterClasses::UPPER,
            Self::Lower => CharacterClasses::LOWER,
            Self::Digit => CharacterClasses::DIGIT,
            Self::Special => CharacterClasses::SPECIAL,
        }
    }

    /// The class pool, with glyphs confused at a glance removed when
    /// `exclude_ambiguous` is set. The special class is never filtered.
    fn chars(self, exclude_ambiguous: bool) -> String {
        let (chars, ambiguous): (&str, &[char]) = match self {
            Self::Upper => (UPPERCASE, AMBIGUOUS_UPPER),
            Self::Lower => (LOWERCASE, AMBIGUOUS_LOWER),
            Self::Digit => (DIGITS, AMBIGUOUS_DIGITS),
            Self::Special => (SAFE_SPECIAL, &[]),
        };

        if exclude_ambiguous {
            chars.chars().filter(|c| !ambiguous.contains(c)).collect()
        } else {
            chars.to_owned()
        }
    }
}

/// Class pools for one generation request.
#[derive(Debug, Clone)]
pub struct PoolSet {
    class_pools: Vec<(CharacterClass, String)>,
    union: String,
}

impl PoolSet {
    /// Pools of the enabled classes, in fixed seed order.
    #[must_use]
    pub fn class_pools(&self) -> &[(CharacterClass, String)] {
        &self.class_pools
    }

    /// Union of all enabled class pools. Never empty.
    #[must_use]
    pub fn union(&self) -> &str {
        &self.union
    }
}

/// Builds the pools for the enabled classes.
///
/// With `exclude_ambiguous`, the glyphs `I O i l o 0 1` are removed from
/// their classes. An empty selection falls back to the union of the upper,
/// lower, and digit pools, so the union pool is never empty.
#[must_use]
pub fn build_pool(classes: CharacterClasses, exclude_ambiguous: bool) -> PoolSet {
    let mut class_pools = Vec::new();

    for class in CharacterClass::ORDERED {
        if classes.contains(class.flag()) {
            class_pools.push((class, class.chars(exclude_ambiguous)));
        }
    }

    let union = if class_pools.is_empty() {
        [CharacterClass::Upper, CharacterClass::Lower, CharacterClass::Digit]
            .into_iter()
            .map(|class| class.chars(exclude_ambiguous))
            .collect()
    } else {
        class_pools.iter().map(|(_, pool)| pool.as_str()).collect()
    };

    PoolSet { class_pools, union }
}

/// `true` if the password contains an uppercase ASCII letter.
#[must_use]
pub fn has_upper(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

/// `true` if the password contains a lowercase ASCII letter.
#[must_use]
pub fn has_lower(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

/// `true` if the password contains an ASCII digit.
#[must_use]
pub fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

/// `true` if the password contains a special character.
///
/// Classification covers the full 32-character ASCII punctuation space, not
/// just the reduced generation set.
#[must_use]
pub fn has_special(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_punctuation())
}
