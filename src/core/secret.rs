//! HMAC secret strength estimation.
//!
//! Entropy is estimated from the character classes present in the secret:
//! the size of the union of those classes is taken as the alphabet, and
//! every character is assumed to be drawn uniformly from it. This is an
//! upper bound, not a measurement; dictionary words score far higher
//! than they deserve.

use std::fmt;

use serde::Serialize;

use crate::core::algorithm::JwsAlgorithm;

const LOWERCASE_POOL: u32 = 26;
const UPPERCASE_POOL: u32 = 26;
const DIGIT_POOL: u32 = 10;
/// ASCII punctuation plus space.
const SYMBOL_POOL: u32 = 33;
const NON_ASCII_POOL: u32 = 128;

/// Coarse strength rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl Strength {
    fn from_bits(bits: f64) -> Self {
        if bits < 64.0 {
            Self::Weak
        } else if bits < 128.0 {
            Self::Moderate
        } else if bits < 256.0 {
            Self::Strong
        } else {
            Self::VeryStrong
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::VeryStrong => "very strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The character classes found in a secret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CharacterClasses {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub non_ascii: bool,
}

impl CharacterClasses {
    fn of(secret: &str) -> Self {
        secret.chars().fold(Self::default(), |mut classes, c| {
            match c {
                'a'..='z' => classes.lowercase = true,
                'A'..='Z' => classes.uppercase = true,
                '0'..='9' => classes.digits = true,
                c if c.is_ascii() => classes.symbols = true,
                _ => classes.non_ascii = true,
            }
            classes
        })
    }

    /// Size of the combined alphabet.
    pub fn pool_size(&self) -> u32 {
        [
            (self.lowercase, LOWERCASE_POOL),
            (self.uppercase, UPPERCASE_POOL),
            (self.digits, DIGIT_POOL),
            (self.symbols, SYMBOL_POOL),
            (self.non_ascii, NON_ASCII_POOL),
        ]
        .into_iter()
        .filter_map(|(present, size)| present.then_some(size))
        .sum()
    }
}

/// Strength assessment of a secret.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretReport {
    /// Length in characters.
    pub length: usize,
    /// Length in bytes, which is what an HMAC key is measured in.
    pub byte_length: usize,
    pub classes: CharacterClasses,
    pub pool_size: u32,
    /// Estimated entropy in bits.
    pub entropy_bits: f64,
    pub strength: Strength,
    /// The algorithm the secret was checked against, if any.
    pub algorithm: Option<JwsAlgorithm>,
    /// Recommended minimum byte length for that algorithm.
    pub recommended_bytes: Option<usize>,
}

impl SecretReport {
    /// Whether the secret is shorter than the algorithm's digest size.
    pub fn is_too_short(&self) -> bool {
        self.recommended_bytes
            .is_some_and(|recommended| self.byte_length < recommended)
    }
}

/// Estimate entropy in bits for `secret`.
pub fn estimate_entropy(secret: &str) -> f64 {
    let pool = CharacterClasses::of(secret).pool_size();
    if pool == 0 {
        return 0.0;
    }
    secret.chars().count() as f64 * f64::from(pool).log2()
}

/// Assess a secret, optionally against an HMAC algorithm's key length.
pub fn assess_secret(secret: &str, algorithm: Option<JwsAlgorithm>) -> SecretReport {
    let classes = CharacterClasses::of(secret);
    let entropy_bits = estimate_entropy(secret);
    SecretReport {
        length: secret.chars().count(),
        byte_length: secret.len(),
        classes,
        pool_size: classes.pool_size(),
        entropy_bits,
        strength: Strength::from_bits(entropy_bits),
        algorithm,
        recommended_bytes: algorithm.and_then(JwsAlgorithm::recommended_secret_len),
    }
}
