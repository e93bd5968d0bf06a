// Reversible per-byte additive shift over the 256-value byte alphabet.
// Security through obscurity only: no diffusion, no chaining, and a seed
// space of 9000 values. Stated as such to the user; do not mistake this
// for encryption.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Four-digit shift key accepted at the boundary. The transform itself is
/// total over any integer shift; this type is the [1000, 9999] gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(u16);

pub const SEED_MIN: u16 = 1000;
pub const SEED_MAX: u16 = 9999;

impl Seed {
    pub fn new(value: u16) -> Result<Self, SeedError> {
        if (SEED_MIN..=SEED_MAX).contains(&value) {
            Ok(Seed(value))
        } else {
            Err(SeedError::OutOfRange(value as i64))
        }
    }

    pub fn shift(self) -> i64 {
        self.0 as i64
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SeedError::NotFourDigits(s.to_string()));
        }
        // Four ASCII digits always parse; "0999" passes here and is
        // rejected by the range check.
        let value: u16 = s.parse().map_err(|_| SeedError::NotFourDigits(s.to_string()))?;
        Seed::new(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("seed must be exactly four decimal digits, got '{0}'")]
    NotFourDigits(String),
    #[error("seed {0} is outside the range {SEED_MIN}..={SEED_MAX}")]
    OutOfRange(i64),
}

#[derive(Error, Debug)]
pub enum CodecError {
    /// The shifted-back bytes are not valid UTF-8. This is what a wrong
    /// seed (or a file that was never obscured) looks like.
    #[error("result is not valid UTF-8 text: wrong seed or corrupted content")]
    Decode(#[from] std::string::FromUtf8Error),
}

/// Forward transform: UTF-8 bytes of `content`, each shifted by
/// `(b + shift) mod 256`. Output length equals the UTF-8 byte length of
/// the input. Infallible: a `&str` is always encodable.
pub fn obscure(content: &str, shift: i64) -> Vec<u8> {
    content
        .as_bytes()
        .iter()
        .map(|&b| (b as i64 + shift).rem_euclid(256) as u8)
        .collect()
}

/// Inverse transform: `(b - shift) mod 256` per byte, then UTF-8 decode.
/// `rem_euclid` keeps the intermediate in [0, 255] even when the
/// subtraction goes negative or the shift exceeds 255; Rust's `%` would
/// not, and the round-trip law depends on it.
pub fn deobscure(content: &[u8], shift: i64) -> Result<String, CodecError> {
    let bytes: Vec<u8> = content
        .iter()
        .map(|&b| (b as i64 - shift).rem_euclid(256) as u8)
        .collect();
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_ascii() {
        let plain = "def main():\n    return 42\n";
        let out = obscure(plain, 4711);
        assert_eq!(deobscure(&out, 4711).unwrap(), plain);
    }

    #[test]
    fn round_trip_multibyte() {
        let plain = "# grüße aus köln — 日本語 🦀";
        for shift in [1000i64, 1234, 5000, 9999] {
            let out = obscure(plain, shift);
            assert_eq!(out.len(), plain.len()); // str::len is byte length
            assert_eq!(deobscure(&out, shift).unwrap(), plain);
        }
    }

    #[test]
    fn round_trip_empty() {
        assert_eq!(obscure("", 1234), Vec::<u8>::new());
        assert_eq!(deobscure(&[], 1234).unwrap(), "");
    }

    #[test]
    fn boundary_seeds_are_reversible() {
        let plain = "print('hi')";
        for shift in [SEED_MIN as i64, SEED_MAX as i64] {
            assert_eq!(deobscure(&obscure(plain, shift), shift).unwrap(), plain);
        }
    }

    #[test]
    fn known_vector_seed_1234() {
        // (b + 1234) % 256 per byte; 1234 % 256 == 210.
        let out = obscure("print('hi')", 1234);
        assert_eq!(out, [66, 68, 59, 64, 70, 250, 249, 58, 59, 249, 251]);
        assert_eq!(deobscure(&out, 1234).unwrap(), "print('hi')");
    }

    #[test]
    fn shift_only_matters_mod_256() {
        let plain = "print('hi')";
        assert_eq!(obscure(plain, 1234), obscure(plain, 1234 + 256));
        assert_eq!(obscure(plain, 1234), obscure(plain, 1234 - 256));
    }

    #[test]
    fn negative_intermediate_stays_in_byte_range() {
        // shift far above 255 forces the subtraction negative for every
        // byte; rem_euclid must still land in [0, 255].
        let out = obscure("a", 9999);
        assert_eq!(deobscure(&out, 9999).unwrap(), "a");
    }

    #[test]
    fn wrong_seed_never_silently_round_trips() {
        let plain = "import os\nprint(os.getcwd())\n";
        let out = obscure(plain, 4242);
        // 4243 is not congruent to 4242 mod 256, so the result must be an
        // error or a different string, never the original.
        match deobscure(&out, 4243) {
            Ok(s) => assert_ne!(s, plain),
            Err(CodecError::Decode(_)) => {}
        }
    }

    #[test]
    fn seed_parsing() {
        assert_eq!("1234".parse::<Seed>().unwrap(), Seed::new(1234).unwrap());
        assert_eq!(" 9999 ".parse::<Seed>().unwrap().shift(), 9999);
        assert!(matches!("999".parse::<Seed>(), Err(SeedError::NotFourDigits(_))));
        assert!(matches!("12a4".parse::<Seed>(), Err(SeedError::NotFourDigits(_))));
        assert!(matches!("12345".parse::<Seed>(), Err(SeedError::NotFourDigits(_))));
        assert!(matches!("0999".parse::<Seed>(), Err(SeedError::OutOfRange(999))));
        assert!(matches!("-123".parse::<Seed>(), Err(SeedError::NotFourDigits(_))));
    }

    #[test]
    fn seed_display_is_four_digits() {
        assert_eq!(Seed::new(1000).unwrap().to_string(), "1000");
    }
}
