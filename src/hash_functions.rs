//! String hash functions that can be injected into either map

use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use thiserror::Error;

/// Signature shared by every hash function in this module
pub type HashFn = fn(&str) -> usize;

/// Sums the byte values of the key.
///
/// Anagrams collide, which makes this a useful worst case for collision handling.
#[must_use]
pub fn char_sum(key: &str) -> usize {
    key.bytes().fold(0usize, |hash, byte| hash.wrapping_add(usize::from(byte)))
}

/// Sums each byte value weighted by its 1-based position in the key
#[must_use]
pub fn positional_char_sum(key: &str) -> usize {
    key.bytes().zip(1usize..).fold(0usize, |hash, (byte, position)| {
        hash.wrapping_add(position.wrapping_mul(usize::from(byte)))
    })
}

/// Hashes the key with the standard library's `DefaultHasher`
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn std_hash(key: &str) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish() as usize
}

/// Error returned when a hash function name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hash function `{0}` (expected one of: char-sum, positional-char-sum, std)")]
pub struct UnknownHashFunction(pub String);

/// Named selection of the hash functions in this module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunctionKind {
    /// [`char_sum`]
    CharSum,
    /// [`positional_char_sum`]
    PositionalCharSum,
    /// [`std_hash`]
    #[default]
    Std,
}

impl HashFunctionKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 3] = [Self::CharSum, Self::PositionalCharSum, Self::Std];

    /// Returns the hash function this kind names
    #[must_use]
    pub fn function(self) -> HashFn {
        match self {
            Self::CharSum => char_sum,
            Self::PositionalCharSum => positional_char_sum,
            Self::Std => std_hash,
        }
    }

    /// Returns the name accepted by [`FromStr`]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CharSum => "char-sum",
            Self::PositionalCharSum => "positional-char-sum",
            Self::Std => "std",
        }
    }
}

impl fmt::Display for HashFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashFunctionKind {
    type Err = UnknownHashFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownHashFunction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_sum() {
        assert_eq!(char_sum(""), 0);
        assert_eq!(char_sum("a"), 97);
        assert_eq!(char_sum("ab"), 97 + 98);
        assert_eq!(char_sum("ab"), char_sum("ba"));
    }

    #[test]
    fn test_positional_char_sum() {
        assert_eq!(positional_char_sum(""), 0);
        assert_eq!(positional_char_sum("a"), 97);
        assert_eq!(positional_char_sum("ab"), 97 + 2 * 98);
        assert_ne!(positional_char_sum("ab"), positional_char_sum("ba"));
    }

    #[test]
    fn test_std_hash_is_deterministic() {
        assert_eq!(std_hash("key1"), std_hash("key1"));
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("char-sum".parse(), Ok(HashFunctionKind::CharSum));
        assert_eq!("Positional-Char-Sum".parse(), Ok(HashFunctionKind::PositionalCharSum));
        assert_eq!(" std ".parse(), Ok(HashFunctionKind::Std));
        assert_eq!(
            "md5".parse::<HashFunctionKind>(),
            Err(UnknownHashFunction("md5".to_string()))
        );
    }

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in HashFunctionKind::ALL {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }

    #[test]
    fn test_kind_function() {
        assert_eq!((HashFunctionKind::CharSum.function())("abc"), char_sum("abc"));
        assert_eq!(
            (HashFunctionKind::PositionalCharSum.function())("abc"),
            positional_char_sum("abc")
        );
    }

    #[test]
    fn test_unknown_hash_function_message() {
        let err = UnknownHashFunction("fnv".to_string());
        assert!(err.to_string().contains("`fnv`"));
    }
}
