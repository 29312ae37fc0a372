//! Type-safe player identifier.
//!
//! [`AllyCode`] wraps the nine-digit code the game assigns to every player.
//! The stats provider sends it as a JSON number, players usually write it
//! as `123-456-789`; both normalize to the same value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WatchError;

/// Number of digits in a valid ally code.
pub const ALLY_CODE_DIGITS: usize = 9;

/// Unique identifier for a player.
///
/// Stored as its canonical nine-digit string, which is also the partition
/// key of [`super::CharacterRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AllyCode(String);

impl AllyCode {
    /// Parses an ally code, ignoring `-` separators and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::InvalidAllyCode`] unless exactly nine digits
    /// remain.
    pub fn parse(raw: &str) -> Result<Self, WatchError> {
        let digits: String = raw.trim().chars().filter(|c| *c != '-').collect();
        if digits.len() != ALLY_CODE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(WatchError::InvalidAllyCode(raw.to_string()));
        }
        Ok(Self(digits))
    }

    /// Builds an ally code from its numeric wire form.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::InvalidAllyCode`] if the number has more than
    /// nine digits.
    pub fn from_number(value: u64) -> Result<Self, WatchError> {
        Self::parse(&format!("{value:09}"))
    }

    /// Returns the canonical nine-digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric form expected by the stats provider.
    #[must_use]
    pub fn as_number(&self) -> u64 {
        self.0.parse().unwrap_or_default()
    }
}

impl fmt::Display for AllyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AllyCode {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AllyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Accepts either a JSON number or a string.
impl<'de> Deserialize<'de> for AllyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from_number(n),
            Raw::Text(s) => Self::parse(&s),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_dashes() {
        let Ok(code) = AllyCode::parse("123-456-789") else {
            panic!("valid ally code");
        };
        assert_eq!(code.as_str(), "123456789");
        assert_eq!(code.as_number(), 123_456_789);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(AllyCode::parse("12345678").is_err());
        assert!(AllyCode::parse("1234567890").is_err());
        assert!(AllyCode::parse("").is_err());
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert!(AllyCode::parse("12345678a").is_err());
    }

    #[test]
    fn from_number_pads_leading_zeros() {
        let Ok(code) = AllyCode::from_number(12_345_678) else {
            panic!("valid ally code");
        };
        assert_eq!(code.to_string(), "012345678");
    }

    #[test]
    fn deserializes_number_and_string() {
        let Ok(from_num) = serde_json::from_str::<AllyCode>("123456789") else {
            panic!("number form");
        };
        let Ok(from_str) = serde_json::from_str::<AllyCode>("\"123-456-789\"") else {
            panic!("string form");
        };
        assert_eq!(from_num, from_str);
    }

    #[test]
    fn deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<AllyCode>("\"nope\"").is_err());
        assert!(serde_json::from_str::<AllyCode>("true").is_err());
    }

    #[test]
    fn serializes_as_string() {
        let Ok(code) = AllyCode::parse("123456789") else {
            panic!("valid ally code");
        };
        let json = serde_json::to_string(&code).unwrap_or_default();
        assert_eq!(json, "\"123456789\"");
    }
}
