// src/core/types.rs
use crate::error::InvalidEncoding;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// One of the ten phonetic classes of the Major System.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Digit(u8);

impl Digit {
    /// Panics (at compile time, for the static rule table) if `value > 9`.
    pub const fn new(value: u8) -> Self {
        assert!(value < 10, "a Major System digit is in 0..=9");
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The digit string a word encodes to. Never empty: a word without any
/// digit-bearing sound has no encoding at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Encoding(String);

impl TryFrom<String> for Encoding {
    type Error = InvalidEncoding;

    fn try_from(digits: String) -> Result<Self, Self::Error> {
        if is_digit_string(&digits) {
            Ok(Self(digits))
        } else {
            Err(InvalidEncoding(digits))
        }
    }
}

impl From<Encoding> for String {
    fn from(encoding: Encoding) -> Self {
        encoding.0
    }
}

impl Encoding {
    /// Wraps a digit string; `None` when empty or when it contains anything
    /// but ASCII digits.
    pub fn parse(digits: &str) -> Option<Self> {
        if is_digit_string(digits) {
            Some(Self(digits.to_string()))
        } else {
            None
        }
    }

    pub(crate) fn from_digits(digits: String) -> Self {
        debug_assert!(is_digit_string(&digits));
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digits(&self) -> impl Iterator<Item = Digit> + '_ {
        self.0.bytes().map(|b| Digit::new(b - b'0'))
    }
}

impl Borrow<str> for Encoding {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Encoding {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True for a non-empty string made only of `0`-`9`.
pub fn is_digit_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// One span consumed by the encoder, as reported by
/// [`PhoneticEncoder::segments`](crate::core::converter::PhoneticEncoder::segments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// The lowercased characters of the span.
    pub grapheme: String,
    /// Name of the rule that matched, `None` for a silent character.
    pub rule: Option<&'static str>,
    pub digit: Option<Digit>,
    /// False when the digit repeated the previous one and was collapsed.
    pub emitted: bool,
}
