use crate::core::rules::{match_at, Rule, RULES};
use crate::core::types::{Digit, Encoding, Segment};

/// Digits emitted so far plus the last-emitted-digit register.
/// Lives for a single scan.
#[derive(Default)]
struct Accumulator {
    digits: String,
    last: Option<Digit>,
}

impl Accumulator {
    /// Appends `digit` unless it repeats the register. Returns whether it was
    /// appended.
    fn push(&mut self, digit: Digit) -> bool {
        if self.last == Some(digit) {
            return false;
        }
        self.digits.push(digit.as_char());
        self.last = Some(digit);
        true
    }

    /// A silent character breaks a run of identical digits.
    fn reset(&mut self) {
        self.last = None;
    }

    fn finish(self) -> Option<Encoding> {
        if self.digits.is_empty() {
            None
        } else {
            Some(Encoding::from_digits(self.digits))
        }
    }
}

/// Converts Italian words to Major System digit strings.
#[derive(Debug, Clone, Copy)]
pub struct PhoneticEncoder {
    rules: &'static [Rule],
}

impl Default for PhoneticEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneticEncoder {
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    /// Encodes a word. Case-insensitive; `None` when the word has no
    /// digit-bearing sound (empty, only vowels, punctuation...).
    pub fn encode(&self, word: &str) -> Option<Encoding> {
        let mut acc = Accumulator::default();
        self.scan(word, &mut acc, |_, _, _| {});
        acc.finish()
    }

    /// The spans the scan consumed, in order, with the rule that matched each
    /// one and whether its digit made it into the encoding.
    pub fn segments(&self, word: &str) -> Vec<Segment> {
        let mut acc = Accumulator::default();
        let mut segments = Vec::new();
        self.scan(word, &mut acc, |span, rule, emitted| {
            segments.push(Segment {
                grapheme: span.iter().collect(),
                rule: rule.map(|r| r.name),
                digit: rule.map(|r| r.digit),
                emitted,
            });
        });
        segments
    }

    fn scan<F>(&self, word: &str, acc: &mut Accumulator, mut visit: F)
    where
        F: FnMut(&[char], Option<&'static Rule>, bool),
    {
        let chars: Vec<char> = word.to_lowercase().chars().collect();
        let mut pos = 0;

        while pos < chars.len() {
            let step = match match_at(self.rules, &chars, pos) {
                Some(rule) => {
                    let emitted = acc.push(rule.digit);
                    visit(&chars[pos..pos + rule.len()], Some(rule), emitted);
                    rule.len()
                }
                None => {
                    acc.reset();
                    visit(&chars[pos..pos + 1], None, false);
                    1
                }
            };
            pos += step;
        }
    }
}

/// Shorthand for `PhoneticEncoder::new().encode(word)`.
pub fn encode(word: &str) -> Option<Encoding> {
    PhoneticEncoder::new().encode(word)
}
