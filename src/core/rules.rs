//! The Italian Major System rule table.
//!
//! Each [`Rule`] is a window of character classes plus the digit it stands
//! for. A rule matches at a position when every upcoming character belongs to
//! the class at the same offset, and it consumes exactly its window.
//!
//! # Rule order
//!
//! [`RULES`] is scanned front to back and the first match wins, so longer
//! graphemes come before the single letters they start with: `gl` + vowel
//! before `g`, `sc` + front vowel before `s`, `gn`/`ch`/`gh` before the soft
//! `c`/`g` digraphs, and all of them before the single-letter fallback.
//!
//! | Digit | Sounds |
//! |-------|--------|
//! | 0 | s, z, sc(e/i) |
//! | 1 | t, d |
//! | 2 | n, gn |
//! | 3 | m |
//! | 4 | r |
//! | 5 | l, gl + vowel |
//! | 6 | soft c/g (ce, ci, ge, gi), j |
//! | 7 | hard c/g (ch, gh, c, g), k, q |
//! | 8 | f, v |
//! | 9 | p, b |

use super::types::Digit;

/// Characters accepted at one offset of a rule window.
pub type CharClass = &'static [char];

/// Vowels that merge with a preceding `gl` into one sound.
pub const GL_VOWELS: CharClass = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Vowels that soften a preceding `c`, `g` or `sc`.
pub const FRONT_VOWELS: CharClass = &['e', 'i'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub window: &'static [CharClass],
    pub digit: Digit,
}

impl Rule {
    const fn new(name: &'static str, window: &'static [CharClass], digit: u8) -> Self {
        Self {
            name,
            window,
            digit: Digit::new(digit),
        }
    }

    /// Number of characters consumed on a match.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Does the window match `chars` starting at `pos`?
    #[inline]
    pub fn matches_at(&self, chars: &[char], pos: usize) -> bool {
        match chars.get(pos..pos + self.len()) {
            Some(upcoming) => self
                .window
                .iter()
                .zip(upcoming)
                .all(|(class, c)| class.contains(c)),
            None => false,
        }
    }
}

pub static RULES: &[Rule] = &[
    // Trigraphs
    Rule::new("gl+vowel", &[&['g'], &['l'], GL_VOWELS], 5),
    Rule::new("sc+e/i", &[&['s'], &['c'], FRONT_VOWELS], 0),
    // Consonant digraphs
    Rule::new("gn", &[&['g'], &['n']], 2),
    Rule::new("ch", &[&['c'], &['h']], 7),
    Rule::new("gh", &[&['g'], &['h']], 7),
    // Soft c/g
    Rule::new("c/g+e/i", &[&['c', 'g'], FRONT_VOWELS], 6),
    // Single letters
    Rule::new("s/z", &[&['s', 'z']], 0),
    Rule::new("t/d", &[&['t', 'd']], 1),
    Rule::new("n", &[&['n']], 2),
    Rule::new("m", &[&['m']], 3),
    Rule::new("r", &[&['r']], 4),
    Rule::new("l", &[&['l']], 5),
    // Reached only when no front vowel follows: end of word or a hard context.
    Rule::new("hard c/g", &[&['c', 'g']], 7),
    Rule::new("j", &[&['j']], 6),
    Rule::new("k/q", &[&['k', 'q']], 7),
    Rule::new("f/v", &[&['f', 'v']], 8),
    Rule::new("p/b", &[&['p', 'b']], 9),
];

/// First rule matching at `pos`, if any.
#[inline]
pub fn match_at(rules: &'static [Rule], chars: &[char], pos: usize) -> Option<&'static Rule> {
    rules.iter().find(|rule| rule.matches_at(chars, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn table_is_longest_first() {
        let lengths: Vec<usize> = RULES.iter().map(Rule::len).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]), "{:?}", lengths);
        assert!(RULES.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn window_must_fit_in_word() {
        let gl = &RULES[0];
        assert!(gl.matches_at(&chars("glia"), 0));
        assert!(!gl.matches_at(&chars("gl"), 0));
        assert!(!gl.matches_at(&chars("glt"), 0));
        assert!(!gl.matches_at(&chars("a"), 5));
    }

    #[test]
    fn first_match_wins() {
        let word = chars("gnocchi");
        assert_eq!(match_at(RULES, &word, 0).map(|r| r.name), Some("gn"));
        assert_eq!(match_at(RULES, &word, 3).map(|r| r.name), Some("hard c/g"));
        assert_eq!(match_at(RULES, &word, 4).map(|r| r.name), Some("ch"));
        assert_eq!(match_at(RULES, &word, 6), None);
    }

    #[test]
    fn soft_and_hard_c() {
        assert_eq!(match_at(RULES, &chars("ce"), 0).map(|r| r.digit.value()), Some(6));
        assert_eq!(match_at(RULES, &chars("ca"), 0).map(|r| r.digit.value()), Some(7));
        assert_eq!(match_at(RULES, &chars("c"), 0).map(|r| r.digit.value()), Some(7));
        assert_eq!(match_at(RULES, &chars("sci"), 0).map(|r| r.digit.value()), Some(0));
        assert_eq!(match_at(RULES, &chars("sca"), 0).map(|r| r.name), Some("s/z"));
    }
}
