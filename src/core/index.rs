// --- File: src/core/index.rs
use crate::core::converter::PhoneticEncoder;
use crate::core::types::Encoding;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reverse lexicon: encoding -> dictionary words sharing it.
///
/// Buckets keep dictionary order; [`LexiconIndex::lookup`] sorts on the way
/// out. Only words with an encoding are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconIndex {
    buckets: HashMap<Encoding, Vec<String>>,
}

impl LexiconIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from a one-word-per-line source.
    ///
    /// Lines are trimmed and blank lines skipped. A read error (including
    /// invalid UTF-8) aborts the whole build.
    pub fn build<R: BufRead>(encoder: &PhoneticEncoder, reader: R) -> io::Result<Self> {
        let mut index = Self::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            index.insert_with(encoder, word);
        }
        Ok(index)
    }

    pub fn from_path(encoder: &PhoneticEncoder, path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::build(encoder, BufReader::new(file))
    }

    /// Encodes `word` and appends it to its bucket. Returns the encoding, or
    /// `None` (and stores nothing) when the word has none.
    pub fn insert_with(&mut self, encoder: &PhoneticEncoder, word: &str) -> Option<Encoding> {
        let encoding = encoder.encode(word)?;
        self.buckets
            .entry(encoding.clone())
            .or_default()
            .push(word.to_string());
        Some(encoding)
    }

    pub fn insert(&mut self, word: &str) -> Option<Encoding> {
        self.insert_with(&PhoneticEncoder::new(), word)
    }

    /// Words whose encoding is exactly `digits`, sorted. Empty when none.
    pub fn lookup(&self, digits: &str) -> Vec<String> {
        let mut words = self.bucket(digits).map(<[String]>::to_vec).unwrap_or_default();
        words.sort();
        words
    }

    /// The raw bucket for `digits`, in dictionary order.
    pub fn bucket(&self, digits: &str) -> Option<&[String]> {
        self.buckets.get(digits).map(Vec::as_slice)
    }

    pub fn encodings(&self) -> impl Iterator<Item = &Encoding> {
        self.buckets.keys()
    }

    /// Number of distinct digit sequences.
    pub fn sequence_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn word_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn build(text: &str) -> LexiconIndex {
        LexiconIndex::build(&PhoneticEncoder::new(), Cursor::new(text)).unwrap()
    }

    #[test]
    fn groups_words_by_encoding() {
        let index = build("casa\nchiesa\ngatto\nzerbino\n");
        assert_eq!(index.lookup("70"), vec!["casa", "chiesa"]);
        assert_eq!(index.lookup("71"), vec!["gatto"]);
        assert_eq!(index.sequence_count(), 3);
        assert_eq!(index.word_count(), 4);
    }

    #[test]
    fn skips_blank_lines_and_vowel_only_words() {
        let index = build("\n   \nai\ncasa\n\n\teo\n");
        assert_eq!(index.word_count(), 1);
        assert_eq!(index.lookup("70"), vec!["casa"]);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let index = build("  casa \r\n\tgatto\t\n");
        assert_eq!(index.lookup("70"), vec!["casa"]);
        assert_eq!(index.lookup("71"), vec!["gatto"]);
    }

    #[test]
    fn bucket_keeps_source_order_and_lookup_sorts() {
        let index = build("chiesa\ncasa\nCosa\n");
        assert_eq!(index.bucket("70").unwrap(), ["chiesa", "casa", "Cosa"]);
        assert_eq!(index.lookup("70"), vec!["Cosa", "casa", "chiesa"]);
    }

    #[test]
    fn unknown_sequence_is_empty() {
        let index = build("casa\n");
        assert!(index.lookup("123456").is_empty());
        assert!(index.lookup("").is_empty());
        assert!(index.bucket("9").is_none());
    }

    #[test]
    fn every_word_lives_in_its_own_bucket() {
        let encoder = PhoneticEncoder::new();
        let words = ["figlio", "aglio", "gnomo", "pesce", "acqua", "soqquadro"];
        let index = build(&words.join("\n"));
        for word in words {
            let encoding = encoder.encode(word).unwrap();
            assert!(index.lookup(encoding.as_str()).contains(&word.to_string()));
        }
        let total: usize = index
            .encodings()
            .map(|e| index.bucket(e.as_str()).unwrap().len())
            .sum();
        assert_eq!(total, words.len());
    }

    #[test]
    fn invalid_utf8_aborts_build() {
        let bytes: &[u8] = b"casa\n\xff\xfe\ngatto\n";
        let result = LexiconIndex::build(&PhoneticEncoder::new(), Cursor::new(bytes));
        assert!(result.is_err());
    }

    #[test]
    fn insert_reports_encoding() {
        let mut index = LexiconIndex::new();
        assert_eq!(index.insert("matta").map(|e| e.to_string()), Some("31".to_string()));
        assert_eq!(index.insert("aia"), None);
        assert_eq!(index.word_count(), 1);
    }
}
