//! Interactive commands: parsing and plain-text rendering.
//!
//! Styling is left to the binary so everything here can be asserted on.

use crate::core::engine::MajorEngine;
use crate::core::types::{is_digit_string, Segment};
use crate::error::CommandError;
use crate::persistence::SnapshotStore;
use std::fmt::Write;

/// Words shown by `samples`.
pub const SAMPLE_WORDS: &[&str] = &[
    "casa", "zerbino", "scienza", "gatto", "gnomo", "figlio", "ciao", "chiave", "matta", "palla",
    "carro", "glifo", "glicerina", "aglio", "cuore", "quadro", "soqquadro", "acqua",
];

const RULE: &str = "============================================================";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A bare digit string.
    Lookup(String),
    Test(String),
    Explain(String),
    Samples,
    Stats,
    Help,
    Quit,
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

impl Command {
    /// Parses one input line. Blank input is `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        if is_digit_string(input) {
            return Ok(Some(Self::Lookup(input.to_string())));
        }

        let (head, rest) = match input.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (input, ""),
        };

        let command = match head.to_lowercase().as_str() {
            "q" | "quit" | "exit" | "esci" if rest.is_empty() => Self::Quit,
            "test" => Self::Test(word_argument(rest, "test <word>")?),
            "explain" | "why" => Self::Explain(word_argument(rest, "explain <word>")?),
            "samples" | "examples" => Self::Samples,
            "stats" | "info" => Self::Stats,
            "help" | "?" => Self::Help,
            _ => return Err(CommandError::Unrecognized(input.to_string())),
        };
        Ok(Some(command))
    }

    pub fn execute<S: SnapshotStore>(&self, engine: &MajorEngine<S>) -> Outcome {
        let text = match self {
            Self::Lookup(digits) => {
                render_lookup(digits, &engine.lookup(digits), engine.config().max_results)
            }
            Self::Test(word) => render_test(word, engine.encode(word).as_ref().map(|e| e.as_str())),
            Self::Explain(word) => render_explain(word, &engine.encoder.segments(word)),
            Self::Samples => render_samples(|w| engine.encode(w).map(|e| e.to_string())),
            Self::Stats => format!(
                "{} sequences, {} words.",
                engine.index().sequence_count(),
                engine.index().word_count()
            ),
            Self::Help => HELP.to_string(),
            Self::Quit => return Outcome::Quit,
        };
        Outcome::Print(text)
    }
}

fn word_argument(rest: &str, usage: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { usage })
    } else {
        Ok(rest.to_string())
    }
}

pub const HELP: &str = "\
Commands:
  <number>          list the words that encode to <number>
  test <word>       show the number for a word, even an invented one
  explain <word>    show how each part of <word> was read
  samples           encode a few sample words
  stats             number of sequences and words loaded
  help              this message
  q, quit, exit     leave";

/// Header, numbered list truncated at `limit`, and a count of the rest.
pub fn render_lookup(digits: &str, words: &[String], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Number: {}", digits);
    let _ = writeln!(out, "Words found: {}", words.len());
    let _ = write!(out, "{}", RULE);

    if words.is_empty() {
        out.push_str("\nNo words match this number.");
        return out;
    }
    for (i, word) in words.iter().take(limit).enumerate() {
        let _ = write!(out, "\n{:3}. {}", i + 1, word);
    }
    if words.len() > limit {
        let _ = write!(out, "\n\n... and {} more.", words.len() - limit);
    }
    out
}

pub fn render_test(word: &str, encoding: Option<&str>) -> String {
    match encoding {
        Some(digits) => format!("'{}' -> {}", word, digits),
        None => format!("'{}' produces no number (only vowels?)", word),
    }
}

pub fn render_explain(word: &str, segments: &[Segment]) -> String {
    let mut out = format!("'{}':", word);
    for segment in segments {
        let reading = match (segment.digit, segment.rule) {
            (Some(digit), Some(rule)) if segment.emitted => format!("{} ({})", digit, rule),
            (Some(digit), Some(rule)) => format!("{} ({}, repeated, dropped)", digit, rule),
            _ => "-".to_string(),
        };
        let _ = write!(out, "\n  {:<4} {}", segment.grapheme, reading);
    }
    out
}

pub fn render_samples<F>(encode: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    SAMPLE_WORDS
        .iter()
        .map(|word| {
            let digits = encode(*word).unwrap_or_else(|| "-".to_string());
            format!("{:12} -> {}", word, digits)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
