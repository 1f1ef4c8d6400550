// File: src/error.rs
use std::path::PathBuf;

/// Failures of the lexicon cache snapshot. Never fatal: the engine falls back
/// to rebuilding from the dictionary.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("I/O error on cache snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache snapshot could not be encoded or decoded: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("could not replace cache snapshot: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("cache snapshot has format {found}, expected {expected}")]
    UnsupportedFormat { found: u32, expected: u32 },
}

/// A snapshot key that is empty or not made of ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a digit sequence")]
pub struct InvalidEncoding(pub String);

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("could not read dictionary '{}': {source}", .path.display())]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Malformed interactive input. The message doubles as the usage hint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Usage: {usage}")]
    MissingArgument { usage: &'static str },
    #[error("'{0}' is not a command. Enter a number, 'test <word>', or 'help'.")]
    Unrecognized(String),
}
