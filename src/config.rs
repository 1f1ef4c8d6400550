// File: src/config.rs
use crate::persistence::cache_path_for;
use std::path::{Path, PathBuf};

pub const DEFAULT_DICTIONARY_PATH: &str = "dizionario.txt";
pub const DEFAULT_MAX_RESULTS: usize = 100;
pub const DICTIONARY_ENV: &str = "MAJOR_DICTIONARY";

/// Runtime settings for the engine and the interactive loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub dictionary_path: PathBuf,
    pub cache_path: PathBuf,
    /// Words shown per lookup before "... and N more".
    pub max_results: usize,
    pub history_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DICTIONARY_PATH)
    }
}

impl Config {
    /// Settings for `dictionary_path`, with the cache next to it.
    pub fn new(dictionary_path: impl Into<PathBuf>) -> Self {
        let dictionary_path = dictionary_path.into();
        Self {
            cache_path: cache_path_for(&dictionary_path),
            dictionary_path,
            max_results: DEFAULT_MAX_RESULTS,
            history_file: default_history_file(),
        }
    }

    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn without_history(mut self) -> Self {
        self.history_file = None;
        self
    }

    pub fn dictionary_path(&self) -> &Path {
        &self.dictionary_path
    }
}

/// `<data dir>/major-system/history.txt`, or `None` when the platform has no
/// data or home directory.
pub fn default_history_file() -> Option<PathBuf> {
    let mut path = dirs::data_local_dir().or_else(dirs::home_dir)?;
    path.push("major-system");
    path.push("history.txt");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_follows_dictionary() {
        let config = Config::new("/tmp/parole.txt");
        assert_eq!(config.cache_path, PathBuf::from("/tmp/parole.txt.cache"));
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn builders_override_defaults() {
        let config = Config::default()
            .with_cache_path("elsewhere.bin")
            .with_max_results(5)
            .without_history();
        assert_eq!(config.dictionary_path(), Path::new(DEFAULT_DICTIONARY_PATH));
        assert_eq!(config.cache_path, PathBuf::from("elsewhere.bin"));
        assert_eq!(config.max_results, 5);
        assert_eq!(config.history_file, None);
    }
}
