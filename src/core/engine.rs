use crate::config::Config;
use crate::core::{converter::PhoneticEncoder, index::LexiconIndex, types::Encoding};
use crate::error::EngineError;
use crate::persistence::{FileSnapshotStore, SnapshotStore};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Where the current index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrigin {
    Cache,
    Dictionary,
}

/// Summary of a load, for the user-facing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub origin: IndexOrigin,
    pub sequences: usize,
    pub words: usize,
    /// Non-fatal cache problems worth telling the user about.
    pub notes: Vec<String>,
}

/// The encoder, the reverse index and the cache that backs it.
pub struct MajorEngine<S = FileSnapshotStore> {
    pub encoder: PhoneticEncoder,
    index: LexiconIndex,
    config: Config,
    store: S,
}

impl MajorEngine<FileSnapshotStore> {
    /// An engine with an empty index; call [`MajorEngine::load`] to fill it.
    pub fn new(config: Config) -> Self {
        let store = FileSnapshotStore::new(config.cache_path.clone());
        Self::with_store(config, store)
    }
}

impl<S: SnapshotStore> MajorEngine<S> {
    pub fn with_store(config: Config, store: S) -> Self {
        Self {
            encoder: PhoneticEncoder::new(),
            index: LexiconIndex::new(),
            config,
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &LexiconIndex {
        &self.index
    }

    pub fn encode(&self, word: &str) -> Option<Encoding> {
        self.encoder.encode(word)
    }

    pub fn lookup(&self, digits: &str) -> Vec<String> {
        self.index.lookup(digits)
    }

    /// Restores the index from the snapshot when it is at least as new as the
    /// dictionary, otherwise rebuilds from the dictionary and rewrites the
    /// snapshot. An unusable snapshot only adds a note.
    ///
    /// On error the index is left empty.
    pub fn load(&mut self) -> Result<LoadReport, EngineError> {
        self.index = LexiconIndex::new();
        let dictionary = self.config.dictionary_path.clone();
        let source_modified = fs::metadata(&dictionary)
            .and_then(|meta| meta.modified())
            .map_err(|source| dictionary_error(&dictionary, source))?;

        let mut notes = Vec::new();
        if self.store.is_fresh(source_modified) {
            match self.store.restore() {
                Ok(index) => {
                    self.index = index;
                    info!(sequences = self.index.sequence_count(), "lexicon restored from cache");
                    return Ok(self.report(IndexOrigin::Cache, notes));
                }
                Err(e) => {
                    info!(error = %e, "cache snapshot unusable, rebuilding");
                    notes.push(format!("Cache could not be loaded ({}). Rebuilding...", e));
                }
            }
        } else {
            debug!(path = %dictionary.display(), "cache missing or older than dictionary");
        }

        self.rebuild_into(notes)
    }

    /// Ignores the snapshot, rebuilds from the dictionary and overwrites it.
    pub fn rebuild(&mut self) -> Result<LoadReport, EngineError> {
        self.index = LexiconIndex::new();
        self.rebuild_into(Vec::new())
    }

    fn rebuild_into(&mut self, mut notes: Vec<String>) -> Result<LoadReport, EngineError> {
        let dictionary = &self.config.dictionary_path;
        let index = LexiconIndex::from_path(&self.encoder, dictionary)
            .map_err(|source| dictionary_error(dictionary, source))?;
        info!(
            path = %dictionary.display(),
            sequences = index.sequence_count(),
            words = index.word_count(),
            "lexicon built from dictionary"
        );

        if let Err(e) = self.store.store(&index) {
            warn!(error = %e, "could not write cache snapshot");
            notes.push(format!("Cache not saved: {}", e));
        }

        self.index = index;
        Ok(self.report(IndexOrigin::Dictionary, notes))
    }

    fn report(&self, origin: IndexOrigin, notes: Vec<String>) -> LoadReport {
        LoadReport {
            origin,
            sequences: self.index.sequence_count(),
            words: self.index.word_count(),
            notes,
        }
    }
}

fn dictionary_error(path: &Path, source: std::io::Error) -> EngineError {
    EngineError::Dictionary {
        path: path.to_path_buf(),
        source,
    }
}
