// File: src/persistence.rs
use crate::core::index::LexiconIndex;
use crate::error::CacheError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;
use tracing::debug;

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_FORMAT: u32 = 1;

pub const CACHE_SUFFIX: &str = ".cache";

/// Where a cached index lives and how to tell whether it is still valid.
pub trait SnapshotStore {
    /// True when a snapshot exists and is at least as new as the dictionary.
    fn is_fresh(&self, source_modified: SystemTime) -> bool;
    fn restore(&self) -> Result<LexiconIndex, CacheError>;
    fn store(&self, index: &LexiconIndex) -> Result<(), CacheError>;
}

#[derive(serde::Serialize)]
struct SnapshotRef<'a> {
    format: u32,
    index: &'a LexiconIndex,
}

#[derive(serde::Deserialize)]
struct Snapshot {
    format: u32,
    index: LexiconIndex,
}

/// `dizionario.txt` -> `dizionario.txt.cache`
pub fn cache_path_for(dictionary: &Path) -> PathBuf {
    let mut name = OsString::from(dictionary.as_os_str());
    name.push(CACHE_SUFFIX);
    PathBuf::from(name)
}

pub fn save_to_disk(index: &LexiconIndex, path: &Path) -> Result<(), CacheError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        let snapshot = SnapshotRef {
            format: SNAPSHOT_FORMAT,
            index,
        };
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }

    temp_file.persist(path)?;
    debug!(path = %path.display(), sequences = index.sequence_count(), "cache snapshot written");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<LexiconIndex, CacheError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;

    if snapshot.format != SNAPSHOT_FORMAT {
        return Err(CacheError::UnsupportedFormat {
            found: snapshot.format,
            expected: SNAPSHOT_FORMAT,
        });
    }
    Ok(snapshot.index)
}

/// Snapshot stored in a single file, normally next to the dictionary.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn beside(dictionary: &Path) -> Self {
        Self::new(cache_path_for(dictionary))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn is_fresh(&self, source_modified: SystemTime) -> bool {
        match fs::metadata(&self.path).and_then(|meta| meta.modified()) {
            Ok(cache_modified) => cache_modified >= source_modified,
            Err(_) => false,
        }
    }

    fn restore(&self) -> Result<LexiconIndex, CacheError> {
        load_from_disk(&self.path)
    }

    fn store(&self, index: &LexiconIndex) -> Result<(), CacheError> {
        save_to_disk(index, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;
    use tempfile::TempDir;

    fn sample_index() -> LexiconIndex {
        let mut index = LexiconIndex::new();
        for word in ["casa", "chiesa", "gatto", "figlio", "gnomo"] {
            index.insert(word);
        }
        index
    }

    #[test]
    fn cache_path_appends_suffix() {
        assert_eq!(
            cache_path_for(Path::new("data/dizionario.txt")),
            PathBuf::from("data/dizionario.txt.cache")
        );
        assert_eq!(cache_path_for(Path::new("parole")), PathBuf::from("parole.cache"));
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.txt.cache");
        let index = sample_index();

        save_to_disk(&index, &path).unwrap();
        let restored = load_from_disk(&path).unwrap();

        assert_eq!(restored, index);
        for encoding in index.encodings() {
            assert_eq!(restored.lookup(encoding.as_str()), index.lookup(encoding.as_str()));
        }
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("x.cache");
        save_to_disk(&sample_index(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn garbage_is_reported_not_panicked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.cache");
        fs::write(&path, b"this is not bincode").unwrap();
        assert!(load_from_disk(&path).is_err());

        fs::write(&path, b"").unwrap();
        assert!(matches!(load_from_disk(&path), Err(CacheError::Bincode(_))));
    }

    #[test]
    fn other_format_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("old.cache");
        let index = sample_index();
        let bytes = bincode::serialize(&SnapshotRef {
            format: SNAPSHOT_FORMAT + 1,
            index: &index,
        })
        .unwrap();
        fs::write(&path, bytes).unwrap();

        match load_from_disk(&path) {
            Err(CacheError::UnsupportedFormat { found, expected }) => {
                assert_eq!(found, SNAPSHOT_FORMAT + 1);
                assert_eq!(expected, SNAPSHOT_FORMAT);
            }
            other => panic!("expected format error, got {:?}", other.map(|i| i.word_count())),
        }
    }

    #[test]
    fn snapshot_with_bad_keys_is_rejected() {
        #[derive(serde::Serialize)]
        struct RawSnapshot {
            format: u32,
            buckets: HashMap<String, Vec<String>>,
        }

        let dir = TempDir::new().unwrap();
        for key in ["7a", ""] {
            let path = dir.path().join("keys.cache");
            let raw = RawSnapshot {
                format: SNAPSHOT_FORMAT,
                buckets: HashMap::from([
                    ("70".to_string(), vec!["casa".to_string()]),
                    (key.to_string(), vec!["aia".to_string()]),
                ]),
            };
            fs::write(&path, bincode::serialize(&raw).unwrap()).unwrap();

            assert!(
                matches!(load_from_disk(&path), Err(CacheError::Bincode(_))),
                "key {:?} was accepted",
                key
            );
        }
    }

    #[test]
    fn missing_snapshot_is_stale() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("none.cache"));
        assert!(!store.is_fresh(SystemTime::UNIX_EPOCH));
        assert!(matches!(store.restore(), Err(CacheError::Io(_))));
    }

    #[test]
    fn freshness_compares_modification_times() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::beside(&dir.path().join("words.txt"));
        store.store(&sample_index()).unwrap();

        let written = fs::metadata(store.path()).unwrap().modified().unwrap();
        assert!(store.is_fresh(written));
        assert!(store.is_fresh(written - Duration::from_secs(60)));
        assert!(!store.is_fresh(written + Duration::from_secs(60)));
    }
}
