//! Best-score tracking
//!
//! A single integer persisted under a fixed key. The store is injected so the
//! core runs anywhere: in memory for tests, a file natively, LocalStorage on
//! the web. Store failures are logged and never interrupt play.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Fixed identifier the best score is stored under
pub const STORAGE_KEY: &str = "skyflap_high_score";

/// Get/set pair for one persisted integer
pub trait ScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<u32>, StoreError>;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).save(score)
    }
}

/// Process-local store; can be told to fail for testing
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    /// Reject every save while set
    pub fail_writes: bool,
    /// Successful saves so far
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("memory store is read-only".into()));
        }
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// Plain-text file holding the score (native only)
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/<key>`
    pub fn default_path() -> PathBuf {
        config_dir().join(STORAGE_KEY)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let trimmed = raw.trim();
        trimmed
            .parse::<u32>()
            .map(Some)
            .map_err(|_| StoreError::Corrupt {
                raw: trimmed.to_string(),
            })
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, format!("{}\n", score)).map_err(io_err)
    }
}

/// Per-user configuration directory for skyflap, falling back to `./skyflap`
/// when the platform has none
#[cfg(not(target_arch = "wasm32"))]
pub fn config_dir() -> PathBuf {
    match directories::ProjectDirs::from("", "", "skyflap") {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => {
            log::warn!("Could not determine config directory, using the working directory");
            PathBuf::from("skyflap")
        }
    }
}

/// Web hosts persist through LocalStorage; file paths are nominal
#[cfg(target_arch = "wasm32")]
pub fn config_dir() -> PathBuf {
    PathBuf::from("skyflap")
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let raw = Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        match raw {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map(Some)
                .map_err(|_| StoreError::Corrupt { raw }),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(STORAGE_KEY, &score.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

/// The host's natural persistent store
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn ScoreStore> {
    Box::new(FileStore::new(FileStore::default_path()))
}

/// The host's natural persistent store
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn ScoreStore> {
    Box::new(LocalStorageStore)
}

/// Best score across sessions, backed by a store.
///
/// The in-memory value is authoritative. A failed write leaves the store
/// behind until a later `submit` or `flush` succeeds.
#[derive(Debug)]
pub struct HighScore<S> {
    best: u32,
    dirty: bool,
    store: S,
}

impl<S: ScoreStore> HighScore<S> {
    /// Read the store once; missing or unreadable values start at 0
    pub fn load(store: S) -> Self {
        let best = match store.load() {
            Ok(Some(best)) => {
                log::info!("Loaded best score {}", best);
                best
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                0
            }
        };
        Self {
            best,
            dirty: false,
            store,
        }
    }

    #[inline]
    pub fn best(&self) -> u32 {
        self.best
    }

    /// True while the store lags the in-memory best
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Offer a finished session's score. Returns true if it is a new best.
    pub fn submit(&mut self, score: u32) -> bool {
        let improved = score > self.best;
        if improved {
            log::info!("New best score {} (was {})", score, self.best);
            self.best = score;
            self.dirty = true;
        }
        if self.dirty {
            self.flush();
        }
        improved
    }

    /// Try to persist the in-memory best. Returns true when the store is current.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        match self.store.save(self.best) {
            Ok(()) => {
                self.dirty = false;
                true
            }
            Err(e) => {
                log::warn!("Could not persist best score {}: {}", self.best, e);
                false
            }
        }
    }
}
