//! TOML-file backed preference store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{live_value, Entry, PreferenceError, PreferenceStore, SharedPreferences};

/// On-disk layout of the preferences file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    #[serde(default)]
    entries: BTreeMap<String, Entry>,
}

/// Preference store persisted at a TOML path.
///
/// Reads are served from memory; every `set`/`remove` writes the whole file.
/// Expired entries are dropped when the file is opened.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    entries: BTreeMap<String, Entry>,
}

impl FilePreferences {
    /// Default location: `<data_dir>/subfollow/preferences.toml`.
    pub fn default_path() -> Result<PathBuf, PreferenceError> {
        let data_dir = dirs::data_dir().ok_or(PreferenceError::NoDataDir)?;
        Ok(data_dir.join("subfollow").join("preferences.toml"))
    }

    /// Open the store at the default location.
    pub fn open_default() -> Result<Self, PreferenceError> {
        Self::open(Self::default_path()?)
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|source| PreferenceError::Io {
            path: path.clone(),
            source,
        })?;
        let file: PreferencesFile =
            toml::from_str(&content).map_err(|source| PreferenceError::Parse {
                path: path.clone(),
                source,
            })?;

        let now = Utc::now().timestamp();
        let entries = file
            .entries
            .into_iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .collect();

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wrap into the shared handle the player uses.
    pub fn shared(self) -> SharedPreferences {
        Rc::new(RefCell::new(self))
    }

    fn save(&self) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = PreferencesFile {
            entries: self.entries.clone(),
        };
        let content = toml::to_string_pretty(&file)?;
        fs::write(&self.path, content).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        live_value(&self.entries, key)
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
        ttl: chrono::Duration,
    ) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), Entry::new(value, ttl));
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<bool, PreferenceError> {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.save()?;
        }
        Ok(existed)
    }
}
