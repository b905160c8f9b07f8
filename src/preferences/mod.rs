//! Key/value preference storage with expiry.
//!
//! The only preference today is the playback speed factor. It outlives a
//! single playback session, so it lives behind [`PreferenceStore`] rather
//! than in the engine's transport state.
//!
//! - [`MemoryPreferences`] keeps entries in memory (tests, `--no-save` style use)
//! - [`FilePreferences`] persists entries as TOML in the user's data directory

mod error;
mod file;
mod speed;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

pub use error::{PreferenceError, SpeedError};
pub use file::FilePreferences;
pub use speed::{
    parse_speed, speed_down, speed_up, store_speed, FixedSpeed, SpeedSource, StoredSpeed,
    MAX_SPEED, MIN_SPEED, SPEED_KEY,
};

/// Store shared between the engine (reads) and the controls (writes).
pub type SharedPreferences = Rc<RefCell<dyn PreferenceStore>>;

/// A get/set store where every value carries an expiry.
pub trait PreferenceStore {
    /// Current value for `key`, or `None` if missing or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` for `ttl`.
    fn set(&mut self, key: &str, value: &str, ttl: chrono::Duration)
        -> Result<(), PreferenceError>;

    /// Remove `key`. Returns whether an entry existed.
    fn remove(&mut self, key: &str) -> Result<bool, PreferenceError>;
}

/// A stored value and the unix time (seconds) it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub value: String,
    pub expires_at: i64,
}

impl Entry {
    pub fn new(value: &str, ttl: chrono::Duration) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Utc::now().timestamp().saturating_add(ttl.num_seconds()),
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    entries: BTreeMap<String, Entry>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap into the shared handle the player uses.
    pub fn shared(self) -> SharedPreferences {
        Rc::new(RefCell::new(self))
    }
}

impl PreferenceStore for MemoryPreferences {
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
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, PreferenceError> {
        Ok(self.entries.remove(key).is_some())
    }
}

fn live_value(entries: &BTreeMap<String, Entry>, key: &str) -> Option<String> {
    let now = Utc::now().timestamp();
    entries
        .get(key)
        .filter(|entry| !entry.is_expired(now))
        .map(|entry| entry.value.clone())
}
