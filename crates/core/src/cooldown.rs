//! Advisory per-board placement cooldown.
//!
//! The cooldown is the only state this client genuinely owns: a record of
//! the last successful placement per board, persisted in a small key-value
//! string store under `cooldown_<board-id>`. It gates the *submit* step
//! only -- selection is never blocked -- and it is purely client-local; the
//! backend enforces nothing.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{BoardId, Timestamp};

/// Minimum wall-clock interval between successful placements on one board.
pub const COOLDOWN_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Store key for a board's cooldown record.
fn storage_key(board_id: &BoardId) -> String {
    format!("cooldown_{board_id}")
}

/// The persisted record: which board, and when the last placement landed.
///
/// Serialized camelCase for compatibility with records written by earlier
/// clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownRecord {
    pub board_id: BoardId,
    /// Unix timestamp of the placement, in milliseconds.
    pub timestamp: i64,
}

/// Minimal key-value string store, `get`/`set` only.
///
/// Abstracted so tests can substitute [`MemoryStore`] for the on-disk
/// [`JsonFileStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON object of `key -> value` strings.
///
/// Reads tolerate a missing or unparseable file (treated as empty, the
/// same resilience browsers give local storage); write failures are real
/// errors and propagate.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, String>, CoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(CoreError::Store(e)),
        };
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(&entries)?)?;
        Ok(())
    }
}

/// Cooldown bookkeeping over any [`KeyValueStore`].
///
/// All queries take an explicit `now` so callers (and tests) control the
/// clock.
#[derive(Debug)]
pub struct CooldownTracker<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CooldownTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a successful placement at `now`.
    pub fn record_placement(&mut self, board_id: BoardId, now: Timestamp) -> Result<(), CoreError> {
        let record = CooldownRecord {
            board_id,
            timestamp: now.timestamp_millis(),
        };
        self.store
            .set(&storage_key(&board_id), &serde_json::to_string(&record)?)
    }

    /// The last recorded placement for this board, if any.
    ///
    /// A corrupt stored value reads as "no record" rather than an error.
    pub fn last_placement(&self, board_id: &BoardId) -> Result<Option<CooldownRecord>, CoreError> {
        match self.store.get(&storage_key(board_id))? {
            Some(raw) => Ok(serde_json::from_str(&raw).ok()),
            None => Ok(None),
        }
    }

    /// Whether a placement on this board is currently allowed.
    pub fn can_place(&self, board_id: &BoardId, now: Timestamp) -> Result<bool, CoreError> {
        Ok(self.remaining(board_id, now)?.is_zero())
    }

    /// Time left until the next placement is allowed; zero when ready.
    pub fn remaining(&self, board_id: &BoardId, now: Timestamp) -> Result<Duration, CoreError> {
        let Some(record) = self.last_placement(board_id)? else {
            return Ok(Duration::ZERO);
        };
        let elapsed_ms = now.timestamp_millis() - record.timestamp;
        let window_ms = COOLDOWN_WINDOW.as_millis() as i64;
        if elapsed_ms >= window_ms {
            Ok(Duration::ZERO)
        } else {
            Ok(Duration::from_millis((window_ms - elapsed_ms.max(0)) as u64))
        }
    }

    /// Gate a submit: `Err(CooldownActive)` while the window is open.
    pub fn check(&self, board_id: &BoardId, now: Timestamp) -> Result<(), CoreError> {
        let remaining = self.remaining(board_id, now)?;
        if remaining.is_zero() {
            Ok(())
        } else {
            Err(CoreError::CooldownActive { remaining })
        }
    }
}

/// Human-readable countdown, e.g. `4m 59s`, `1h 2m`, or `Ready!`.
pub fn format_remaining(remaining: Duration) -> String {
    let total_secs = remaining.as_secs();
    if remaining.is_zero() {
        return "Ready!".to_string();
    }
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    fn tracker() -> CooldownTracker<MemoryStore> {
        CooldownTracker::new(MemoryStore::default())
    }

    #[test]
    fn fresh_board_is_ready() {
        let t = tracker();
        let id = uuid::Uuid::new_v4();
        assert!(t.can_place(&id, Utc::now()).unwrap());
        assert_eq!(t.remaining(&id, Utc::now()).unwrap(), Duration::ZERO);
    }

    #[test]
    fn placement_starts_full_window() {
        let mut t = tracker();
        let id = uuid::Uuid::new_v4();
        let now = Utc::now();

        t.record_placement(id, now).unwrap();

        assert!(!t.can_place(&id, now).unwrap());
        let remaining = t.remaining(&id, now).unwrap();
        assert_eq!(remaining.as_millis(), 300_000);
    }

    #[test]
    fn window_elapses() {
        let mut t = tracker();
        let id = uuid::Uuid::new_v4();
        let now = Utc::now();

        t.record_placement(id, now).unwrap();

        let later = now + TimeDelta::seconds(5 * 60);
        assert!(t.can_place(&id, later).unwrap());
        assert!(t.check(&id, later).is_ok());
    }

    #[test]
    fn second_rapid_placement_is_blocked() {
        let mut t = tracker();
        let id = uuid::Uuid::new_v4();
        let now = Utc::now();

        t.record_placement(id, now).unwrap();

        let a_moment_later = now + TimeDelta::seconds(1);
        let err = t.check(&id, a_moment_later).unwrap_err();
        match err {
            CoreError::CooldownActive { remaining } => {
                assert_eq!(remaining.as_secs(), 299);
            }
            other => panic!("Expected CooldownActive, got {other:?}"),
        }
    }

    #[test]
    fn cooldowns_are_per_board() {
        let mut t = tracker();
        let a = uuid::Uuid::new_v4();
        let b = uuid::Uuid::new_v4();
        let now = Utc::now();

        t.record_placement(a, now).unwrap();

        assert!(!t.can_place(&a, now).unwrap());
        assert!(t.can_place(&b, now).unwrap());
    }

    #[test]
    fn corrupt_record_reads_as_absent() {
        let mut store = MemoryStore::default();
        let id = uuid::Uuid::new_v4();
        store.set(&storage_key(&id), "{not json").unwrap();

        let t = CooldownTracker::new(store);
        assert!(t.last_placement(&id).unwrap().is_none());
        assert!(t.can_place(&id, Utc::now()).unwrap());
    }

    #[test]
    fn record_round_trips_camel_case() {
        let id = uuid::Uuid::new_v4();
        let record = CooldownRecord {
            board_id: id,
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("boardId").is_some());
        assert!(json.get("board_id").is_none());
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cooldowns.json");
        let id = uuid::Uuid::new_v4();
        let now = Utc::now();

        let mut t = CooldownTracker::new(JsonFileStore::new(&path));
        t.record_placement(id, now).unwrap();

        // A fresh store reading the same file sees the record.
        let t2 = CooldownTracker::new(JsonFileStore::new(&path));
        let record = t2.last_placement(&id).unwrap().unwrap();
        assert_eq!(record.board_id, id);
        assert!(!t2.can_place(&id, now).unwrap());
    }

    #[test]
    fn file_store_tolerates_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cooldowns.json");
        std::fs::write(&path, "garbage").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.get("anything").unwrap().is_none());
        // Writing through the corrupt file replaces it.
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn format_remaining_matches_display_rules() {
        assert_eq!(format_remaining(Duration::ZERO), "Ready!");
        assert_eq!(format_remaining(Duration::from_secs(42)), "42s");
        assert_eq!(format_remaining(Duration::from_secs(4 * 60 + 59)), "4m 59s");
        assert_eq!(format_remaining(Duration::from_secs(3600 + 120)), "1h 2m");
    }
}
