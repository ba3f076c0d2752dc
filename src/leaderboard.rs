//! Player records and the leaderboard
//!
//! Records are stored as a JSON array under one key of a string key-value
//! store (LocalStorage in the browser). Best score wins on write.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Key holding the record list
pub const PLAYERS_KEY: &str = "players";

/// A player's best result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "score")]
    pub best_score: i64,
}

/// Persistent player store
pub trait PlayerStore {
    /// Every record. Missing or corrupt data reads as an empty list.
    fn get_all(&self) -> Vec<PlayerRecord>;

    /// Record a finished session. The stored score only ever goes up; the
    /// name is always refreshed.
    fn upsert_best_score(&mut self, id: &str, name: &str, score: i64) -> Result<(), StoreError>;

    fn find(&self, id: &str) -> Option<PlayerRecord> {
        self.get_all().into_iter().find(|r| r.id == id)
    }
}

/// Raw string storage under a key
pub trait KeyValueBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory backend for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut backend = Self::default();
        backend.items.insert(key.to_string(), value.to_string());
        backend
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage backend
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageBackend {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageBackend {
    /// None when storage is disabled (private browsing, sandboxed iframe)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }
}

/// Player store serialized as JSON on a key-value backend
#[derive(Debug, Clone, Default)]
pub struct JsonStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> JsonStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Strict read; errors on malformed data
    pub fn read_records(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        match self.backend.get_item(PLAYERS_KEY)? {
            // `null` is what an empty list looks like after some old writes
            Some(json) => Ok(serde_json::from_str::<Option<Vec<PlayerRecord>>>(&json)?
                .unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    fn write_records(&mut self, records: &[PlayerRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.backend.set_item(PLAYERS_KEY, &json)
    }
}

impl<B: KeyValueBackend> PlayerStore for JsonStore<B> {
    fn get_all(&self) -> Vec<PlayerRecord> {
        match self.read_records() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Treating player records as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn upsert_best_score(&mut self, id: &str, name: &str, score: i64) -> Result<(), StoreError> {
        let mut records = self.get_all();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                if score > record.best_score {
                    log::info!("New best for {}: {} (was {})", id, score, record.best_score);
                    record.best_score = score;
                }
                record.name = name.to_string();
            }
            None => {
                log::info!("First record for {}: {}", id, score);
                records.push(PlayerRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    best_score: score,
                });
            }
        }
        self.write_records(&records)
    }
}

/// Store records sorted for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    pub entries: Vec<PlayerRecord>,
}

impl Leaderboard {
    /// Every record, best score first. Ties keep store order.
    pub fn from_store<S: PlayerStore + ?Sized>(store: &S) -> Self {
        let mut entries = store.get_all();
        entries.sort_by(|a, b| b.best_score.cmp(&a.best_score));
        Self { entries }
    }

    /// 1-indexed position of a player
    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|r| r.id == id).map(|i| i + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.best_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> JsonStore<MemoryBackend> {
        JsonStore::new(MemoryBackend::default())
    }

    #[test]
    fn test_best_score_wins() {
        let mut store = store();
        store.upsert_best_score("p1", "Pat", 10).unwrap();
        store.upsert_best_score("p1", "Pat", 4).unwrap();
        assert_eq!(store.find("p1").unwrap().best_score, 10);
        store.upsert_best_score("p1", "Pat", 15).unwrap();
        assert_eq!(store.find("p1").unwrap().best_score, 15);
        assert_eq!(store.get_all().len(), 1);
    }

    #[test]
    fn test_lower_score_still_updates_name() {
        let mut store = store();
        store.upsert_best_score("p1", "Pat", 10).unwrap();
        store.upsert_best_score("p1", "Patricia", -3).unwrap();
        let record = store.find("p1").unwrap();
        assert_eq!(record.name, "Patricia");
        assert_eq!(record.best_score, 10);
    }

    #[test]
    fn test_reads_legacy_format() {
        let backend = MemoryBackend::with_item(
            PLAYERS_KEY,
            r#"[{"id":"a","name":"Ann","score":3},{"id":"b","name":"Bo","score":-2}]"#,
        );
        let store = JsonStore::new(backend);
        assert_eq!(store.get_all().len(), 2);
        assert_eq!(store.find("b").unwrap().best_score, -2);
    }

    #[test]
    fn test_corrupt_data_reads_as_empty() {
        for raw in ["{oops", "null", r#"{"id":"a"}"#, r#"[{"id":"a"}]"#] {
            let store = JsonStore::new(MemoryBackend::with_item(PLAYERS_KEY, raw));
            assert!(store.get_all().is_empty(), "{raw}");
        }
        let store = JsonStore::new(MemoryBackend::with_item(PLAYERS_KEY, "{oops"));
        assert!(matches!(store.read_records(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_write_over_corrupt_data_starts_fresh() {
        let mut store = JsonStore::new(MemoryBackend::with_item(PLAYERS_KEY, "]["));
        store.upsert_best_score("p1", "Pat", 2).unwrap();
        assert_eq!(store.get_all().len(), 1);
    }

    #[test]
    fn test_leaderboard_sorted_descending() {
        let mut store = store();
        store.upsert_best_score("a", "Ann", 3).unwrap();
        store.upsert_best_score("b", "Bo", 12).unwrap();
        store.upsert_best_score("c", "Cy", -1).unwrap();
        store.upsert_best_score("d", "Di", 12).unwrap();

        let board = Leaderboard::from_store(&store);
        let ids: Vec<&str> = board.entries.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "a", "c"]);
        assert_eq!(board.top_score(), Some(12));
        assert_eq!(board.rank_of("a"), Some(3));
        assert_eq!(board.rank_of("z"), None);
    }

    #[test]
    fn test_leaderboard_lists_every_player() {
        let mut store = store();
        for i in 0..15i64 {
            store.upsert_best_score(&format!("p{i}"), "Pat", i).unwrap();
        }
        let board = Leaderboard::from_store(&store);
        assert_eq!(board.entries.len(), 15);
        assert_eq!(board.rank_of("p0"), Some(15));
        assert_eq!(board.top_score(), Some(14));
    }

    #[test]
    fn test_empty_leaderboard() {
        let board = Leaderboard::from_store(&store());
        assert!(board.is_empty());
        assert_eq!(board.top_score(), None);
    }
}
