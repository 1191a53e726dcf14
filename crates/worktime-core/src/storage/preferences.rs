//! Per-user working-time preferences.
//!
//! A preference overrides the hours per day and vacation days of one period,
//! keyed by user and period key (`"2025"` or `"2025_8"`). The calculator
//! itself never touches storage; callers look the preference up and apply it
//! to the request with [`apply_stored_preference`].

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::availability::CalculationRequest;
use crate::error::{CoreError, StorageError};

/// Stored override for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPreference {
    pub working_hours: f64,
    pub vacation_days: f64,
}

/// Key-value store of preferences, keyed by user and period.
pub trait PreferenceStore {
    fn get(&self, user_id: &str, period_key: &str) -> Result<Option<PeriodPreference>, StorageError>;

    fn set(
        &mut self,
        user_id: &str,
        period_key: &str,
        preference: &PeriodPreference,
    ) -> Result<(), StorageError>;

    /// Returns whether a preference was removed.
    fn remove(&mut self, user_id: &str, period_key: &str) -> Result<bool, StorageError>;

    /// All preferences of one user, ordered by period key.
    fn list(&self, user_id: &str) -> Result<BTreeMap<String, PeriodPreference>, StorageError>;
}

/// Apply the user's stored preference for the request's period, if any.
///
/// Returns whether a preference was found.
///
/// # Errors
/// Returns an error if the store lookup fails.
pub fn apply_stored_preference<S: PreferenceStore + ?Sized>(
    store: &S,
    user_id: &str,
    request: &mut CalculationRequest,
) -> Result<bool, CoreError> {
    let key = request.period_key();
    match store.get(user_id, &key)? {
        Some(preference) => {
            tracing::debug!(user_id, period = %key, "applying stored preference");
            request.apply_preference(&preference);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    entries: BTreeMap<(String, String), PeriodPreference>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, user_id: &str, period_key: &str) -> Result<Option<PeriodPreference>, StorageError> {
        Ok(self
            .entries
            .get(&(user_id.to_string(), period_key.to_string()))
            .cloned())
    }

    fn set(
        &mut self,
        user_id: &str,
        period_key: &str,
        preference: &PeriodPreference,
    ) -> Result<(), StorageError> {
        self.entries.insert(
            (user_id.to_string(), period_key.to_string()),
            preference.clone(),
        );
        Ok(())
    }

    fn remove(&mut self, user_id: &str, period_key: &str) -> Result<bool, StorageError> {
        Ok(self
            .entries
            .remove(&(user_id.to_string(), period_key.to_string()))
            .is_some())
    }

    fn list(&self, user_id: &str) -> Result<BTreeMap<String, PeriodPreference>, StorageError> {
        Ok(self
            .entries
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .map(|((_, key), pref)| (key.clone(), pref.clone()))
            .collect())
    }
}

/// SQLite-backed store at `~/.config/worktime/worktime.db`.
pub struct SqlitePreferenceStore {
    conn: Connection,
}

impl SqlitePreferenceStore {
    /// Open the default database, creating the schema if needed.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("worktime.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open a database file at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS preferences (
                user_id    TEXT NOT NULL,
                period_key TEXT NOT NULL,
                value      TEXT NOT NULL,
                PRIMARY KEY (user_id, period_key)
            );",
        )?;
        Ok(())
    }

    fn decode(user_id: &str, period_key: &str, raw: &str) -> Result<PeriodPreference, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Corrupt {
            user_id: user_id.to_string(),
            period_key: period_key.to_string(),
            message: e.to_string(),
        })
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get(&self, user_id: &str, period_key: &str) -> Result<Option<PeriodPreference>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM preferences WHERE user_id = ?1 AND period_key = ?2")?;
        let result = stmt.query_row(params![user_id, period_key], |row| row.get::<_, String>(0));
        match result {
            Ok(raw) => Self::decode(user_id, period_key, &raw).map(Some),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(
        &mut self,
        user_id: &str,
        period_key: &str,
        preference: &PeriodPreference,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(preference)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO preferences (user_id, period_key, value) VALUES (?1, ?2, ?3)",
            params![user_id, period_key, raw],
        )?;
        Ok(())
    }

    fn remove(&mut self, user_id: &str, period_key: &str) -> Result<bool, StorageError> {
        let changed = self.conn.execute(
            "DELETE FROM preferences WHERE user_id = ?1 AND period_key = ?2",
            params![user_id, period_key],
        )?;
        Ok(changed > 0)
    }

    fn list(&self, user_id: &str) -> Result<BTreeMap<String, PeriodPreference>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT period_key, value FROM preferences WHERE user_id = ?1")?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = BTreeMap::new();
        for row in rows {
            let (key, raw) = row?;
            let pref = Self::decode(user_id, &key, &raw)?;
            out.insert(key, pref);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pref(hours: f64, vacation: f64) -> PeriodPreference {
        PeriodPreference {
            working_hours: hours,
            vacation_days: vacation,
        }
    }

    fn exercise_store<S: PreferenceStore>(store: &mut S) {
        assert!(store.get("alice", "2025").unwrap().is_none());

        store.set("alice", "2025", &pref(8.0, 20.0)).unwrap();
        store.set("alice", "2025_8", &pref(6.0, 3.0)).unwrap();
        store.set("bob", "2025", &pref(7.5, 0.0)).unwrap();

        assert_eq!(store.get("alice", "2025_8").unwrap(), Some(pref(6.0, 3.0)));

        let listed = store.list("alice").unwrap();
        assert_eq!(listed.keys().collect::<Vec<_>>(), vec!["2025", "2025_8"]);

        store.set("alice", "2025_8", &pref(4.0, 1.0)).unwrap();
        assert_eq!(store.get("alice", "2025_8").unwrap(), Some(pref(4.0, 1.0)));

        assert!(store.remove("alice", "2025_8").unwrap());
        assert!(!store.remove("alice", "2025_8").unwrap());
        assert_eq!(store.list("alice").unwrap().len(), 1);
        assert_eq!(store.list("bob").unwrap().len(), 1);
    }

    #[test]
    fn memory_store_behaves_like_kv() {
        exercise_store(&mut MemoryPreferenceStore::new());
    }

    #[test]
    fn sqlite_store_behaves_like_kv() {
        exercise_store(&mut SqlitePreferenceStore::open_memory().unwrap());
    }

    #[test]
    fn sqlite_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");
        {
            let mut store = SqlitePreferenceStore::open_at(&path).unwrap();
            store.set("alice", "2024", &pref(8.0, 25.0)).unwrap();
        }
        let store = SqlitePreferenceStore::open_at(&path).unwrap();
        assert_eq!(store.get("alice", "2024").unwrap(), Some(pref(8.0, 25.0)));
    }

    #[test]
    fn corrupt_value_is_reported() {
        let store = SqlitePreferenceStore::open_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO preferences (user_id, period_key, value) VALUES ('alice', '2025', 'nope')",
                [],
            )
            .unwrap();
        assert!(matches!(
            store.get("alice", "2025"),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn stored_preference_is_applied_to_matching_period() {
        let mut store = MemoryPreferenceStore::new();
        store.set("alice", "2025_8", &pref(6.0, 3.0)).unwrap();

        let mut request = CalculationRequest::for_month(2025, 8);
        assert!(apply_stored_preference(&store, "alice", &mut request).unwrap());
        assert_eq!(request.hours_per_day, 6.0);
        assert_eq!(request.vacation_days, 3.0);

        let mut other = CalculationRequest::for_month(2025, 9);
        assert!(!apply_stored_preference(&store, "alice", &mut other).unwrap());
        assert_eq!(other.hours_per_day, 8.0);
    }
}
