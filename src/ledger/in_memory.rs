use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{LedgerError, Result};

use super::store::{History, Ledger};
use super::{ExpectedVersion, HistoryEntry, SnapshotVersion, Versioned};

/// In-memory ledger backed by an ordered map of per-key histories.
///
/// Clone-friendly (cloning shares the same underlying storage). Versions are
/// drawn from one commit sequence shared by every key, so they are strictly
/// increasing across the whole ledger.
#[derive(Clone)]
pub struct InMemoryLedger {
    storage: Arc<RwLock<BTreeMap<String, Vec<HistoryEntry>>>>,
    seq: Arc<AtomicU64>,
    unavailable: Arc<AtomicBool>,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(BTreeMap::new())),
            seq: Arc::new(AtomicU64::new(0)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Append a tombstone to `key`'s history. Returns `None` if there was no
    /// live value to delete.
    pub fn delete(&self, key: &str) -> Result<Option<SnapshotVersion>> {
        self.check_available()?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| poisoned("delete"))?;

        let Some(history) = storage.get_mut(key) else {
            return Ok(None);
        };
        if current_version(history).is_none() {
            return Ok(None);
        }

        let version = self.next_version();
        history.push(HistoryEntry {
            version,
            value: Vec::new(),
            is_delete: true,
        });
        Ok(Some(version))
    }

    /// Make every subsequent call fail as if the ledger were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LedgerError::CollaboratorUnavailable(
                "in-memory ledger marked unavailable".into(),
            ));
        }
        Ok(())
    }

    // Only called with the write lock held, so allocation order matches
    // history order.
    fn next_version(&self) -> SnapshotVersion {
        SnapshotVersion::new(self.seq.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl Ledger for InMemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Versioned<Vec<u8>>>> {
        self.check_available()?;
        let storage = self.storage.read().map_err(|_| poisoned("get"))?;

        Ok(storage
            .get(key)
            .and_then(|history| history.last())
            .filter(|entry| !entry.is_delete)
            .map(|entry| Versioned {
                data: entry.value.clone(),
                version: entry.version,
            }))
    }

    fn put(&self, key: &str, value: Vec<u8>, expected: ExpectedVersion) -> Result<SnapshotVersion> {
        self.check_available()?;
        let mut storage = self.storage.write().map_err(|_| poisoned("put"))?;
        let actual = storage
            .get(key)
            .and_then(|history| current_version(history));

        let accepted = match expected {
            ExpectedVersion::Any => true,
            ExpectedVersion::Absent => actual.is_none(),
            ExpectedVersion::Exact(version) => actual == Some(version),
        };
        if !accepted {
            return Err(LedgerError::Conflict {
                key: key.to_string(),
                expected: expected.to_string(),
                actual: actual
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "absent".to_string()),
            });
        }

        let version = self.next_version();
        storage
            .entry(key.to_string())
            .or_default()
            .push(HistoryEntry {
                version,
                value,
                is_delete: false,
            });
        Ok(version)
    }

    fn history_of(&self, key: &str) -> Result<History<'_>> {
        self.check_available()?;
        let storage = self.storage.read().map_err(|_| poisoned("history"))?;
        let entries = storage.get(key).cloned().unwrap_or_default();
        Ok(Box::new(entries.into_iter().map(Ok::<_, LedgerError>)))
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        self.check_available()?;
        let storage = self.storage.read().map_err(|_| poisoned("scan"))?;

        Ok(storage
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .filter_map(|(key, history)| {
                history
                    .last()
                    .filter(|entry| !entry.is_delete)
                    .map(|entry| (key.clone(), entry.value.clone()))
            })
            .collect())
    }
}

fn current_version(history: &[HistoryEntry]) -> Option<SnapshotVersion> {
    history
        .last()
        .filter(|entry| !entry.is_delete)
        .map(|entry| entry.version)
}

fn poisoned(operation: &str) -> LedgerError {
    LedgerError::CollaboratorUnavailable(format!("ledger lock poisoned during {}", operation))
}
