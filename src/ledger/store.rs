use std::sync::Arc;

use crate::error::Result;

use super::composite::{composite_key, composite_prefix, split_composite_key};
use super::{ExpectedVersion, HistoryEntry, SnapshotVersion, Versioned};

/// Forward-only, one-pass history stream. Dropping it releases the scan.
pub type History<'a> = Box<dyn Iterator<Item = Result<HistoryEntry>> + Send + 'a>;

/// Abstract versioned key-value ledger.
///
/// Every `put` is a full overwrite and appends one version to the key's
/// history. Implementations must map their own failures to
/// `LedgerError::CollaboratorUnavailable` and precondition failures to
/// `LedgerError::Conflict`.
pub trait Ledger: Send + Sync {
    /// Current value of `key`, or `None` if it was never written or is deleted.
    fn get(&self, key: &str) -> Result<Option<Versioned<Vec<u8>>>>;

    /// Overwrite `key` if `expected` still holds. Returns the new version.
    fn put(&self, key: &str, value: Vec<u8>, expected: ExpectedVersion) -> Result<SnapshotVersion>;

    /// Every historical value of `key`, delivered oldest-first.
    fn history_of(&self, key: &str) -> Result<History<'_>>;

    /// Live entries whose key starts with `prefix`, in lexicographic key order.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>>;

    fn composite_key(&self, index_name: &str, attributes: &[&str]) -> Result<String> {
        composite_key(index_name, attributes)
    }

    fn split_composite_key(&self, key: &str) -> Result<(String, Vec<String>)> {
        split_composite_key(key)
    }

    /// Live index entries under `(index_name, prefix_attributes…)`.
    fn scan_by_composite_prefix(
        &self,
        index_name: &str,
        prefix_attributes: &[&str],
    ) -> Result<Vec<(String, Vec<u8>)>> {
        let prefix = composite_prefix(index_name, prefix_attributes)?;
        self.scan_prefix(&prefix)
    }
}

impl<T: Ledger + ?Sized> Ledger for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Versioned<Vec<u8>>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>, expected: ExpectedVersion) -> Result<SnapshotVersion> {
        (**self).put(key, value, expected)
    }

    fn history_of(&self, key: &str) -> Result<History<'_>> {
        (**self).history_of(key)
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        (**self).scan_prefix(prefix)
    }
}
