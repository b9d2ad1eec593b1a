//! Composite secondary index.
//!
//! The ledger has no native secondary indexes, so membership is recorded as
//! extra keys: each entry is a composite key whose attributes carry the
//! indexed values, stored with a one-byte sentinel. Entries are never deleted.

use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::ledger::{ExpectedVersion, Ledger};

/// Value stored under every index key.
pub const SENTINEL: [u8; 1] = [0x00];

#[derive(Debug, Clone)]
pub struct CompositeIndex<L> {
    ledger: L,
}

impl<L: Ledger> CompositeIndex<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Record `attributes` under `index_name`. Returns `false` if the entry
    /// was already present, in which case nothing is written.
    pub fn add_to_index(&self, index_name: &str, attributes: &[&str]) -> Result<bool> {
        let key = self.ledger.composite_key(index_name, attributes)?;
        if self.ledger.get(&key)?.is_some() {
            return Ok(false);
        }

        // A concurrent writer may land the same sentinel first.
        let version = match self
            .ledger
            .put(&key, SENTINEL.to_vec(), ExpectedVersion::Absent)
        {
            Ok(version) => version,
            Err(LedgerError::Conflict { .. }) => return Ok(false),
            Err(err) => return Err(err),
        };
        debug!(index = index_name, ?attributes, %version, "index entry added");
        Ok(true)
    }

    pub fn contains(&self, index_name: &str, attributes: &[&str]) -> Result<bool> {
        let key = self.ledger.composite_key(index_name, attributes)?;
        Ok(self.ledger.get(&key)?.is_some())
    }

    /// Attributes of every entry whose leading attributes equal
    /// `prefix_attributes`, in lexicographic key order.
    pub fn scan_index(&self, index_name: &str, prefix_attributes: &[&str]) -> Result<Vec<Vec<String>>> {
        self.ledger
            .scan_by_composite_prefix(index_name, prefix_attributes)?
            .into_iter()
            .map(|(key, _)| {
                let (_, attributes) = self.ledger.split_composite_key(&key)?;
                Ok(attributes)
            })
            .collect()
    }
}
