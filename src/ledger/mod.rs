//! Ledger - the versioned key-value collaborator this crate is built on.
//!
//! Everything above this module sees the ledger only through the [`Ledger`]
//! trait: point reads, whole-value overwrites that mint a new version, a
//! forward-only history stream per key, and ordered prefix scans.

mod composite;
mod in_memory;
mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use composite::{composite_key, composite_prefix, split_composite_key};
pub use in_memory::InMemoryLedger;
pub use store::{History, Ledger};

/// Commit sequence attached by the ledger to every stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotVersion(u64);

impl SnapshotVersion {
    pub const fn new(seq: u64) -> Self {
        SnapshotVersion(seq)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value paired with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: SnapshotVersion,
}

/// Precondition checked by the ledger before a write is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Unconditional overwrite.
    Any,
    /// The key must not hold a value.
    Absent,
    /// The key's current version must still be this one.
    Exact(SnapshotVersion),
}

impl fmt::Display for ExpectedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedVersion::Any => write!(f, "any"),
            ExpectedVersion::Absent => write!(f, "absent"),
            ExpectedVersion::Exact(version) => write!(f, "{}", version),
        }
    }
}

/// One historical value of a key.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub version: SnapshotVersion,
    pub value: Vec<u8>,
    pub is_delete: bool,
}
