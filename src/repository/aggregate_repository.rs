use std::marker::PhantomData;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codec::Codec;
use crate::error::{LedgerError, Result};
use crate::history::{reconstruct, FieldSelector, FieldTimeline};
use crate::ledger::{ExpectedVersion, History, Ledger, SnapshotVersion, Versioned};
use crate::record::Record;
use crate::validate::fold_key;

/// One entry of a record's raw version list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVersion<R> {
    pub version: SnapshotVersion,
    pub is_delete: bool,
    /// `None` for deletes, empty values and versions that no longer decode.
    #[serde(rename = "value")]
    pub record: Option<R>,
}

/// Typed repository for records of type `R` stored in ledger `L`.
///
/// Each record lives under its natural key as one encoded value. Writes
/// always replace the whole value, so every version in the ledger is a
/// complete snapshot.
pub struct AggregateRepository<L, R> {
    ledger: L,
    codec: Codec,
    _marker: PhantomData<R>,
}

impl<L: Clone, R> Clone for AggregateRepository<L, R> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            codec: self.codec,
            _marker: PhantomData,
        }
    }
}

impl<L: Ledger, R: Record> AggregateRepository<L, R> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            codec: Codec::default(),
            _marker: PhantomData,
        }
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Store a brand-new record. Fails with `AlreadyExists` if its key
    /// already holds a value.
    pub fn create(&self, mut record: R) -> Result<Versioned<R>> {
        record.normalize();
        let key = fold_key(record.key())?;

        let expected = match self.ledger.get(&key)? {
            Some(existing) if !existing.data.is_empty() => {
                return Err(LedgerError::already_exists(R::KIND, key));
            }
            Some(existing) => ExpectedVersion::Exact(existing.version),
            None => ExpectedVersion::Absent,
        };

        let bytes = self.codec.encode(&record)?;
        let version = self
            .ledger
            .put(&key, bytes, expected)
            .map_err(|err| match err {
                LedgerError::Conflict { .. } => LedgerError::already_exists(R::KIND, key.clone()),
                other => other,
            })?;

        info!(kind = R::KIND, key = %key, %version, "created record");
        Ok(Versioned {
            data: record,
            version,
        })
    }

    /// Current record under `key`.
    ///
    /// A key with no stored bytes, or an empty value, is `NotFound`. Bytes
    /// that no longer decode are `CorruptVersion`.
    pub fn load(&self, key: &str) -> Result<Versioned<R>> {
        let key = fold_key(key)?;
        let stored = self
            .ledger
            .get(&key)?
            .filter(|stored| !stored.data.is_empty())
            .ok_or_else(|| LedgerError::not_found(R::KIND, key.clone()))?;

        let data = self
            .codec
            .decode(&stored.data)
            .map_err(|reason| LedgerError::CorruptVersion {
                key,
                version: stored.version,
                reason,
            })?;
        Ok(Versioned {
            data,
            version: stored.version,
        })
    }

    pub fn exists(&self, key: &str) -> Result<bool> {
        let key = fold_key(key)?;
        Ok(self
            .ledger
            .get(&key)?
            .is_some_and(|stored| !stored.data.is_empty()))
    }

    /// Load, apply one change, and write the whole record back.
    ///
    /// The write is conditional on the version that was loaded; a concurrent
    /// writer in between surfaces as `Conflict`.
    pub fn mutate_sub_field(&self, key: &str, change: R::Change) -> Result<Versioned<R>> {
        let Versioned {
            data: mut record,
            version: loaded,
        } = self.load(key)?;

        record.apply(change)?;

        let bytes = self.codec.encode(&record)?;
        let version = self
            .ledger
            .put(record.key(), bytes, ExpectedVersion::Exact(loaded))?;

        debug!(kind = R::KIND, key = record.key(), %loaded, %version, "record updated");
        Ok(Versioned {
            data: record,
            version,
        })
    }

    /// Raw oldest-first history of `key`.
    pub fn history(&self, key: &str) -> Result<History<'_>> {
        let key = fold_key(key)?;
        self.ledger.history_of(&key)
    }

    /// Deduplicated timeline of one sub-field.
    pub fn timeline<S>(&self, key: &str, selector: &S) -> Result<FieldTimeline<S::Value>>
    where
        S: FieldSelector<R>,
    {
        let key = fold_key(key)?;
        let history = self.ledger.history_of(&key)?;
        reconstruct::<R, S>(&key, history, self.codec, selector)
    }

    /// Every version of `key`, decoded where possible.
    pub fn versions(&self, key: &str) -> Result<Vec<RecordVersion<R>>> {
        let key = fold_key(key)?;
        let mut versions = Vec::new();

        for entry in self.ledger.history_of(&key)? {
            let entry = entry?;
            let record = if entry.is_delete || entry.value.is_empty() {
                None
            } else {
                match self.codec.decode::<R>(&entry.value) {
                    Ok(record) => Some(record),
                    Err(reason) => {
                        warn!(kind = R::KIND, key = %key, version = %entry.version, %reason, "undecodable version");
                        None
                    }
                }
            };
            versions.push(RecordVersion {
                version: entry.version,
                is_delete: entry.is_delete,
                record,
            });
        }

        if versions.is_empty() {
            return Err(LedgerError::not_found(R::KIND, key));
        }
        Ok(versions)
    }
}
