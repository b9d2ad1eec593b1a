//! Records - whole aggregates stored as one value per natural key.
//!
//! A [`Record`] is always persisted in full: a change to any sub-field is
//! applied to the loaded record in memory and the whole record is written
//! back as a new version.

mod patient;
mod policy;
mod prescription;
mod vitals;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

pub use patient::{PatientChange, PatientRecord};
pub use policy::Policy;
pub use prescription::Prescription;
pub use vitals::{BloodPressureReading, HeartRateReading};

/// Trait for aggregates that can be stored by an `AggregateRepository`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Kind name used in errors and log events (e.g. "patient").
    const KIND: &'static str;

    /// A single sub-field mutation.
    type Change;

    /// The natural key this record is stored under.
    fn key(&self) -> &str;

    /// Case-fold natural-key fields in place.
    fn normalize(&mut self);

    /// Apply one change, enforcing the record's uniqueness constraints.
    fn apply(&mut self, change: Self::Change) -> Result<()>;
}
