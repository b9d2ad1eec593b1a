pub mod codec;
pub mod config;
pub mod error;
pub mod history;
pub mod index;
pub mod ledger;
pub mod logging;
pub mod record;
pub mod repository;
pub mod service;
pub mod validate;

pub use codec::Codec;
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use history::{
    reconstruct, CurrentBloodPressure, CurrentHeartRate, FieldSelector, FieldTimeline,
    InsurancePolicy, PrescriptionList, SubField, TimelinePoint, TrackedValue,
};
pub use index::CompositeIndex;
pub use ledger::{
    ExpectedVersion, History, HistoryEntry, InMemoryLedger, Ledger, SnapshotVersion, Versioned,
};
pub use record::{
    BloodPressureReading, HeartRateReading, PatientChange, PatientRecord, Policy, Prescription,
    Record,
};
pub use repository::{AggregateRepository, RecordVersion};
pub use service::{PatientOperation, PatientService, PatientSummary, PersonView};
pub use validate::Args;
