//! Patient service - named entry points over the repository and roster.
//!
//! ```ignore
//! use emr_ledger::{InMemoryLedger, LedgerConfig, PatientService};
//!
//! let service = PatientService::new(InMemoryLedger::new(), LedgerConfig::default())?;
//! service.dispatch("initPerson", &args)?;
//! let history = service.dispatch("getHeartRateHistory", &["p01".to_string()])?;
//! ```

mod operation;
mod patient_service;
mod response;

pub use operation::PatientOperation;
pub use patient_service::PatientService;
pub use response::{PatientSummary, PersonView};
