//! Field history reconstruction.
//!
//! The ledger only keeps whole-aggregate snapshots. This module turns a
//! key's snapshot history into a per-field timeline: each snapshot is
//! decoded, one sub-field is extracted, and runs of unchanged values caused
//! by writes to *other* sub-fields are collapsed.

mod reconstruct;
mod selector;
mod timeline;
mod tracked;

pub use reconstruct::reconstruct;
pub use selector::{
    CurrentBloodPressure, CurrentHeartRate, FieldSelector, InsurancePolicy, PrescriptionList,
    SubField,
};
pub use timeline::{FieldTimeline, TimelinePoint};
pub use tracked::TrackedValue;
