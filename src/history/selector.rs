use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::record::{BloodPressureReading, HeartRateReading, PatientRecord, Policy, Prescription};

use super::tracked::TrackedValue;

/// Names one embedded sub-field of a record and extracts it.
pub trait FieldSelector<R> {
    type Value: TrackedValue;

    fn name(&self) -> &'static str;

    /// `None` when the record carries no value for this field.
    fn extract(&self, record: &R) -> Option<Self::Value>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentHeartRate;

impl FieldSelector<PatientRecord> for CurrentHeartRate {
    type Value = HeartRateReading;

    fn name(&self) -> &'static str {
        SubField::CurrentHeartRate.as_str()
    }

    fn extract(&self, record: &PatientRecord) -> Option<HeartRateReading> {
        record.heart_rate
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentBloodPressure;

impl FieldSelector<PatientRecord> for CurrentBloodPressure {
    type Value = BloodPressureReading;

    fn name(&self) -> &'static str {
        SubField::CurrentBloodPressure.as_str()
    }

    fn extract(&self, record: &PatientRecord) -> Option<BloodPressureReading> {
        record.blood_pressure
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InsurancePolicy;

impl FieldSelector<PatientRecord> for InsurancePolicy {
    type Value = Policy;

    fn name(&self) -> &'static str {
        SubField::Policy.as_str()
    }

    fn extract(&self, record: &PatientRecord) -> Option<Policy> {
        record.insurance.clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrescriptionList;

impl FieldSelector<PatientRecord> for PrescriptionList {
    type Value = Vec<Prescription>;

    fn name(&self) -> &'static str {
        SubField::PrescriptionList.as_str()
    }

    fn extract(&self, record: &PatientRecord) -> Option<Vec<Prescription>> {
        Some(record.rx_list.clone())
    }
}

/// Boundary names of the patient sub-fields that have a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubField {
    CurrentHeartRate,
    CurrentBloodPressure,
    Policy,
    PrescriptionList,
}

impl SubField {
    pub const ALL: [SubField; 4] = [
        SubField::CurrentHeartRate,
        SubField::CurrentBloodPressure,
        SubField::Policy,
        SubField::PrescriptionList,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SubField::CurrentHeartRate => "currentHeartRate",
            SubField::CurrentBloodPressure => "currentBloodPressure",
            SubField::Policy => "policy",
            SubField::PrescriptionList => "prescriptionList",
        }
    }
}

impl fmt::Display for SubField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubField {
    type Err = LedgerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SubField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| LedgerError::validation(1, format!("unknown sub-field: {}", name)))
    }
}
