use serde::Serialize;

use crate::record::PatientRecord;

/// Demographics of one patient, without sub-records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub address: String,
    pub phone: String,
}

impl From<&PatientRecord> for PersonView {
    fn from(record: &PatientRecord) -> Self {
        Self {
            patient_id: record.patient_id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            dob: record.dob.clone(),
            address: record.address.clone(),
            phone: record.phone.clone(),
        }
    }
}

/// Roster line for `getPeople`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&PatientRecord> for PatientSummary {
    fn from(record: &PatientRecord) -> Self {
        Self {
            patient_id: record.patient_id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
        }
    }
}
