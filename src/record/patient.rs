use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

use super::{BloodPressureReading, HeartRateReading, Policy, Prescription, Record};

const OBJECT_TYPE: &str = "emr";

/// Patient aggregate: demographics plus every embedded sub-record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(rename = "objType")]
    pub object_type: String,
    #[serde(rename = "id")]
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    /// MM/DD/YYYY
    pub dob: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub heart_rate: Option<HeartRateReading>,
    #[serde(default)]
    pub blood_pressure: Option<BloodPressureReading>,
    #[serde(default)]
    pub insurance: Option<Policy>,
    #[serde(default)]
    pub rx_list: Vec<Prescription>,
}

impl PatientRecord {
    pub fn new(
        patient_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        dob: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            object_type: OBJECT_TYPE.to_string(),
            patient_id: patient_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            dob: dob.into(),
            address: address.into(),
            phone: phone.into(),
            heart_rate: None,
            blood_pressure: None,
            insurance: None,
            rx_list: Vec::new(),
        }
    }

    pub fn prescription(&self, rxid: &str) -> Option<&Prescription> {
        self.rx_list.iter().find(|rx| rx.rxid == rxid)
    }

    fn check_owner(&self, rx: &Prescription) -> Result<()> {
        if rx.patient_id != self.patient_id {
            return Err(LedgerError::validation(
                1,
                format!(
                    "prescription {} names patient {}, not {}",
                    rx.rxid, rx.patient_id, self.patient_id
                ),
            ));
        }
        Ok(())
    }
}

/// A single sub-field mutation of a [`PatientRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum PatientChange {
    SetHeartRate(HeartRateReading),
    SetBloodPressure(BloodPressureReading),
    SetInsurance(Policy),
    InsertPrescription(Prescription),
    ModifyPrescription(Prescription),
}

impl PatientChange {
    /// Short name for log events.
    pub fn name(&self) -> &'static str {
        match self {
            PatientChange::SetHeartRate(_) => "set_heart_rate",
            PatientChange::SetBloodPressure(_) => "set_blood_pressure",
            PatientChange::SetInsurance(_) => "set_insurance",
            PatientChange::InsertPrescription(_) => "insert_prescription",
            PatientChange::ModifyPrescription(_) => "modify_prescription",
        }
    }
}

impl Record for PatientRecord {
    const KIND: &'static str = "patient";

    type Change = PatientChange;

    fn key(&self) -> &str {
        &self.patient_id
    }

    fn normalize(&mut self) {
        for field in [
            &mut self.patient_id,
            &mut self.first_name,
            &mut self.last_name,
            &mut self.dob,
            &mut self.address,
            &mut self.phone,
        ] {
            *field = field.to_lowercase();
        }
        if self.object_type.is_empty() {
            self.object_type = OBJECT_TYPE.to_string();
        }
        for rx in &mut self.rx_list {
            rx.normalize();
        }
    }

    fn apply(&mut self, change: PatientChange) -> Result<()> {
        match change {
            PatientChange::SetHeartRate(reading) => {
                self.heart_rate = Some(reading);
            }
            PatientChange::SetBloodPressure(reading) => {
                self.blood_pressure = Some(reading);
            }
            PatientChange::SetInsurance(policy) => {
                if let Some(current) = &self.insurance {
                    if current.same_coverage(&policy) {
                        return Err(LedgerError::already_exists("insurance policy", policy.policy_id));
                    }
                }
                self.insurance = Some(policy);
            }
            PatientChange::InsertPrescription(mut rx) => {
                rx.normalize();
                self.check_owner(&rx)?;
                if self.prescription(&rx.rxid).is_some() {
                    return Err(LedgerError::already_exists("prescription", rx.rxid));
                }
                self.rx_list.push(rx);
            }
            PatientChange::ModifyPrescription(mut rx) => {
                rx.normalize();
                self.check_owner(&rx)?;
                let slot = self
                    .rx_list
                    .iter_mut()
                    .find(|existing| existing.rxid == rx.rxid)
                    .ok_or_else(|| LedgerError::not_found("prescription", rx.rxid.clone()))?;
                *slot = rx;
            }
        }
        Ok(())
    }
}
