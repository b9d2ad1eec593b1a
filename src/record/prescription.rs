use serde::{Deserialize, Serialize};

/// One prescription line item, identified by `rxid` within its patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub rxid: String,
    #[serde(rename = "id")]
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    /// When the prescription was written and filled.
    pub timestamp: u64,
    pub doctor: String,
    pub prescription: String,
    pub refills: u32,
    pub status: String,
}

impl Prescription {
    pub(crate) fn normalize(&mut self) {
        for field in [
            &mut self.rxid,
            &mut self.patient_id,
            &mut self.first_name,
            &mut self.last_name,
            &mut self.doctor,
            &mut self.prescription,
            &mut self.status,
        ] {
            *field = field.to_lowercase();
        }
    }
}
