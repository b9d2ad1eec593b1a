use emr_ledger::{PatientRecord, Prescription};

pub fn patient(id: &str) -> PatientRecord {
    PatientRecord::new(id, "John", "Doe", "01/01/2000", "111 Main St", "555-0100")
}

pub fn rx(rxid: &str, patient_id: &str, status: &str) -> Prescription {
    Prescription {
        rxid: rxid.into(),
        patient_id: patient_id.into(),
        first_name: "john".into(),
        last_name: "doe".into(),
        timestamp: 1_000,
        doctor: "house".into(),
        prescription: "amoxicillin".into(),
        refills: 2,
        status: status.into(),
    }
}
