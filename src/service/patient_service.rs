use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::history::{
    CurrentBloodPressure, CurrentHeartRate, FieldTimeline, InsurancePolicy, PrescriptionList,
    SubField,
};
use crate::index::CompositeIndex;
use crate::ledger::{Ledger, SnapshotVersion, Versioned};
use crate::record::{
    BloodPressureReading, HeartRateReading, PatientChange, PatientRecord, Policy, Prescription,
    Record,
};
use crate::repository::{AggregateRepository, RecordVersion};
use crate::validate::{fold_key, Args};

use super::operation::PatientOperation;
use super::response::{PatientSummary, PersonView};

/// Patient entry points over one ledger.
///
/// Typed methods take already-parsed values; [`PatientService::dispatch`]
/// takes an operation name and positional string arguments, validates them,
/// and renders the result as JSON.
pub struct PatientService<L> {
    patients: AggregateRepository<L, PatientRecord>,
    roster: CompositeIndex<L>,
    config: LedgerConfig,
}

impl<L: Ledger + Clone> PatientService<L> {
    /// Fails if `config` is invalid or the operation table is inconsistent.
    pub fn new(ledger: L, config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        PatientOperation::verify()?;

        Ok(Self {
            patients: AggregateRepository::new(ledger.clone()).with_codec(config.codec),
            roster: CompositeIndex::new(ledger),
            config,
        })
    }

    pub fn patients(&self) -> &AggregateRepository<L, PatientRecord> {
        &self.patients
    }

    pub fn roster(&self) -> &CompositeIndex<L> {
        &self.roster
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Create a patient and list it in the roster.
    ///
    /// The roster entry is written first. It is idempotent, so a retry after
    /// a failed create completes the pair.
    pub fn init_person(&self, mut record: PatientRecord) -> Result<Versioned<PatientRecord>> {
        record.normalize();
        let id = fold_key(record.key())?;
        self.roster.add_to_index(
            &self.config.roster_index,
            &[self.config.roster_category.as_str(), id.as_str()],
        )?;
        self.patients.create(record)
    }

    pub fn person(&self, id: &str) -> Result<PersonView> {
        Ok(PersonView::from(&self.patients.load(id)?.data))
    }

    pub fn people(&self) -> Result<Vec<PatientSummary>> {
        Ok(self
            .roster_records()?
            .iter()
            .map(PatientSummary::from)
            .collect())
    }

    pub fn record_heart_rate(&self, id: &str, reading: HeartRateReading) -> Result<SnapshotVersion> {
        self.mutate(id, PatientChange::SetHeartRate(reading))
    }

    pub fn heart_rate_history(&self, id: &str) -> Result<FieldTimeline<HeartRateReading>> {
        self.patients.timeline(id, &CurrentHeartRate)
    }

    pub fn record_blood_pressure(
        &self,
        id: &str,
        reading: BloodPressureReading,
    ) -> Result<SnapshotVersion> {
        self.mutate(id, PatientChange::SetBloodPressure(reading))
    }

    pub fn blood_pressure_history(&self, id: &str) -> Result<FieldTimeline<BloodPressureReading>> {
        self.patients.timeline(id, &CurrentBloodPressure)
    }

    pub fn insert_insurance(&self, id: &str, policy: Policy) -> Result<SnapshotVersion> {
        self.mutate(id, PatientChange::SetInsurance(policy))
    }

    pub fn insurance(&self, id: &str) -> Result<Option<Policy>> {
        Ok(self.patients.load(id)?.data.insurance)
    }

    pub fn insurance_history(&self, id: &str) -> Result<FieldTimeline<Policy>> {
        self.patients.timeline(id, &InsurancePolicy)
    }

    /// Add a prescription to the patient it names.
    pub fn insert_rx(&self, rx: Prescription) -> Result<SnapshotVersion> {
        let id = rx.patient_id.clone();
        self.mutate(&id, PatientChange::InsertPrescription(rx))
    }

    /// Replace the prescription with the same `rxid`.
    pub fn modify_rx(&self, rx: Prescription) -> Result<SnapshotVersion> {
        let id = rx.patient_id.clone();
        self.mutate(&id, PatientChange::ModifyPrescription(rx))
    }

    pub fn rx_for_patient(&self, id: &str) -> Result<Vec<Prescription>> {
        Ok(self.patients.load(id)?.data.rx_list)
    }

    /// Prescriptions of every rostered patient, in roster order.
    pub fn all_rx(&self) -> Result<Vec<Prescription>> {
        Ok(self
            .roster_records()?
            .into_iter()
            .flat_map(|record| record.rx_list)
            .collect())
    }

    pub fn rx_history(&self, id: &str) -> Result<FieldTimeline<Vec<Prescription>>> {
        self.patients.timeline(id, &PrescriptionList)
    }

    /// Timeline of `field`, rendered as `[{version, value}, …]`.
    pub fn field_history(&self, id: &str, field: SubField) -> Result<Value> {
        let history = match field {
            SubField::CurrentHeartRate => serde_json::to_value(self.heart_rate_history(id)?)?,
            SubField::CurrentBloodPressure => {
                serde_json::to_value(self.blood_pressure_history(id)?)?
            }
            SubField::Policy => serde_json::to_value(self.insurance_history(id)?)?,
            SubField::PrescriptionList => serde_json::to_value(self.rx_history(id)?)?,
        };
        Ok(history)
    }

    pub fn record_history(&self, id: &str) -> Result<Vec<RecordVersion<PatientRecord>>> {
        self.patients.versions(id)
    }

    /// Run the operation called `name` with positional `args`.
    pub fn dispatch(&self, name: &str, args: &[String]) -> Result<Value> {
        let op: PatientOperation = name.parse()?;
        let args = Args::new(args);
        args.expect_len(op.arity())?;
        debug!(operation = op.name(), "dispatching");

        match op {
            PatientOperation::InitPerson => {
                let record = PatientRecord::new(
                    args.natural_key(0)?,
                    args.lowercase(1)?,
                    args.lowercase(2)?,
                    args.lowercase(3)?,
                    args.lowercase(4)?,
                    args.lowercase(5)?,
                );
                let created = self.init_person(record)?;
                Ok(written(&created.data.patient_id, created.version))
            }
            PatientOperation::GetPerson => {
                Ok(serde_json::to_value(self.person(&args.natural_key(0)?)?)?)
            }
            PatientOperation::GetPeople => Ok(json!({ "people": self.people()? })),
            PatientOperation::NewHeartRateMessage => {
                let id = args.natural_key(0)?;
                let reading = HeartRateReading::new(args.integer(1)?, args.integer(2)?);
                Ok(written(&id, self.record_heart_rate(&id, reading)?))
            }
            PatientOperation::GetHeartRateHistory => {
                let id = args.natural_key(0)?;
                let history = self.heart_rate_history(&id)?.into_values();
                Ok(json!({ "patientID": id, "heartRateHistory": history }))
            }
            PatientOperation::NewBloodPressure => {
                let id = args.natural_key(0)?;
                let reading =
                    BloodPressureReading::new(args.integer(1)?, args.integer(2)?, args.integer(3)?);
                Ok(written(&id, self.record_blood_pressure(&id, reading)?))
            }
            PatientOperation::GetBloodPressureHistory => {
                let id = args.natural_key(0)?;
                let history = self.blood_pressure_history(&id)?.into_values();
                Ok(json!({ "patientID": id, "bloodPressureHistory": history }))
            }
            PatientOperation::InsertInsurance => {
                let id = args.natural_key(0)?;
                let policy = Policy::new(args.non_empty(1)?, args.integer(2)?, args.non_empty(3)?);
                Ok(written(&id, self.insert_insurance(&id, policy)?))
            }
            PatientOperation::GetInsurance => {
                let id = args.natural_key(0)?;
                let insurance = self.insurance(&id)?;
                Ok(json!({ "patientID": id, "insurance": insurance }))
            }
            PatientOperation::GetInsuranceHistory => {
                let id = args.natural_key(0)?;
                let history = self.insurance_history(&id)?.into_values();
                Ok(json!({ "patientID": id, "insuranceHistory": history }))
            }
            PatientOperation::InsertRx => {
                let rx = prescription_from(&args)?;
                let id = rx.patient_id.clone();
                Ok(written(&id, self.insert_rx(rx)?))
            }
            PatientOperation::ModifyRx => {
                let rx = prescription_from(&args)?;
                let id = rx.patient_id.clone();
                Ok(written(&id, self.modify_rx(rx)?))
            }
            PatientOperation::GetRxForPatient => {
                let id = args.natural_key(0)?;
                let rx_list = self.rx_for_patient(&id)?;
                Ok(json!({ "patientID": id, "rxList": rx_list }))
            }
            PatientOperation::GetAllRx => Ok(json!({ "rxList": self.all_rx()? })),
            PatientOperation::GetRxHistoryOfPatient => {
                let id = args.natural_key(0)?;
                let history = self.rx_history(&id)?.into_values();
                Ok(json!({ "patientID": id, "rxHistory": history }))
            }
            PatientOperation::GetFieldHistory => {
                let id = args.natural_key(0)?;
                let field: SubField = args.non_empty(1)?.parse()?;
                let history = self.field_history(&id, field)?;
                Ok(json!({ "patientID": id, "subField": field.as_str(), "history": history }))
            }
            PatientOperation::GetRecordHistory => {
                let id = args.natural_key(0)?;
                let history = self.record_history(&id)?;
                Ok(json!({ "patientID": id, "history": history }))
            }
        }
    }

    fn mutate(&self, id: &str, change: PatientChange) -> Result<SnapshotVersion> {
        let change_name = change.name();
        let updated = self.patients.mutate_sub_field(id, change)?;
        debug!(patient = %updated.data.patient_id, change = change_name, version = %updated.version, "patient updated");
        Ok(updated.version)
    }

    // Orphan roster entries (listed but never created) are skipped.
    fn roster_records(&self) -> Result<Vec<PatientRecord>> {
        let entries = self.roster.scan_index(
            &self.config.roster_index,
            &[self.config.roster_category.as_str()],
        )?;

        let mut records = Vec::with_capacity(entries.len());
        for attributes in entries {
            let Some(id) = attributes.get(1) else {
                warn!(index = %self.config.roster_index, ?attributes, "malformed roster entry");
                continue;
            };
            match self.patients.load(id) {
                Ok(loaded) => records.push(loaded.data),
                Err(LedgerError::NotFound { .. }) => {
                    warn!(patient = %id, "roster entry without a record");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(records)
    }
}

fn written(id: &str, version: SnapshotVersion) -> Value {
    json!({ "patientID": id, "version": version.get() })
}

//   0      1   2      3     4          5       6             7        8
// rxid, id, first, last, timestamp, doctor, prescription, refills, status
fn prescription_from(args: &Args<'_>) -> Result<Prescription> {
    Ok(Prescription {
        rxid: args.natural_key(0)?,
        patient_id: args.natural_key(1)?,
        first_name: args.lowercase(2)?,
        last_name: args.lowercase(3)?,
        timestamp: args.integer(4)?,
        doctor: args.lowercase(5)?,
        prescription: args.lowercase(6)?,
        refills: args.integer(7)?,
        status: args.lowercase(8)?,
    })
}
