use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, Result};

/// Every entry point the patient service answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientOperation {
    InitPerson,
    GetPerson,
    GetPeople,
    NewHeartRateMessage,
    GetHeartRateHistory,
    NewBloodPressure,
    GetBloodPressureHistory,
    InsertInsurance,
    GetInsurance,
    GetInsuranceHistory,
    InsertRx,
    ModifyRx,
    GetRxForPatient,
    GetAllRx,
    GetRxHistoryOfPatient,
    GetFieldHistory,
    GetRecordHistory,
}

impl PatientOperation {
    pub const ALL: [PatientOperation; 17] = [
        PatientOperation::InitPerson,
        PatientOperation::GetPerson,
        PatientOperation::GetPeople,
        PatientOperation::NewHeartRateMessage,
        PatientOperation::GetHeartRateHistory,
        PatientOperation::NewBloodPressure,
        PatientOperation::GetBloodPressureHistory,
        PatientOperation::InsertInsurance,
        PatientOperation::GetInsurance,
        PatientOperation::GetInsuranceHistory,
        PatientOperation::InsertRx,
        PatientOperation::ModifyRx,
        PatientOperation::GetRxForPatient,
        PatientOperation::GetAllRx,
        PatientOperation::GetRxHistoryOfPatient,
        PatientOperation::GetFieldHistory,
        PatientOperation::GetRecordHistory,
    ];

    /// Wire name, as callers spell it.
    pub const fn name(self) -> &'static str {
        match self {
            PatientOperation::InitPerson => "initPerson",
            PatientOperation::GetPerson => "getPerson",
            PatientOperation::GetPeople => "getPeople",
            PatientOperation::NewHeartRateMessage => "newHeartRateMessage",
            PatientOperation::GetHeartRateHistory => "getHeartRateHistory",
            PatientOperation::NewBloodPressure => "newBloodPressure",
            PatientOperation::GetBloodPressureHistory => "getBloodPressureHistory",
            PatientOperation::InsertInsurance => "insertInsurance",
            PatientOperation::GetInsurance => "getInsurance",
            PatientOperation::GetInsuranceHistory => "getInsuranceHistory",
            PatientOperation::InsertRx => "insertRx",
            PatientOperation::ModifyRx => "modifyRx",
            PatientOperation::GetRxForPatient => "getRxForPatient",
            PatientOperation::GetAllRx => "getAllRx",
            PatientOperation::GetRxHistoryOfPatient => "getRxHistoryOfPatient",
            PatientOperation::GetFieldHistory => "getFieldHistory",
            PatientOperation::GetRecordHistory => "getRecordHistory",
        }
    }

    /// Exact number of string arguments the operation takes.
    pub const fn arity(self) -> usize {
        match self {
            PatientOperation::GetPeople | PatientOperation::GetAllRx => 0,
            PatientOperation::GetPerson
            | PatientOperation::GetHeartRateHistory
            | PatientOperation::GetBloodPressureHistory
            | PatientOperation::GetInsurance
            | PatientOperation::GetInsuranceHistory
            | PatientOperation::GetRxForPatient
            | PatientOperation::GetRxHistoryOfPatient
            | PatientOperation::GetRecordHistory => 1,
            PatientOperation::GetFieldHistory => 2,
            PatientOperation::NewHeartRateMessage => 3,
            PatientOperation::NewBloodPressure | PatientOperation::InsertInsurance => 4,
            PatientOperation::InitPerson => 6,
            PatientOperation::InsertRx | PatientOperation::ModifyRx => 9,
        }
    }

    /// Whether the operation writes to the ledger.
    pub const fn is_write(self) -> bool {
        matches!(
            self,
            PatientOperation::InitPerson
                | PatientOperation::NewHeartRateMessage
                | PatientOperation::NewBloodPressure
                | PatientOperation::InsertInsurance
                | PatientOperation::InsertRx
                | PatientOperation::ModifyRx
        )
    }

    /// Check that every operation name is distinct and parses back to itself.
    pub fn verify() -> Result<()> {
        let mut seen = HashSet::new();
        for op in Self::ALL {
            if !seen.insert(op.name()) || op.name().parse::<PatientOperation>()? != op {
                return Err(LedgerError::UnknownOperation(format!(
                    "operation table is inconsistent at {}",
                    op.name()
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for PatientOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatientOperation {
    type Err = LedgerError;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| LedgerError::UnknownOperation(name.to_string()))
    }
}
