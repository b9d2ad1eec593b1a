//! Integration tests for operation dispatch through `PatientService`.

use std::sync::Arc;

use emr_ledger::{
    logging, Codec, InMemoryLedger, LedgerConfig, LedgerError, PatientOperation, PatientService,
};
use serde_json::json;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn service() -> PatientService<InMemoryLedger> {
    logging::init("warn");
    let service = PatientService::new(InMemoryLedger::new(), LedgerConfig::default()).unwrap();
    service
        .dispatch(
            "initPerson",
            &args(&["P01", "John", "Doe", "01/01/2000", "111 Main St", "555-0100"]),
        )
        .unwrap();
    service
}

fn rx_args(rxid: &str, status: &str) -> Vec<String> {
    args(&[rxid, "p01", "john", "doe", "1000", "House", "Vicodin", "2", status])
}

#[test]
fn get_person_returns_demographics() {
    let person = service().dispatch("getPerson", &args(&["p01"])).unwrap();
    assert_eq!(
        person,
        json!({
            "patientID": "p01",
            "firstName": "john",
            "lastName": "doe",
            "dob": "01/01/2000",
            "address": "111 main st",
            "phone": "555-0100"
        })
    );
}

#[test]
fn heart_rate_history_is_deduplicated() {
    let service = service();
    for (rate, ts) in [("70", "100"), ("70", "100"), ("75", "200"), ("75", "200"), ("80", "300")] {
        service
            .dispatch("newHeartRateMessage", &args(&["p01", rate, ts]))
            .unwrap();
    }

    let history = service
        .dispatch("getHeartRateHistory", &args(&["p01"]))
        .unwrap();
    assert_eq!(
        history,
        json!({
            "patientID": "p01",
            "heartRateHistory": [
                { "heartRate": 70, "timestamp": 100 },
                { "heartRate": 75, "timestamp": 200 },
                { "heartRate": 80, "timestamp": 300 }
            ]
        })
    );
}

#[test]
fn blood_pressure_round_trip() {
    let service = service();
    service
        .dispatch("newBloodPressure", &args(&["p01", "120", "80", "5"]))
        .unwrap();
    let history = service
        .dispatch("getBloodPressureHistory", &args(&["p01"]))
        .unwrap();
    assert_eq!(
        history["bloodPressureHistory"],
        json!([{ "low": 80, "high": 120, "timestamp": 5 }])
    );
}

#[test]
fn insurance_and_its_history() {
    let service = service();
    service
        .dispatch("insertInsurance", &args(&["p01", "Acme", "20301231", "POL-1"]))
        .unwrap();
    let err = service
        .dispatch("insertInsurance", &args(&["p01", "Acme", "20301231", "POL-1"]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::AlreadyExists { .. }));

    let current = service.dispatch("getInsurance", &args(&["p01"])).unwrap();
    assert_eq!(current["insurance"]["policyID"], "POL-1");
    assert_eq!(current["insurance"]["expDate"], 20301231);

    let history = service
        .dispatch("getInsuranceHistory", &args(&["p01"]))
        .unwrap();
    assert_eq!(history["insuranceHistory"].as_array().unwrap().len(), 1);
}

#[test]
fn prescriptions_insert_modify_and_history() {
    let service = service();
    service.dispatch("insertRx", &rx_args("RX1", "filled")).unwrap();
    service.dispatch("insertRx", &rx_args("rx2", "filled")).unwrap();
    service.dispatch("modifyRx", &rx_args("rx1", "Expired")).unwrap();

    let err = service.dispatch("insertRx", &rx_args("rx2", "filled")).unwrap_err();
    assert!(matches!(err, LedgerError::AlreadyExists { kind: "prescription", .. }));
    let err = service.dispatch("modifyRx", &rx_args("rx9", "filled")).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { kind: "prescription", .. }));

    let current = service.dispatch("getRxForPatient", &args(&["p01"])).unwrap();
    assert_eq!(current["rxList"][0]["status"], "expired");
    assert_eq!(current["rxList"][0]["doctor"], "house");

    let history = service
        .dispatch("getRxHistoryOfPatient", &args(&["p01"]))
        .unwrap();
    assert_eq!(history["rxHistory"].as_array().unwrap().len(), 3);
}

#[test]
fn all_rx_spans_the_roster() {
    let service = service();
    service
        .dispatch("initPerson", &args(&["p02", "Jane", "Roe", "02/02/2000", "x", "y"]))
        .unwrap();
    service.dispatch("insertRx", &rx_args("rx1", "filled")).unwrap();
    service
        .dispatch(
            "insertRx",
            &args(&["rx7", "p02", "jane", "roe", "5", "grey", "aspirin", "0", "filled"]),
        )
        .unwrap();

    let all = service.dispatch("getAllRx", &[]).unwrap();
    let ids: Vec<&str> = all["rxList"]
        .as_array()
        .unwrap()
        .iter()
        .map(|rx| rx["rxid"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["rx1", "rx7"]);
}

#[test]
fn field_history_by_name() {
    let service = service();
    service
        .dispatch("newHeartRateMessage", &args(&["p01", "70", "100"]))
        .unwrap();

    let history = service
        .dispatch("getFieldHistory", &args(&["p01", "currentHeartRate"]))
        .unwrap();
    assert_eq!(history["subField"], "currentHeartRate");
    assert_eq!(history["history"][0]["value"]["timestamp"], 100);
    assert!(history["history"][0]["version"].is_u64());

    let err = service
        .dispatch("getFieldHistory", &args(&["p01", "mood"]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { index: 1, .. }));
}

#[test]
fn record_history_lists_every_version() {
    let service = service();
    service
        .dispatch("newHeartRateMessage", &args(&["p01", "70", "100"]))
        .unwrap();

    let history = service.dispatch("getRecordHistory", &args(&["p01"])).unwrap();
    let versions = history["history"].as_array().unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0]["isDelete"], false);
    assert!(versions[0]["value"]["heartRate"].is_null());
    assert_eq!(versions[1]["value"]["heartRate"]["heartRate"], 70);
}

#[test]
fn unknown_operation_is_a_single_error_kind() {
    let err = service().dispatch("hack", &[]).unwrap_err();
    assert_eq!(err, LedgerError::UnknownOperation("hack".into()));
}

#[test]
fn validation_errors_name_the_argument() {
    let service = service();

    let err = service
        .dispatch("newHeartRateMessage", &args(&["p01", "fast", "100"]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { index: 1, .. }));

    let err = service.dispatch("getPerson", &args(&[""])).unwrap_err();
    assert!(matches!(err, LedgerError::Validation { index: 0, .. }));

    let err = service.dispatch("getPeople", &args(&["extra"])).unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }));
}

#[test]
fn writes_to_missing_patient_are_not_found() {
    let err = service()
        .dispatch("newHeartRateMessage", &args(&["p99", "70", "1"]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { kind: "patient", .. }));
}

#[test]
fn ledger_outage_is_reported() {
    let ledger = InMemoryLedger::new();
    let service = PatientService::new(ledger.clone(), LedgerConfig::default()).unwrap();
    ledger.set_unavailable(true);

    let err = service
        .dispatch("initPerson", &args(&["p01", "a", "b", "c", "d", "e"]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::CollaboratorUnavailable(_)));
}

#[test]
fn shared_ledger_behind_an_arc() {
    let ledger = Arc::new(InMemoryLedger::new());
    let config = LedgerConfig::default().with_codec(Codec::Bitcode);
    let writer = PatientService::new(Arc::clone(&ledger), config.clone()).unwrap();
    let reader = PatientService::new(ledger, config).unwrap();

    writer
        .dispatch("initPerson", &args(&["p01", "a", "b", "c", "d", "e"]))
        .unwrap();
    let people = reader.dispatch("getPeople", &[]).unwrap();
    assert_eq!(people["people"][0]["patientID"], "p01");
}

#[test]
fn every_operation_parses_by_name() {
    for op in PatientOperation::ALL {
        assert_eq!(op.name().parse::<PatientOperation>().unwrap(), op);
    }
}
