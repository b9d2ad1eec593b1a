//! Integration tests for sub-field timeline reconstruction.

use emr_ledger::{
    AggregateRepository, BloodPressureReading, Codec, CurrentBloodPressure, CurrentHeartRate,
    ExpectedVersion, HeartRateReading, InMemoryLedger, InsurancePolicy, Ledger, LedgerError,
    PatientChange, PatientRecord, Policy, Prescription, PrescriptionList,
};

type Patients = AggregateRepository<InMemoryLedger, PatientRecord>;

fn seeded(codec: Codec) -> Patients {
    let repo = AggregateRepository::new(InMemoryLedger::new()).with_codec(codec);
    repo.create(PatientRecord::new("p01", "ada", "lovelace", "12/10/1815", "london", "1"))
        .unwrap();
    repo
}

fn heart_rate(repo: &Patients, rate: u32, ts: u64) {
    repo.mutate_sub_field("p01", PatientChange::SetHeartRate(HeartRateReading::new(rate, ts)))
        .unwrap();
}

fn rx(rxid: &str, status: &str) -> Prescription {
    Prescription {
        rxid: rxid.into(),
        patient_id: "p01".into(),
        first_name: "ada".into(),
        last_name: "lovelace".into(),
        timestamp: 7,
        doctor: "babbage".into(),
        prescription: "laudanum".into(),
        refills: 0,
        status: status.into(),
    }
}

#[test]
fn repeated_timestamps_collapse() {
    for codec in [Codec::Json, Codec::Bitcode] {
        let repo = seeded(codec);
        for ts in [100, 100, 200, 200, 200, 300] {
            heart_rate(&repo, 70, ts);
        }

        let timeline = repo.timeline("p01", &CurrentHeartRate).unwrap();
        let stamps: Vec<u64> = timeline.values().iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![100, 200, 300]);
    }
}

#[test]
fn points_carry_the_first_version_of_each_value() {
    let repo = seeded(Codec::Json);
    heart_rate(&repo, 70, 100);
    heart_rate(&repo, 70, 100);
    heart_rate(&repo, 71, 200);

    let versions: Vec<u64> = repo
        .history("p01")
        .unwrap()
        .map(|entry| entry.unwrap().version.get())
        .collect();
    let timeline = repo.timeline("p01", &CurrentHeartRate).unwrap();
    let points: Vec<u64> = timeline.points().iter().map(|p| p.version.get()).collect();
    assert_eq!(points, vec![versions[1], versions[3]]);
}

#[test]
fn writes_to_other_fields_do_not_repeat_a_reading() {
    let repo = seeded(Codec::Json);
    heart_rate(&repo, 70, 100);
    repo.mutate_sub_field(
        "p01",
        PatientChange::SetBloodPressure(BloodPressureReading::new(120, 80, 5)),
    )
    .unwrap();
    repo.mutate_sub_field("p01", PatientChange::InsertPrescription(rx("rx1", "filled")))
        .unwrap();
    heart_rate(&repo, 65, 150);

    assert_eq!(repo.timeline("p01", &CurrentHeartRate).unwrap().len(), 2);
    assert_eq!(repo.timeline("p01", &CurrentBloodPressure).unwrap().len(), 1);
}

#[test]
fn field_never_set_has_an_empty_timeline() {
    let repo = seeded(Codec::Json);
    heart_rate(&repo, 70, 100);

    assert!(repo.timeline("p01", &CurrentBloodPressure).unwrap().is_empty());
    assert!(repo.timeline("p01", &InsurancePolicy).unwrap().is_empty());
    assert!(repo.timeline("p01", &PrescriptionList).unwrap().is_empty());
}

#[test]
fn list_timeline_sees_inserts_and_modifications() {
    let repo = seeded(Codec::Json);
    repo.mutate_sub_field("p01", PatientChange::InsertPrescription(rx("rx1", "filled")))
        .unwrap();
    repo.mutate_sub_field("p01", PatientChange::InsertPrescription(rx("rx2", "filled")))
        .unwrap();
    heart_rate(&repo, 70, 100);
    repo.mutate_sub_field("p01", PatientChange::ModifyPrescription(rx("rx1", "expired")))
        .unwrap();

    let timeline = repo.timeline("p01", &PrescriptionList).unwrap();
    let states: Vec<Vec<(String, String)>> = timeline
        .values()
        .iter()
        .map(|list| list.iter().map(|rx| (rx.rxid.clone(), rx.status.clone())).collect())
        .collect();
    assert_eq!(
        states,
        vec![
            vec![("rx1".to_string(), "filled".to_string())],
            vec![
                ("rx1".to_string(), "filled".to_string()),
                ("rx2".to_string(), "filled".to_string())
            ],
            vec![
                ("rx1".to_string(), "expired".to_string()),
                ("rx2".to_string(), "filled".to_string())
            ],
        ]
    );
}

#[test]
fn policy_timeline_records_each_distinct_policy() {
    let repo = seeded(Codec::Json);
    for policy in [
        Policy::new("acme", 2030, "pol-1"),
        Policy::new("acme", 2031, "pol-1"),
        Policy::new("globex", 2031, "pol-2"),
    ] {
        repo.mutate_sub_field("p01", PatientChange::SetInsurance(policy))
            .unwrap();
    }
    heart_rate(&repo, 70, 100);

    let names: Vec<String> = repo
        .timeline("p01", &InsurancePolicy)
        .unwrap()
        .into_values()
        .into_iter()
        .map(|policy| policy.name)
        .collect();
    assert_eq!(names, vec!["acme", "acme", "globex"]);
}

#[test]
fn timeline_survives_a_corrupt_middle_version() {
    let repo = seeded(Codec::Json);
    heart_rate(&repo, 70, 100);
    repo.ledger()
        .put("p01", b"\xff\xfe".to_vec(), ExpectedVersion::Any)
        .unwrap();
    let current = repo.ledger().get("p01").unwrap().unwrap().version;
    let mut record = PatientRecord::new("p01", "ada", "lovelace", "12/10/1815", "london", "1");
    record.heart_rate = Some(HeartRateReading::new(90, 200));
    repo.ledger()
        .put("p01", serde_json::to_vec(&record).unwrap(), ExpectedVersion::Exact(current))
        .unwrap();

    let timeline = repo.timeline("p01", &CurrentHeartRate).unwrap();
    let stamps: Vec<u64> = timeline.values().iter().map(|r| r.timestamp).collect();
    assert_eq!(stamps, vec![100, 200]);
}

#[test]
fn timeline_of_unknown_patient_is_not_found() {
    let repo = seeded(Codec::Json);
    assert!(matches!(
        repo.timeline("p99", &CurrentHeartRate),
        Err(LedgerError::NotFound { .. })
    ));
}

#[test]
fn timeline_ignores_deletes() {
    let repo = seeded(Codec::Json);
    heart_rate(&repo, 70, 100);
    repo.ledger().delete("p01").unwrap();

    let mut record = PatientRecord::new("p01", "ada", "lovelace", "12/10/1815", "london", "1");
    record.heart_rate = Some(HeartRateReading::new(70, 100));
    repo.create(record).unwrap();
    heart_rate(&repo, 75, 300);

    let timeline = repo.timeline("p01", &CurrentHeartRate).unwrap();
    let stamps: Vec<u64> = timeline.values().iter().map(|r| r.timestamp).collect();
    assert_eq!(stamps, vec![100, 300]);
}
