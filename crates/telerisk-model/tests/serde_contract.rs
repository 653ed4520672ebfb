// SPDX-License-Identifier: Apache-2.0

use telerisk_model::{FlagStatus, Methodology, RiskId, RiskRecord, RmsStage};

#[test]
fn vocabulary_serializes_as_register_labels() {
    assert_eq!(
        serde_json::to_value(FlagStatus::PendingQa).expect("flag"),
        serde_json::json!("Pending QA")
    );
    assert_eq!(
        serde_json::to_value(RmsStage::MonitoringAndControl).expect("stage"),
        serde_json::json!("Monitoring & Control")
    );
    assert_eq!(
        serde_json::to_value(Methodology::Hybrid).expect("methodology"),
        serde_json::json!("Hybrid")
    );
}

#[test]
fn record_json_is_flat_and_rejects_unknown_fields() {
    let rec = RiskRecord::new(
        RiskId::parse("R007").expect("id"),
        RmsStage::Execution,
        Methodology::Waterfall,
        "Dual-vendor sourcing",
        FlagStatus::Approved,
    )
    .expect("record")
    .with_attribute("Risk_Owner", "Procurement");

    let value = serde_json::to_value(&rec).expect("encode");
    assert_eq!(value["risk_id"], "R007");
    assert_eq!(value["rms_stage"], "Execution");
    assert_eq!(value["attributes"]["Risk_Owner"], "Procurement");

    let mut tampered = value.clone();
    tampered["owner"] = serde_json::json!("x");
    assert!(serde_json::from_value::<RiskRecord>(tampered).is_err());
    assert_eq!(
        serde_json::from_value::<RiskRecord>(value).expect("decode"),
        rec
    );
}

#[test]
fn deserialization_enforces_record_invariants() {
    let valid = serde_json::json!({
        "risk_id": " R008 ",
        "rms_stage": "Planning",
        "methodology": "Agile",
        "recommender_tag": "Vendor audit",
        "flag_status": "Rejected",
    });
    let rec: RiskRecord = serde_json::from_value(valid.clone()).expect("decode");
    assert_eq!(rec.risk_id.as_str(), "R008");
    assert!(rec.attributes.is_empty());

    let mut blank_id = valid.clone();
    blank_id["risk_id"] = serde_json::json!("   ");
    let err = serde_json::from_value::<RiskRecord>(blank_id).expect_err("blank id");
    assert!(err.to_string().contains("risk id must not be empty"), "{err}");

    let mut blank_tag = valid;
    blank_tag["recommender_tag"] = serde_json::json!("  ");
    let err = serde_json::from_value::<RiskRecord>(blank_tag).expect_err("blank tag");
    assert!(err.to_string().contains("recommender tag"), "{err}");

    assert!(serde_json::from_value::<RiskId>(serde_json::json!("")).is_err());
}
