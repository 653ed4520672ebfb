use telerisk_query::{normalize_criteria, normalized_criteria_hash, RiskCriteria};

#[test]
fn criteria_hash_is_stable_across_spelling_and_key_order() {
    let a = RiskCriteria::from_pairs(["stage=Monitoring & Control", "flag=Pending QA"])
        .expect("a");
    let b = RiskCriteria::from_pairs(["Flag_Status=pending_qa", "RMS_Stage=monitoring"])
        .expect("b");
    assert_eq!(
        normalized_criteria_hash(&a).expect("hash a"),
        normalized_criteria_hash(&b).expect("hash b")
    );

    let c = RiskCriteria::from_pairs(["stage=Closure"]).expect("c");
    assert_ne!(
        normalized_criteria_hash(&a).expect("hash a"),
        normalized_criteria_hash(&c).expect("hash c")
    );
}

#[test]
fn normalized_criteria_use_canonical_labels() {
    let raw = RiskCriteria::from_pairs(["risk_id= R010 ", "methodology=AGILE", "flag=approved"])
        .expect("raw");
    let normalized = normalize_criteria(&raw).expect("normalize");
    assert_eq!(normalized.risk_id.as_deref(), Some("R010"));
    assert_eq!(normalized.methodology.as_deref(), Some("Agile"));
    assert_eq!(normalized.flag_status.as_deref(), Some("Approved"));
    assert!(normalized.rms_stage.is_none());
    assert_eq!(normalize_criteria(&normalized).expect("idempotent"), normalized);
}
