// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use serde_json::json;
use telerisk_query::{parse_criteria, Predicate, QueryErrorCode, RiskCriteria};
use telerisk_model::{Methodology, RmsStage};

#[test]
fn pairs_accept_snake_case_and_column_names() {
    let a = RiskCriteria::from_pairs(["risk_id=R001", "rms_stage=Planning"]).expect("snake");
    let b = RiskCriteria::from_pairs(["Risk_ID = R001", "RMS_Stage=Planning"]).expect("columns");
    assert_eq!(a, b);
    assert_eq!(a.risk_id.as_deref(), Some("R001"));
}

#[test]
fn pairs_reject_bad_shapes() {
    let cases = [
        ("priority=High", QueryErrorCode::UnknownCriterion),
        ("stage", QueryErrorCode::Malformed),
        ("stage=  ", QueryErrorCode::InvalidValue),
    ];
    for (pair, code) in cases {
        let err = RiskCriteria::from_pairs([pair]).expect_err(pair);
        assert_eq!(err.code, code, "{pair}");
    }
    let err = RiskCriteria::from_pairs(["stage=Planning", "RMS_Stage=Closure"]).expect_err("repeat");
    assert_eq!(err.code, QueryErrorCode::Malformed);
}

#[test]
fn json_criteria_use_snake_case_keys_only() {
    let c = RiskCriteria::from_json(&json!({"methodology": "agile", "flag_status": "Approved"}))
        .expect("json");
    assert_eq!(c.methodology.as_deref(), Some("agile"));
    assert!(c.risk_id.is_none());

    let err = RiskCriteria::from_json(&json!({"Risk_Title": "x"})).expect_err("unknown");
    assert_eq!(err.code, QueryErrorCode::UnknownCriterion);
    let err = RiskCriteria::from_json(&json!({"risk_id": 7})).expect_err("number");
    assert_eq!(err.code, QueryErrorCode::Malformed);
    let err = RiskCriteria::from_json(&json!(["risk_id"])).expect_err("array");
    assert_eq!(err.code, QueryErrorCode::Malformed);
}

#[test]
fn merge_rejects_conflicting_sources() {
    let flags = RiskCriteria {
        rms_stage: Some("Planning".to_string()),
        ..RiskCriteria::default()
    };
    let pairs = RiskCriteria::from_pairs(["methodology=Agile"]).expect("pairs");
    let merged = flags.clone().merge(pairs).expect("merge");
    assert_eq!(merged.methodology.as_deref(), Some("Agile"));
    assert_eq!(merged.rms_stage.as_deref(), Some("Planning"));

    let clash = RiskCriteria::from_pairs(["stage=Closure"]).expect("pairs");
    assert!(flags.merge(clash).is_err());
}

#[test]
fn parsed_predicates_follow_fixed_order() {
    let c = RiskCriteria::from_pairs(["methodology=hybrid", "stage=closing"]).expect("pairs");
    let ast = parse_criteria(&c).expect("parse");
    assert_eq!(
        ast.predicates,
        vec![
            Predicate::Stage(RmsStage::Closure),
            Predicate::Methodology(Methodology::Hybrid)
        ]
    );
}

proptest! {
    #[test]
    fn parser_never_panics_under_random_inputs(
        risk_id in proptest::option::of(".*"),
        rms_stage in proptest::option::of(".*"),
        methodology in proptest::option::of(".*"),
        flag_status in proptest::option::of(".*"),
    ) {
        let c = RiskCriteria { risk_id, rms_stage, methodology, flag_status };
        let _ = parse_criteria(&c);
    }

    #[test]
    fn pair_parsing_never_panics(pairs in proptest::collection::vec(".*", 0..6)) {
        let _ = RiskCriteria::from_pairs(pairs.iter());
    }
}
