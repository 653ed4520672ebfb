use std::path::PathBuf;

use telerisk_core::RecommenderConfig;
use telerisk_ingest::load_risk_register;
use telerisk_query::{
    assess_records, prioritize, select_records, summarize, AssessmentPolicy, QualitativeRating,
    ResponsePlan, RiskCategory, RiskCriteria,
};

fn register() -> Vec<telerisk_model::RiskRecord> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("network_register.csv");
    load_risk_register(&path).expect("load").records
}

#[test]
fn network_register_assessments_match_rms_rules() {
    let records = register();
    let out = assess_records(&records, &AssessmentPolicy::default());
    let scores: Vec<u32> = out.iter().map(|a| a.quantitative_score).collect();
    assert_eq!(scores, vec![9, 6, 4, 2, 1, 6, 12, 2, 8, 3, 4, 2]);

    let critical: Vec<&str> = out
        .iter()
        .filter(|a| a.qualitative_rating == QualitativeRating::Critical)
        .map(|a| a.risk_id.as_str())
        .collect();
    assert_eq!(critical, vec!["R001", "R007"]);

    let r006 = &out[5];
    assert_eq!(r006.qualitative_rating, QualitativeRating::Minor);
    assert_eq!(r006.response_plan, ResponsePlan::MitigationPlan);
    assert_eq!(r006.recommended_response, "Mitigation plan needed. Monitor closely.");

    let standard: Vec<&str> = out
        .iter()
        .filter(|a| a.response_plan == ResponsePlan::StandardMonitoring)
        .map(|a| a.risk_id.as_str())
        .collect();
    assert_eq!(standard, vec!["R004", "R005", "R012"]);
}

#[test]
fn priority_order_is_plan_score_then_register() {
    let records = register();
    let out = assess_records(&records, &AssessmentPolicy::default());
    let order: Vec<String> = prioritize(&out, usize::MAX)
        .into_iter()
        .map(|a| a.risk_id)
        .collect();
    assert_eq!(
        order,
        vec![
            "R007", "R001", "R009", "R002", "R006", "R003", "R011", "R010", "R008", "R004",
            "R012", "R005"
        ]
    );
    let top: Vec<String> = prioritize(&out, 3).into_iter().map(|a| a.risk_id).collect();
    assert_eq!(top, vec!["R007", "R001", "R009"]);
}

#[test]
fn summary_of_network_register() {
    let records = register();
    let policy = AssessmentPolicy::default();
    let out = assess_records(&records, &policy);
    let summary = summarize(&records, &out, &policy);
    assert_eq!(summary.total_records, 12);
    assert_eq!(summary.by_methodology.get("Agile"), Some(&5));
    assert_eq!(summary.by_stage.get("Monitoring & Control"), Some(&2));
    assert_eq!(summary.by_qualitative_rating.get("Critical"), Some(&2));
    assert_eq!(summary.by_qualitative_rating.get("Major"), Some(&6));
    assert_eq!(summary.by_qualitative_rating.get("Minor"), Some(&4));
    assert!((summary.mean_normalized_score - 59.0 / 12.0 / 25.0).abs() < 1e-9);
    assert_eq!(summary.risk_category, RiskCategory::Minimal);

    assert_eq!(summary.by_sector.len(), 1);
    let network = &summary.by_sector["Network Infrastructure"];
    assert_eq!(network.records, 12);
    assert!((network.mean_normalized_score - summary.mean_normalized_score).abs() < 1e-9);
    assert!((summary.overall_score - summary.mean_normalized_score).abs() < 1e-9);
}

#[test]
fn configured_thresholds_change_the_response() {
    let records = register();
    let config = RecommenderConfig::from_yaml_str(
        "assessment:\n  critical_score: 8\n  major_score: 2\n  max_score: 12\n",
    )
    .expect("config");
    let policy = AssessmentPolicy::from_config(&config);
    let out = assess_records(&records, &policy);
    assert_eq!(out[8].risk_id, "R009");
    assert_eq!(out[8].response_plan, ResponsePlan::Immediate);
    assert!(out
        .iter()
        .all(|a| a.response_plan != ResponsePlan::StandardMonitoring || a.quantitative_score < 2));

    let summary = summarize(&records, &out, &policy);
    assert!((summary.mean_normalized_score - 59.0 / 12.0 / 12.0).abs() < 1e-9);
    assert_eq!(summary.risk_category, RiskCategory::Medium);
}

#[test]
fn assessing_a_filtered_selection() {
    let records = register();
    let criteria = RiskCriteria::from_pairs(["methodology=Waterfall"]).expect("criteria");
    let selected = select_records(&records, &criteria).expect("select");
    let policy = AssessmentPolicy::default();
    let out = assess_records(selected.iter().copied(), &policy);
    let ids: Vec<&str> = out.iter().map(|a| a.risk_id.as_str()).collect();
    assert_eq!(ids, vec!["R001", "R005", "R007", "R011"]);
    let summary = summarize(selected.iter().copied(), &out, &policy);
    assert_eq!(summary.total_records, 4);
    assert_eq!(summary.by_methodology.get("Waterfall"), Some(&4));
}
