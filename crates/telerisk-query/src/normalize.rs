use telerisk_core::canonical;

use crate::filters::RiskCriteria;
use crate::parser::parse_criteria;
use crate::query_error::{QueryError, QueryErrorCode};

/// Stable hash of the parsed criteria: spelling, case and key order of the
/// input do not change it.
pub fn normalized_criteria_hash(criteria: &RiskCriteria) -> Result<String, QueryError> {
    let ast = parse_criteria(criteria)?;
    canonical::stable_json_hash_hex(&ast)
        .map_err(|e| QueryError::new(QueryErrorCode::Malformed, e.to_string()))
}

/// Rewrites every criterion value to its canonical label.
pub fn normalize_criteria(criteria: &RiskCriteria) -> Result<RiskCriteria, QueryError> {
    use crate::parser::Predicate;
    let mut out = RiskCriteria::default();
    for predicate in parse_criteria(criteria)?.predicates {
        match predicate {
            Predicate::RiskId(id) => out.risk_id = Some(id.into_inner()),
            Predicate::Stage(stage) => out.rms_stage = Some(stage.as_str().to_string()),
            Predicate::Methodology(m) => out.methodology = Some(m.as_str().to_string()),
            Predicate::Flag(flag) => out.flag_status = Some(flag.as_str().to_string()),
        }
    }
    Ok(out)
}
