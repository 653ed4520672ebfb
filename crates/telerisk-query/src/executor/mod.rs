// SPDX-License-Identifier: Apache-2.0

use telerisk_model::RiskRecord;
use tracing::debug;

use crate::filters::{RecommendationResult, RiskCriteria};
use crate::parser::{parse_criteria, CriteriaAst};
use crate::query_error::QueryError;

/// Records matching every predicate, in register order.
#[must_use]
pub fn execute_criteria<'a>(records: &'a [RiskRecord], ast: &CriteriaAst) -> Vec<&'a RiskRecord> {
    let selected: Vec<&RiskRecord> = records.iter().filter(|r| ast.matches(r)).collect();
    debug!(
        predicates = ast.predicates.len(),
        scanned = records.len(),
        matched = selected.len(),
        "criteria executed"
    );
    selected
}

pub fn select_records<'a>(
    records: &'a [RiskRecord],
    criteria: &RiskCriteria,
) -> Result<Vec<&'a RiskRecord>, QueryError> {
    let ast = parse_criteria(criteria)?;
    Ok(execute_criteria(records, &ast))
}

/// Looks up recommendation tags. Zero matches is an empty result, not an error.
pub fn recommend(
    records: &[RiskRecord],
    criteria: &RiskCriteria,
) -> Result<Vec<RecommendationResult>, QueryError> {
    Ok(select_records(records, criteria)?
        .into_iter()
        .map(|r| RecommendationResult {
            risk_id: r.risk_id.as_str().to_string(),
            recommender_tag: r.recommender_tag.clone(),
            flag_status: r.flag_status,
        })
        .collect())
}
