#![forbid(unsafe_code)]

pub mod assessment;
mod executor;
mod filters;
mod normalize;
mod parser;
mod query_error;

pub const CRATE_NAME: &str = "telerisk-query";

pub use assessment::{
    assess_record, assess_records, plan_response, prioritize, qualitative_rating,
    quantitative_score, summarize, AssessmentPolicy, QualitativeRating, RegisterSummary,
    ResponsePlan, RiskAssessment, RiskCategory, SectorSummary, DOCUMENTED_BY,
    UNSPECIFIED_SECTOR,
};
pub use executor::{execute_criteria, recommend, select_records};
pub use filters::{normalize_label, RecommendationResult, RiskCriteria};
pub use normalize::{normalize_criteria, normalized_criteria_hash};
pub use parser::{parse_criteria, CriteriaAst, ParseError, Predicate};
pub use query_error::{QueryError, QueryErrorCode};
