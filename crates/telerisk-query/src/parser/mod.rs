use telerisk_model::{FlagStatus, Methodology, RiskId, RiskRecord, RmsStage};

use crate::filters::{normalize_label, RiskCriteria};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    RiskId(RiskId),
    Stage(RmsStage),
    Methodology(Methodology),
    Flag(FlagStatus),
}

impl Predicate {
    #[must_use]
    pub fn matches(&self, record: &RiskRecord) -> bool {
        match self {
            Self::RiskId(id) => record.risk_id == *id,
            Self::Stage(stage) => record.rms_stage == *stage,
            Self::Methodology(methodology) => record.methodology == *methodology,
            Self::Flag(flag) => record.flag_status == *flag,
        }
    }
}

/// Typed criteria. Predicate order is fixed (id, stage, methodology, flag),
/// independent of how the criteria were written.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriteriaAst {
    pub predicates: Vec<Predicate>,
}

impl CriteriaAst {
    #[must_use]
    pub fn matches(&self, record: &RiskRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    InvalidValue { criterion: &'static str, reason: String },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { criterion, reason } => {
                write!(f, "invalid {criterion} criterion: {reason}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

fn invalid(criterion: &'static str) -> impl Fn(telerisk_model::ValidationError) -> ParseError {
    move |e| ParseError::InvalidValue {
        criterion,
        reason: e.0,
    }
}

pub fn parse_criteria(criteria: &RiskCriteria) -> Result<CriteriaAst, ParseError> {
    let mut predicates = Vec::new();

    if let Some(v) = &criteria.risk_id {
        predicates.push(Predicate::RiskId(
            RiskId::parse(v).map_err(invalid("risk_id"))?,
        ));
    }
    if let Some(v) = &criteria.rms_stage {
        predicates.push(Predicate::Stage(
            RmsStage::parse(&normalize_label(v)).map_err(invalid("rms_stage"))?,
        ));
    }
    if let Some(v) = &criteria.methodology {
        predicates.push(Predicate::Methodology(
            Methodology::parse(&normalize_label(v)).map_err(invalid("methodology"))?,
        ));
    }
    if let Some(v) = &criteria.flag_status {
        predicates.push(Predicate::Flag(
            FlagStatus::parse(&normalize_label(v)).map_err(invalid("flag_status"))?,
        ));
    }

    Ok(CriteriaAst { predicates })
}
