// SPDX-License-Identifier: Apache-2.0

//! Five-step RMS pipeline applied per record: identify, analyse (qualitative
//! and quantitative), plan the response, set the monitoring action, document.

mod summary;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use telerisk_core::RecommenderConfig;
use telerisk_model::{Rating, RiskRecord, COL_IMPACT_RATING, COL_PROBABILITY_RATING, COL_RISK_SCORE};

use crate::filters::normalize_label;

pub use summary::{summarize, RegisterSummary, RiskCategory, SectorSummary, UNSPECIFIED_SECTOR};

pub const DOCUMENTED_BY: &str = "RMS Recommender System";

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentPolicy {
    pub critical_score: u32,
    pub major_score: u32,
    pub max_score: u32,
    /// Keyed by normalised sector label.
    pub sector_weights: BTreeMap<String, f64>,
}

impl Default for AssessmentPolicy {
    fn default() -> Self {
        Self::from_config(&RecommenderConfig::default())
    }
}

impl AssessmentPolicy {
    #[must_use]
    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self {
            critical_score: config.assessment.critical_score,
            major_score: config.assessment.major_score,
            max_score: config.assessment.max_score,
            sector_weights: config
                .sectors
                .iter()
                .map(|(name, weight)| (normalize_label(name.trim()), *weight))
                .collect(),
        }
    }

    /// Weight of a sector in the overall score. With no weights configured
    /// every sector counts once; otherwise unlisted sectors count zero.
    #[must_use]
    pub fn sector_weight(&self, sector: &str) -> f64 {
        if self.sector_weights.is_empty() {
            return 1.0;
        }
        self.sector_weights
            .get(&normalize_label(sector.trim()))
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualitativeRating {
    Critical,
    Major,
    Minor,
}

impl QualitativeRating {
    pub const ALL: [Self; 3] = [Self::Critical, Self::Major, Self::Minor];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }
}

/// Ordered by urgency: `Immediate` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePlan {
    Immediate,
    MitigationPlan,
    StandardMonitoring,
}

impl ResponsePlan {
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Immediate => "Immediate mitigation required. Assign risk owner and escalate.",
            Self::MitigationPlan => "Mitigation plan needed. Monitor closely.",
            Self::StandardMonitoring => "Standard monitoring and documentation.",
        }
    }

    #[must_use]
    pub const fn monitoring_action(self) -> &'static str {
        match self {
            Self::Immediate => "Weekly review required.",
            Self::MitigationPlan => "Monthly review recommended.",
            Self::StandardMonitoring => "Quarterly review sufficient.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskAssessment {
    pub risk_id: String,
    pub risk_title: String,
    pub qualitative_rating: QualitativeRating,
    pub quantitative_score: u32,
    pub response_plan: ResponsePlan,
    pub recommended_response: String,
    pub monitoring_action: String,
    pub recommender_tag: String,
    pub documented_by: String,
}

fn rating(record: &RiskRecord, column: &str) -> Option<Rating> {
    record.attribute(column).and_then(|v| Rating::parse(v).ok())
}

#[must_use]
pub fn qualitative_rating(record: &RiskRecord) -> QualitativeRating {
    let probability = rating(record, COL_PROBABILITY_RATING);
    let impact = rating(record, COL_IMPACT_RATING);
    match (probability, impact) {
        (Some(Rating::High), Some(Rating::High)) => QualitativeRating::Critical,
        (Some(Rating::Medium), _) | (_, Some(Rating::High)) => QualitativeRating::Major,
        _ => QualitativeRating::Minor,
    }
}

/// Recorded `Risk_Score` when it is a positive integer, else probability x
/// impact weights (unknown ratings weigh 1).
#[must_use]
pub fn quantitative_score(record: &RiskRecord) -> u32 {
    let recorded = record
        .attribute(COL_RISK_SCORE)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(0);
    if recorded != 0 {
        return recorded;
    }
    let weight = |column: &str| rating(record, column).map_or(1, Rating::weight);
    weight(COL_PROBABILITY_RATING) * weight(COL_IMPACT_RATING)
}

#[must_use]
pub fn plan_response(
    rating: QualitativeRating,
    score: u32,
    policy: &AssessmentPolicy,
) -> ResponsePlan {
    if rating == QualitativeRating::Critical || score >= policy.critical_score {
        ResponsePlan::Immediate
    } else if rating == QualitativeRating::Major || score >= policy.major_score {
        ResponsePlan::MitigationPlan
    } else {
        ResponsePlan::StandardMonitoring
    }
}

#[must_use]
pub fn assess_record(record: &RiskRecord, policy: &AssessmentPolicy) -> RiskAssessment {
    let qualitative = qualitative_rating(record);
    let score = quantitative_score(record);
    let plan = plan_response(qualitative, score, policy);
    RiskAssessment {
        risk_id: record.risk_id.as_str().to_string(),
        risk_title: record.title().unwrap_or_default().to_string(),
        qualitative_rating: qualitative,
        quantitative_score: score,
        response_plan: plan,
        recommended_response: plan.recommendation().to_string(),
        monitoring_action: plan.monitoring_action().to_string(),
        recommender_tag: record.recommender_tag.clone(),
        documented_by: DOCUMENTED_BY.to_string(),
    }
}

pub fn assess_records<'a, I>(records: I, policy: &AssessmentPolicy) -> Vec<RiskAssessment>
where
    I: IntoIterator<Item = &'a RiskRecord>,
{
    records
        .into_iter()
        .map(|r| assess_record(r, policy))
        .collect()
}

/// Most urgent first: response plan, then score descending, then register order.
#[must_use]
pub fn prioritize(assessments: &[RiskAssessment], limit: usize) -> Vec<RiskAssessment> {
    let mut ordered = assessments.to_vec();
    ordered.sort_by(|a, b| {
        a.response_plan
            .cmp(&b.response_plan)
            .then_with(|| b.quantitative_score.cmp(&a.quantitative_score))
    });
    ordered.truncate(limit);
    ordered
}
