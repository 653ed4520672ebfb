use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use telerisk_model::{FlagStatus, Methodology, RiskRecord, RmsStage, COL_SECTOR};

use super::{AssessmentPolicy, QualitativeRating, RiskAssessment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Critical,
    High,
    Medium,
    Low,
    Minimal,
}

impl RiskCategory {
    #[must_use]
    pub fn from_normalized_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Critical
        } else if score >= 0.6 {
            Self::High
        } else if score >= 0.4 {
            Self::Medium
        } else if score >= 0.2 {
            Self::Low
        } else {
            Self::Minimal
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Minimal => "MINIMAL",
        }
    }
}

/// Label used for rows whose `Sector` cell is blank.
pub const UNSPECIFIED_SECTOR: &str = "Unspecified";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectorSummary {
    pub records: usize,
    pub mean_normalized_score: f64,
    pub weight: f64,
    pub risk_category: RiskCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterSummary {
    pub total_records: usize,
    pub by_stage: BTreeMap<String, usize>,
    pub by_methodology: BTreeMap<String, usize>,
    pub by_flag_status: BTreeMap<String, usize>,
    pub by_qualitative_rating: BTreeMap<String, usize>,
    pub by_sector: BTreeMap<String, SectorSummary>,
    pub mean_normalized_score: f64,
    /// Sector means combined by sector weight; drives `risk_category`.
    pub overall_score: f64,
    pub risk_category: RiskCategory,
}

fn zeroed<'a>(labels: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, usize> {
    labels.into_iter().map(|l| (l.to_string(), 0)).collect()
}

fn sector_label(record: &RiskRecord) -> &str {
    record
        .attribute(COL_SECTOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNSPECIFIED_SECTOR)
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

#[derive(Default)]
struct SectorTally {
    records: usize,
    assessed: usize,
    score_total: f64,
}

/// Counts use `records`; scores use `assessments`, each divided by
/// `max_score` and clamped to 1.0. Assessments are joined to their sector
/// through `risk_id`.
///
/// `overall_score` is the weighted mean of the sector means over sectors with
/// a positive weight. When no such sector was assessed it falls back to
/// `mean_normalized_score`.
pub fn summarize<'a, I>(
    records: I,
    assessments: &[RiskAssessment],
    policy: &AssessmentPolicy,
) -> RegisterSummary
where
    I: IntoIterator<Item = &'a RiskRecord>,
{
    let mut by_stage = zeroed(RmsStage::ALL.iter().map(|s| s.as_str()));
    let mut by_methodology = zeroed(Methodology::ALL.iter().map(|m| m.as_str()));
    let mut by_flag_status = zeroed(FlagStatus::ALL.iter().map(|f| f.as_str()));
    let mut sectors: BTreeMap<String, SectorTally> = BTreeMap::new();
    let mut sector_of: BTreeMap<&str, String> = BTreeMap::new();
    let mut total_records = 0_usize;
    for record in records {
        total_records += 1;
        *by_stage
            .entry(record.rms_stage.as_str().to_string())
            .or_default() += 1;
        *by_methodology
            .entry(record.methodology.as_str().to_string())
            .or_default() += 1;
        *by_flag_status
            .entry(record.flag_status.as_str().to_string())
            .or_default() += 1;
        let sector = sector_label(record).to_string();
        sectors.entry(sector.clone()).or_default().records += 1;
        sector_of.insert(record.risk_id.as_str(), sector);
    }

    let max = f64::from(policy.max_score);
    let normalized = |score: u32| {
        if policy.max_score == 0 {
            0.0
        } else {
            (f64::from(score) / max).min(1.0)
        }
    };

    let mut by_qualitative_rating = zeroed(QualitativeRating::ALL.iter().map(|q| q.as_str()));
    let mut score_total = 0.0;
    for assessment in assessments {
        *by_qualitative_rating
            .entry(assessment.qualitative_rating.as_str().to_string())
            .or_default() += 1;
        let score = normalized(assessment.quantitative_score);
        score_total += score;
        let sector = sector_of
            .get(assessment.risk_id.as_str())
            .map_or(UNSPECIFIED_SECTOR, String::as_str);
        let tally = sectors.entry(sector.to_string()).or_default();
        tally.assessed += 1;
        tally.score_total += score;
    }
    let mean_normalized_score = mean(score_total, assessments.len());

    let mut weighted_total = 0.0;
    let mut weight_total = 0.0;
    let by_sector: BTreeMap<String, SectorSummary> = sectors
        .into_iter()
        .map(|(name, tally)| {
            let weight = policy.sector_weight(&name);
            let sector_mean = mean(tally.score_total, tally.assessed);
            if tally.assessed > 0 && weight > 0.0 {
                weighted_total += sector_mean * weight;
                weight_total += weight;
            }
            let summary = SectorSummary {
                records: tally.records,
                mean_normalized_score: sector_mean,
                weight,
                risk_category: RiskCategory::from_normalized_score(sector_mean),
            };
            (name, summary)
        })
        .collect();
    let overall_score = if weight_total > 0.0 {
        (weighted_total / weight_total).min(1.0)
    } else {
        mean_normalized_score
    };

    RegisterSummary {
        total_records,
        by_stage,
        by_methodology,
        by_flag_status,
        by_qualitative_rating,
        by_sector,
        mean_normalized_score,
        overall_score,
        risk_category: RiskCategory::from_normalized_score(overall_score),
    }
}
