use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use telerisk_core::RecommenderConfig;
use telerisk_model::{
    is_core_column, FlagStatus, Rating, RiskRecord, COL_IMPACT_RATING, COL_PROBABILITY_RATING,
    COL_RISK_SCORE, REGISTER_COLUMNS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaPolicy {
    pub check_empty_fields: bool,
    pub max_score: u32,
}

impl Default for QaPolicy {
    fn default() -> Self {
        Self::from_config(&RecommenderConfig::default())
    }
}

impl QaPolicy {
    #[must_use]
    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self {
            check_empty_fields: config.qa.check_empty_fields,
            max_score: config.assessment.max_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum QaSeverity {
    Info,
    Warn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum QaFindingKind {
    EmptyField,
    ScoreOutOfRange,
    UnknownRating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QaFinding {
    pub risk_id: String,
    pub column: String,
    pub kind: QaFindingKind,
    pub severity: QaSeverity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QaReport {
    pub rows_audited: usize,
    pub findings: Vec<QaFinding>,
    pub flag_counts: BTreeMap<String, usize>,
    pub pending_review: usize,
}

impl QaReport {
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == QaSeverity::Warn)
            .count()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    #[must_use]
    pub fn findings_of(&self, kind: QaFindingKind) -> Vec<&QaFinding> {
        self.findings.iter().filter(|f| f.kind == kind).collect()
    }
}

/// Dataset integrity checks over rows that already passed validation.
/// Findings are reported in row order, then column order.
#[must_use]
pub fn audit_register(records: &[RiskRecord], policy: &QaPolicy) -> QaReport {
    let mut report = QaReport {
        rows_audited: records.len(),
        ..QaReport::default()
    };
    for flag in FlagStatus::ALL {
        report.flag_counts.insert(flag.as_str().to_string(), 0);
    }

    for record in records {
        *report
            .flag_counts
            .entry(record.flag_status.as_str().to_string())
            .or_default() += 1;
        if record.flag_status == FlagStatus::PendingQa {
            report.pending_review += 1;
        }

        let id = record.risk_id.as_str();
        let mut warn = |column: &str, kind: QaFindingKind, message: String| {
            report.findings.push(QaFinding {
                risk_id: id.to_string(),
                column: column.to_string(),
                kind,
                severity: QaSeverity::Warn,
                message,
            });
        };

        for column in REGISTER_COLUMNS.into_iter().filter(|c| !is_core_column(c)) {
            let value = record.attribute(column).unwrap_or_default().trim();
            if value.is_empty() {
                if policy.check_empty_fields {
                    warn(column, QaFindingKind::EmptyField, "empty value".to_string());
                }
                continue;
            }
            if column == COL_RISK_SCORE {
                match value.parse::<i64>() {
                    Ok(score) if (0..=i64::from(policy.max_score)).contains(&score) => {}
                    _ => warn(
                        column,
                        QaFindingKind::ScoreOutOfRange,
                        format!(
                            "risk score `{value}` is not an integer in 0..={}",
                            policy.max_score
                        ),
                    ),
                }
            }
            if (column == COL_PROBABILITY_RATING || column == COL_IMPACT_RATING)
                && Rating::parse(value).is_err()
            {
                warn(
                    column,
                    QaFindingKind::UnknownRating,
                    format!("rating `{value}` is not Low, Medium or High"),
                );
            }
        }
    }
    report
}
