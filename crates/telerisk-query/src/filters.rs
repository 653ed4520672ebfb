use serde::{Deserialize, Serialize};
use telerisk_model::FlagStatus;
use unicode_normalization::UnicodeNormalization;

use crate::query_error::{QueryError, QueryErrorCode};

/// Recommendation lookup criteria. Every `Some` field must match (logical AND);
/// all `None` selects the whole register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskCriteria {
    #[serde(default)]
    pub risk_id: Option<String>,
    #[serde(default)]
    pub rms_stage: Option<String>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub flag_status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CriterionKey {
    RiskId,
    RmsStage,
    Methodology,
    FlagStatus,
}

impl CriterionKey {
    fn parse(raw: &str) -> Option<Self> {
        match normalize_label(raw.trim()).as_str() {
            "risk_id" | "id" => Some(Self::RiskId),
            "rms_stage" | "stage" => Some(Self::RmsStage),
            "methodology" => Some(Self::Methodology),
            "flag_status" | "flag" => Some(Self::FlagStatus),
            _ => None,
        }
    }
}

impl RiskCriteria {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.risk_id.is_none()
            && self.rms_stage.is_none()
            && self.methodology.is_none()
            && self.flag_status.is_none()
    }

    /// Builds criteria from `key=value` strings. Keys accept the snake_case
    /// names and the register column names, in any case.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Self::default();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                QueryError::new(
                    QueryErrorCode::Malformed,
                    format!("criterion `{pair}` must have the form key=value"),
                )
            })?;
            let key_name = key.trim();
            let key = CriterionKey::parse(key_name).ok_or_else(|| {
                QueryError::new(
                    QueryErrorCode::UnknownCriterion,
                    format!(
                        "unknown criterion `{key_name}` (expected risk_id, rms_stage, methodology or flag_status)"
                    ),
                )
            })?;
            let value = value.trim();
            if value.is_empty() {
                return Err(QueryError::new(
                    QueryErrorCode::InvalidValue,
                    format!("criterion `{key_name}` has an empty value"),
                ));
            }
            let slot = match key {
                CriterionKey::RiskId => &mut out.risk_id,
                CriterionKey::RmsStage => &mut out.rms_stage,
                CriterionKey::Methodology => &mut out.methodology,
                CriterionKey::FlagStatus => &mut out.flag_status,
            };
            if slot.is_some() {
                return Err(QueryError::new(
                    QueryErrorCode::Malformed,
                    format!("criterion `{key_name}` given more than once"),
                ));
            }
            *slot = Some(value.to_string());
        }
        Ok(out)
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Self, QueryError> {
        if !value.is_object() {
            return Err(QueryError::new(
                QueryErrorCode::Malformed,
                "criteria must be a JSON object",
            ));
        }
        serde_json::from_value(value.clone()).map_err(|e| {
            let message = e.to_string();
            let code = if message.contains("unknown field") {
                QueryErrorCode::UnknownCriterion
            } else {
                QueryErrorCode::Malformed
            };
            QueryError::new(code, message)
        })
    }

    /// Merges `other` into `self`; a criterion set on both sides is a conflict.
    pub fn merge(mut self, other: Self) -> Result<Self, QueryError> {
        fn take(
            name: &str,
            slot: &mut Option<String>,
            incoming: Option<String>,
        ) -> Result<(), QueryError> {
            match (slot.as_ref(), incoming) {
                (Some(_), Some(_)) => Err(QueryError::new(
                    QueryErrorCode::Malformed,
                    format!("criterion `{name}` given more than once"),
                )),
                (None, incoming) => {
                    *slot = incoming;
                    Ok(())
                }
                (Some(_), None) => Ok(()),
            }
        }
        take("risk_id", &mut self.risk_id, other.risk_id)?;
        take("rms_stage", &mut self.rms_stage, other.rms_stage)?;
        take("methodology", &mut self.methodology, other.methodology)?;
        take("flag_status", &mut self.flag_status, other.flag_status)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationResult {
    pub risk_id: String,
    pub recommender_tag: String,
    pub flag_status: FlagStatus,
}

#[must_use]
pub fn normalize_label(input: &str) -> String {
    // Query-side normalization: NFKC + Unicode lowercase.
    input.nfkc().collect::<String>().to_lowercase()
}
