use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::schema::COL_RISK_TITLE;
use crate::vocabulary::{FlagStatus, Methodology, RmsStage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const RISK_ID_MAX_LEN: usize = 128;

/// Register identifier: any non-empty text once surrounding whitespace is
/// removed, capped at [`RISK_ID_MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
#[non_exhaustive]
pub struct RiskId(String);

impl RiskId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("risk id must not be empty".to_string()));
        }
        if s.chars().count() > RISK_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "risk id exceeds max length {RISK_ID_MAX_LEN}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RiskId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RiskId> for String {
    fn from(value: RiskId) -> Self {
        value.0
    }
}

impl Display for RiskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One validated row of a risk register.
///
/// Columns outside the typed fields are kept verbatim in `attributes`, keyed
/// by their header name. `recommender_tag` is the literal cell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RiskRecordRepr")]
#[non_exhaustive]
pub struct RiskRecord {
    pub risk_id: RiskId,
    pub rms_stage: RmsStage,
    pub methodology: Methodology,
    pub recommender_tag: String,
    pub flag_status: FlagStatus,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RiskRecordRepr {
    risk_id: RiskId,
    rms_stage: RmsStage,
    methodology: Methodology,
    recommender_tag: String,
    flag_status: FlagStatus,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl TryFrom<RiskRecordRepr> for RiskRecord {
    type Error = ValidationError;

    fn try_from(repr: RiskRecordRepr) -> Result<Self, Self::Error> {
        let mut record = Self::new(
            repr.risk_id,
            repr.rms_stage,
            repr.methodology,
            &repr.recommender_tag,
            repr.flag_status,
        )?;
        record.attributes = repr.attributes;
        Ok(record)
    }
}

impl RiskRecord {
    pub fn new(
        risk_id: RiskId,
        rms_stage: RmsStage,
        methodology: Methodology,
        recommender_tag: &str,
        flag_status: FlagStatus,
    ) -> Result<Self, ValidationError> {
        if recommender_tag.trim().is_empty() {
            return Err(ValidationError(
                "recommender tag must not be empty".to_string(),
            ));
        }
        Ok(Self {
            risk_id,
            rms_stage,
            methodology,
            recommender_tag: recommender_tag.to_string(),
            flag_status,
            attributes: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn with_attribute(mut self, column: &str, value: &str) -> Self {
        self.attributes
            .insert(column.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn attribute(&self, column: &str) -> Option<&str> {
        self.attributes.get(column).map(String::as_str)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.attribute(COL_RISK_TITLE)
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
