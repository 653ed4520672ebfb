// SPDX-License-Identifier: Apache-2.0

use crate::parser::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum QueryErrorCode {
    /// Criterion key outside `risk_id`, `rms_stage`, `methodology`, `flag_status`.
    UnknownCriterion,
    /// Known criterion whose value is outside its vocabulary.
    InvalidValue,
    /// Input that cannot be read as criteria at all.
    Malformed,
}

impl QueryErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownCriterion => "unknown_criterion",
            Self::InvalidValue => "invalid_value",
            Self::Malformed => "malformed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub code: QueryErrorCode,
    pub message: String,
}

impl QueryError {
    #[must_use]
    pub fn new(code: QueryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}
impl std::error::Error for QueryError {}

impl From<ParseError> for QueryError {
    fn from(value: ParseError) -> Self {
        Self::new(QueryErrorCode::InvalidValue, value.to_string())
    }
}
