use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::record::ValidationError;

// Lowercases and collapses `_`, `-` and whitespace runs into single spaces so
// "Pending_QA", "pending-qa" and " Pending  QA " compare equal.
fn fold_label(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RmsStage {
    Initiation,
    Planning,
    Execution,
    #[serde(rename = "Monitoring & Control")]
    MonitoringAndControl,
    Closure,
}

impl RmsStage {
    pub const ALL: [Self; 5] = [
        Self::Initiation,
        Self::Planning,
        Self::Execution,
        Self::MonitoringAndControl,
        Self::Closure,
    ];

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match fold_label(input).as_str() {
            "initiation" | "initiating" => Ok(Self::Initiation),
            "planning" => Ok(Self::Planning),
            "execution" | "executing" => Ok(Self::Execution),
            "monitoring & control"
            | "monitoring and control"
            | "monitoring & controlling"
            | "monitoring and controlling"
            | "monitoring" => Ok(Self::MonitoringAndControl),
            "closure" | "closing" => Ok(Self::Closure),
            "" => Err(ValidationError("rms stage must not be empty".to_string())),
            _ => Err(ValidationError(format!(
                "unknown rms stage `{}` (expected Initiation, Planning, Execution, Monitoring & Control or Closure)",
                input.trim()
            ))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initiation => "Initiation",
            Self::Planning => "Planning",
            Self::Execution => "Execution",
            Self::MonitoringAndControl => "Monitoring & Control",
            Self::Closure => "Closure",
        }
    }
}

impl Display for RmsStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Methodology {
    Waterfall,
    Agile,
    Hybrid,
}

impl Methodology {
    pub const ALL: [Self; 3] = [Self::Waterfall, Self::Agile, Self::Hybrid];

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match fold_label(input).as_str() {
            "waterfall" => Ok(Self::Waterfall),
            "agile" => Ok(Self::Agile),
            "hybrid" => Ok(Self::Hybrid),
            "" => Err(ValidationError("methodology must not be empty".to_string())),
            _ => Err(ValidationError(format!(
                "unknown methodology `{}` (expected Waterfall, Agile or Hybrid)",
                input.trim()
            ))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waterfall => "Waterfall",
            Self::Agile => "Agile",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl Display for Methodology {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// QA review state of a register row. Rows start as `PendingQa`; only the
/// governance review moves them on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[non_exhaustive]
pub enum FlagStatus {
    #[default]
    #[serde(rename = "Pending QA")]
    PendingQa,
    Approved,
    Rejected,
}

impl FlagStatus {
    pub const ALL: [Self; 3] = [Self::PendingQa, Self::Approved, Self::Rejected];

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match fold_label(input).as_str() {
            "pending qa" | "pending" => Ok(Self::PendingQa),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "" => Err(ValidationError("flag status must not be empty".to_string())),
            _ => Err(ValidationError(format!(
                "unknown flag status `{}` (expected Pending QA, Approved or Rejected)",
                input.trim()
            ))),
        }
    }

    /// Blank cells mean the row has not been reviewed yet.
    pub fn parse_or_default(input: &str) -> Result<Self, ValidationError> {
        if input.trim().is_empty() {
            Ok(Self::default())
        } else {
            Self::parse(input)
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingQa => "Pending QA",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl Display for FlagStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Rating {
    Low,
    Medium,
    High,
}

impl Rating {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match fold_label(input).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError(format!(
                "unknown rating `{}` (expected Low, Medium or High)",
                input.trim()
            ))),
        }
    }

    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
