use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Header does not match the register schema. Fatal: nothing is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaError {
    pub message: String,
    #[serde(default)]
    pub missing: Vec<String>,
    #[serde(default)]
    pub unexpected: Vec<String>,
    #[serde(default)]
    pub duplicated: Vec<String>,
}

impl SchemaError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            missing: Vec::new(),
            unexpected: Vec::new(),
            duplicated: Vec::new(),
        }
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "schema error: {}", self.message)
    }
}

impl std::error::Error for SchemaError {}

/// A single rejected data row. Loading continues past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowValidationError {
    /// 1-based data row index, header excluded.
    pub row: usize,
    /// 1-based physical line in the source file.
    pub line: u64,
    pub risk_id: Option<String>,
    pub column: Option<String>,
    pub reason: String,
}

impl RowValidationError {
    #[must_use]
    pub fn new(
        row: usize,
        line: u64,
        risk_id: Option<String>,
        column: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            row,
            line,
            risk_id,
            column: column.map(ToString::to_string),
            reason: reason.into(),
        }
    }
}

impl Display for RowValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {} (line {})", self.row, self.line)?;
        if let Some(column) = &self.column {
            write!(f, " column {column}")?;
        }
        write!(f, ": {}", self.reason)
    }
}

impl std::error::Error for RowValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    Io(String),
    Schema(SchemaError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => f.write_str(msg),
            Self::Schema(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<SchemaError> for LoadError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}
