use clap::{Args, ValueEnum};
use std::path::PathBuf;
use telerisk_ingest::HeaderPolicy;
use telerisk_query::{QueryError, RiskCriteria};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum HeaderPolicyCli {
    #[default]
    Exact,
    AnyOrder,
}

impl From<HeaderPolicyCli> for HeaderPolicy {
    fn from(value: HeaderPolicyCli) -> Self {
        match value {
            HeaderPolicyCli::Exact => HeaderPolicy::Exact,
            HeaderPolicyCli::AnyOrder => HeaderPolicy::AnyOrder,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct RegisterArgs {
    /// Risk register CSV file.
    #[arg(long)]
    pub(crate) register: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CriteriaArgs {
    #[arg(long)]
    pub(crate) risk_id: Option<String>,
    #[arg(long)]
    pub(crate) stage: Option<String>,
    #[arg(long)]
    pub(crate) methodology: Option<String>,
    #[arg(long)]
    pub(crate) flag_status: Option<String>,
    /// Extra criterion as key=value; repeatable.
    #[arg(long = "where", value_name = "KEY=VALUE")]
    pub(crate) where_pairs: Vec<String>,
    /// Criteria as a JSON object with snake_case keys.
    #[arg(long)]
    pub(crate) criteria_json: Option<String>,
}

impl CriteriaArgs {
    pub(crate) fn to_criteria(&self) -> Result<RiskCriteria, QueryError> {
        let flags = RiskCriteria {
            risk_id: self.risk_id.clone(),
            rms_stage: self.stage.clone(),
            methodology: self.methodology.clone(),
            flag_status: self.flag_status.clone(),
        };
        let mut criteria = flags.merge(RiskCriteria::from_pairs(&self.where_pairs)?)?;
        if let Some(raw) = &self.criteria_json {
            let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
                QueryError::new(telerisk_query::QueryErrorCode::Malformed, e.to_string())
            })?;
            criteria = criteria.merge(RiskCriteria::from_json(&value)?)?;
        }
        Ok(criteria)
    }
}
