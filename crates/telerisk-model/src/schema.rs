// SPDX-License-Identifier: Apache-2.0

pub const REGISTER_COLUMN_COUNT: usize = 27;

pub const COL_RISK_ID: &str = "Risk_ID";
pub const COL_RMS_STAGE: &str = "RMS_Stage";
pub const COL_RECOMMENDER_TAG: &str = "Recommender_Tag";
pub const COL_METHODOLOGY: &str = "Methodology";
pub const COL_FLAG_STATUS: &str = "Flag_Status";
pub const COL_RISK_TITLE: &str = "Risk_Title";
pub const COL_PROBABILITY_RATING: &str = "Probability_Rating";
pub const COL_IMPACT_RATING: &str = "Impact_Rating";
pub const COL_RISK_SCORE: &str = "Risk_Score";
pub const COL_SECTOR: &str = "Sector";

/// Canonical header of a risk register, in file order.
pub const REGISTER_COLUMNS: [&str; REGISTER_COLUMN_COUNT] = [
    COL_RISK_ID,
    COL_RMS_STAGE,
    COL_RECOMMENDER_TAG,
    COL_METHODOLOGY,
    COL_FLAG_STATUS,
    COL_RISK_TITLE,
    "Risk_Description",
    "Category",
    "Sub_Category",
    COL_SECTOR,
    "Stakeholder_Group",
    "Project_Phase",
    "Risk_Owner",
    COL_PROBABILITY_RATING,
    COL_IMPACT_RATING,
    COL_RISK_SCORE,
    "Mitigation_Action",
    "Response_Strategy",
    "Detection_Method",
    "Control",
    "Control_Effectiveness",
    "Residual_Risk",
    "Review_Frequency",
    "Status",
    "Last_Updated",
    "Source",
    "Notes",
];

/// Columns lifted into typed `RiskRecord` fields; everything else is an
/// opaque attribute.
pub const CORE_COLUMNS: [&str; 5] = [
    COL_RISK_ID,
    COL_RMS_STAGE,
    COL_RECOMMENDER_TAG,
    COL_METHODOLOGY,
    COL_FLAG_STATUS,
];

#[must_use]
pub fn is_core_column(name: &str) -> bool {
    CORE_COLUMNS.contains(&name)
}

#[must_use]
pub fn column_index(name: &str) -> Option<usize> {
    REGISTER_COLUMNS.iter().position(|c| *c == name)
}
