#![forbid(unsafe_code)]
//! Risk register model SSOT.
//!
//! ```compile_fail
//! use telerisk_model::FlagStatus;
//!
//! fn exhaustive_match(s: FlagStatus) -> &'static str {
//!     match s {
//!         FlagStatus::PendingQa => "p",
//!         FlagStatus::Approved => "a",
//!         FlagStatus::Rejected => "r",
//!     }
//! }
//! ```

mod record;
mod schema;
mod vocabulary;

pub use record::{RiskId, RiskRecord, ValidationError, RISK_ID_MAX_LEN};
pub use schema::{
    column_index, is_core_column, COL_FLAG_STATUS, COL_IMPACT_RATING, COL_METHODOLOGY,
    COL_PROBABILITY_RATING, COL_RECOMMENDER_TAG, COL_RISK_ID, COL_RISK_SCORE, COL_RISK_TITLE,
    COL_RMS_STAGE, COL_SECTOR, CORE_COLUMNS, REGISTER_COLUMNS, REGISTER_COLUMN_COUNT,
};
pub use vocabulary::{FlagStatus, Methodology, Rating, RmsStage};

pub const CRATE_NAME: &str = "telerisk-model";
