// SPDX-License-Identifier: Apache-2.0

use csv::{ByteRecord, StringRecord};
use telerisk_model::{
    is_core_column, FlagStatus, Methodology, RiskId, RiskRecord, RmsStage, COL_FLAG_STATUS,
    COL_METHODOLOGY, COL_RECOMMENDER_TAG, COL_RISK_ID, COL_RMS_STAGE, REGISTER_COLUMNS,
    REGISTER_COLUMN_COUNT,
};

use crate::header::ColumnMap;
use crate::RowValidationError;

const IDX_RISK_ID: usize = 0;
const IDX_RMS_STAGE: usize = 1;
const IDX_RECOMMENDER_TAG: usize = 2;
const IDX_METHODOLOGY: usize = 3;
const IDX_FLAG_STATUS: usize = 4;

pub(crate) fn decode_row(
    raw: &ByteRecord,
    columns: &ColumnMap,
    row: usize,
    line: u64,
) -> Result<RiskRecord, RowValidationError> {
    let record = StringRecord::from_byte_record(raw.clone()).map_err(|e| {
        RowValidationError::new(row, line, None, None, format!("row is not valid UTF-8: {e}"))
    })?;
    if record.len() != REGISTER_COLUMN_COUNT {
        return Err(RowValidationError::new(
            row,
            line,
            record.get(0).map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            None,
            format!(
                "expected {REGISTER_COLUMN_COUNT} fields, found {}",
                record.len()
            ),
        ));
    }
    let cell = |idx: usize| record.get(columns.position(idx)).unwrap_or_default();

    let raw_id = cell(IDX_RISK_ID);
    let risk_id = RiskId::parse(raw_id)
        .map_err(|e| RowValidationError::new(row, line, None, Some(COL_RISK_ID), e.0))?;
    let fail = |column: &str, reason: String| {
        RowValidationError::new(
            row,
            line,
            Some(risk_id.as_str().to_string()),
            Some(column),
            reason,
        )
    };

    let rms_stage =
        RmsStage::parse(cell(IDX_RMS_STAGE)).map_err(|e| fail(COL_RMS_STAGE, e.0))?;
    let methodology =
        Methodology::parse(cell(IDX_METHODOLOGY)).map_err(|e| fail(COL_METHODOLOGY, e.0))?;
    let flag_status = FlagStatus::parse_or_default(cell(IDX_FLAG_STATUS))
        .map_err(|e| fail(COL_FLAG_STATUS, e.0))?;

    let mut out = RiskRecord::new(
        risk_id.clone(),
        rms_stage,
        methodology,
        cell(IDX_RECOMMENDER_TAG),
        flag_status,
    )
    .map_err(|e| fail(COL_RECOMMENDER_TAG, e.0))?;

    for (idx, column) in REGISTER_COLUMNS.iter().enumerate() {
        if !is_core_column(column) {
            out = out.with_attribute(column, cell(idx));
        }
    }
    Ok(out)
}
