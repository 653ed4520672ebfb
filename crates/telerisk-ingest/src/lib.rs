// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod decode;
mod error;
mod header;
mod logging;
mod qa;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use telerisk_model::{RiskId, RiskRecord, COL_RISK_ID};
use tracing::{info, warn};

pub const CRATE_NAME: &str = "telerisk-ingest";

pub use error::{LoadError, RowValidationError, SchemaError};
pub use header::HeaderPolicy;
pub use logging::{LoadEvent, LoadLog, LoadStage};
pub use qa::{audit_register, QaFinding, QaFindingKind, QaPolicy, QaReport, QaSeverity};

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub header_policy: HeaderPolicy,
}

/// Outcome of a partial-failure tolerant load: every data row ends up either
/// in `records` or in `errors`.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedRegister {
    pub source: Option<PathBuf>,
    pub source_sha256: String,
    pub total_rows: usize,
    pub records: Vec<RiskRecord>,
    pub errors: Vec<RowValidationError>,
    pub events: Vec<LoadEvent>,
}

impl LoadedRegister {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn load_risk_register(path: &Path) -> Result<LoadedRegister, LoadError> {
    load_risk_register_with(path, &LoadOptions::default())
}

pub fn load_risk_register_with(
    path: &Path,
    opts: &LoadOptions,
) -> Result<LoadedRegister, LoadError> {
    let bytes = std::fs::read(path)
        .map_err(|e| LoadError::Io(format!("failed to read {}: {e}", path.display())))?;
    let mut loaded = load_from_bytes(&bytes, opts)?;
    loaded.source = Some(path.to_path_buf());
    info!(
        path = %path.display(),
        records = loaded.records.len(),
        row_errors = loaded.errors.len(),
        "risk register loaded"
    );
    Ok(loaded)
}

pub fn load_risk_register_from_reader<R: Read>(
    mut reader: R,
    opts: &LoadOptions,
) -> Result<LoadedRegister, LoadError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| LoadError::Io(format!("failed to read register: {e}")))?;
    load_from_bytes(&bytes, opts)
}

fn load_from_bytes(bytes: &[u8], opts: &LoadOptions) -> Result<LoadedRegister, LoadError> {
    let mut log = LoadLog::default();
    let source_sha256 = telerisk_core::sha256_hex(bytes);
    log.emit(
        LoadStage::Open,
        "load.start",
        BTreeMap::from([
            ("bytes".to_string(), bytes.len().to_string()),
            ("sha256".to_string(), source_sha256.clone()),
        ]),
    );

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let raw_headers = reader
        .byte_headers()
        .map_err(|e| LoadError::Io(format!("failed to read header row: {e}")))?
        .clone();
    let columns = header::resolve_header(&raw_headers, opts.header_policy)?;
    log.emit(
        LoadStage::Header,
        "load.header.accepted",
        BTreeMap::from([("policy".to_string(), opts.header_policy.as_str().to_string())]),
    );

    let mut records = Vec::new();
    let mut errors = Vec::new();
    let mut first_seen: BTreeMap<RiskId, usize> = BTreeMap::new();
    let mut total_rows = 0_usize;

    for result in reader.byte_records() {
        let raw = result.map_err(|e| LoadError::Io(format!("failed to read register row: {e}")))?;
        total_rows += 1;
        let row = total_rows;
        let line = raw.position().map_or(0, |p| p.line());

        let decoded = decode::decode_row(&raw, &columns, row, line).and_then(|record| {
            if let Some(first_row) = first_seen.get(&record.risk_id).copied() {
                return Err(RowValidationError::new(
                    row,
                    line,
                    Some(record.risk_id.as_str().to_string()),
                    Some(COL_RISK_ID),
                    format!("duplicate risk id (first seen at row {first_row})"),
                ));
            }
            first_seen.insert(record.risk_id.clone(), row);
            Ok(record)
        });

        match decoded {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(row = err.row, line = err.line, "rejected register row: {}", err.reason);
                errors.push(err);
            }
        }
    }

    log.emit(
        LoadStage::Rows,
        "load.rows.complete",
        BTreeMap::from([
            ("total_rows".to_string(), total_rows.to_string()),
            ("records".to_string(), records.len().to_string()),
            ("row_errors".to_string(), errors.len().to_string()),
        ]),
    );
    log.emit(LoadStage::Finalize, "load.complete", BTreeMap::new());

    Ok(LoadedRegister {
        source: None,
        source_sha256,
        total_rows,
        records,
        errors,
        events: log.events().to_vec(),
    })
}
