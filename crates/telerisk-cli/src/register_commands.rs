use crate::command_output_adapters::{emit_ok, CliError};
use crate::commands::{CriteriaArgs, RegisterArgs};
use crate::{OutputMode, RunContext};
use serde_json::json;
use telerisk_core::LoadedConfig;
use telerisk_ingest::{
    audit_register, load_risk_register_with, LoadOptions, LoadedRegister, QaPolicy,
};
use telerisk_query::{
    assess_records, normalize_criteria, normalized_criteria_hash, prioritize, recommend,
    select_records, summarize, AssessmentPolicy,
};
use tracing::info;

fn load_register(args: &RegisterArgs, ctx: &RunContext) -> Result<LoadedRegister, CliError> {
    let opts = LoadOptions {
        header_policy: ctx.header_policy,
    };
    Ok(load_risk_register_with(&args.register, &opts)?)
}

// Row errors are part of the payload; they only fail the command on request.
fn check_row_errors(loaded: &LoadedRegister, ctx: &RunContext) -> Result<(), CliError> {
    if ctx.fail_on_row_errors && !loaded.is_clean() {
        let mut err = CliError::validation(
            "row_validation_failed",
            &format!(
                "{} of {} register rows failed validation",
                loaded.errors.len(),
                loaded.total_rows
            ),
        );
        if let Some(first) = loaded.errors.first() {
            err = err.with_detail("first_error", &first.to_string());
        }
        return Err(err);
    }
    Ok(())
}

pub(crate) fn run_recommend(
    register: &RegisterArgs,
    criteria: &CriteriaArgs,
    ctx: &RunContext,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let criteria = criteria.to_criteria()?;
    let normalized = normalize_criteria(&criteria)?;
    let criteria_hash = normalized_criteria_hash(&criteria)?;
    let loaded = load_register(register, ctx)?;
    let matches = recommend(&loaded.records, &criteria)?;
    info!(matches = matches.len(), criteria = %criteria_hash, "recommendation lookup done");

    emit_ok(
        output_mode,
        json!({
            "command": "recommend",
            "register": loaded.source,
            "source_sha256": loaded.source_sha256,
            "criteria": normalized,
            "criteria_hash": criteria_hash,
            "match_count": matches.len(),
            "matches": matches,
            "row_errors": loaded.errors,
        }),
    )
    .map_err(CliError::internal)?;
    check_row_errors(&loaded, ctx)
}

pub(crate) fn run_assess(
    register: &RegisterArgs,
    criteria: &CriteriaArgs,
    top: Option<usize>,
    ctx: &RunContext,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let criteria = criteria.to_criteria()?;
    let loaded = load_register(register, ctx)?;
    let selected = select_records(&loaded.records, &criteria)?;
    let policy = AssessmentPolicy::from_config(&ctx.config.config);
    let assessments = assess_records(selected.iter().copied(), &policy);
    let summary = summarize(selected.iter().copied(), &assessments, &policy);
    let prioritized = prioritize(&assessments, top.unwrap_or(assessments.len()));

    emit_ok(
        output_mode,
        json!({
            "command": "assess",
            "register": loaded.source,
            "source_sha256": loaded.source_sha256,
            "criteria": normalize_criteria(&criteria)?,
            "assessed": assessments.len(),
            "assessments": prioritized,
            "summary": summary,
            "row_errors": loaded.errors,
        }),
    )
    .map_err(CliError::internal)?;
    check_row_errors(&loaded, ctx)
}

pub(crate) fn run_sectors(
    register: &RegisterArgs,
    ctx: &RunContext,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let loaded = load_register(register, ctx)?;
    let policy = AssessmentPolicy::from_config(&ctx.config.config);
    let assessments = assess_records(&loaded.records, &policy);
    let summary = summarize(&loaded.records, &assessments, &policy);
    info!(sectors = summary.by_sector.len(), "sector breakdown done");

    emit_ok(
        output_mode,
        json!({
            "command": "sectors",
            "register": loaded.source,
            "source_sha256": loaded.source_sha256,
            "configured_weights": ctx.config.config.sectors,
            "sectors": summary.by_sector,
            "overall_score": summary.overall_score,
            "risk_category": summary.risk_category,
            "row_errors": loaded.errors,
        }),
    )
    .map_err(CliError::internal)?;
    check_row_errors(&loaded, ctx)
}

pub(crate) fn run_validate(
    register: &RegisterArgs,
    ctx: &RunContext,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let loaded = load_register(register, ctx)?;
    let report = audit_register(&loaded.records, &QaPolicy::from_config(&ctx.config.config));
    let qa_failed = ctx.config.config.qa.fail_on_warn && report.has_warnings();
    let rows_failed = ctx.fail_on_row_errors && !loaded.is_clean();
    let status = if qa_failed || rows_failed {
        "failed"
    } else {
        "ok"
    };

    emit_ok(
        output_mode,
        json!({
            "command": "validate",
            "status": status,
            "register": loaded.source,
            "source_sha256": loaded.source_sha256,
            "total_rows": loaded.total_rows,
            "valid_rows": loaded.records.len(),
            "row_errors": loaded.errors,
            "qa": report,
            "events": loaded.events,
        }),
    )
    .map_err(CliError::internal)?;

    check_row_errors(&loaded, ctx)?;
    if qa_failed {
        return Err(CliError::validation(
            "qa_warnings",
            &format!(
                "QA audit reported {} warning(s) and qa.fail_on_warn is set",
                report.warning_count()
            ),
        ));
    }
    Ok(())
}

pub(crate) fn print_config(config: &LoadedConfig, output_mode: OutputMode) -> Result<(), String> {
    emit_ok(
        output_mode,
        json!({
            "command": "print-config",
            "source": config.source,
            "config": config.config,
        }),
    )
}

pub(crate) fn print_version(verbose: bool, output_mode: OutputMode) -> Result<(), String> {
    let payload = if verbose {
        json!({
            "name": "telerisk",
            "version": env!("CARGO_PKG_VERSION"),
            "crates": [
                telerisk_core::CRATE_NAME,
                telerisk_model::CRATE_NAME,
                telerisk_ingest::CRATE_NAME,
                telerisk_query::CRATE_NAME,
            ],
        })
    } else {
        json!({"name": "telerisk", "version": env!("CARGO_PKG_VERSION")})
    };
    emit_ok(output_mode, payload)
}
