use actix_web::{HttpResponse, Result, web};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::{SlipDetail, SlipListQuery, SlipStatusUpdateInput};
use crate::database::repositories::PayrollSlipRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::payroll::money::{deserialize_lenient, deserialize_lenient_opt};
use crate::payroll::{
    AssigneeRateConfig, PayType, SlipDraft, SlipLine, SlipSummary, TaskRates, WorkRecord,
    WorkerRates, aggregate, net_amount, prorate_assignees, resolve_line_amount,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewInput {
    #[serde(default)]
    pub details: Vec<WorkRecord>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub deduction: BigDecimal,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipPreview {
    pub summary: SlipSummary,
    pub deduction: BigDecimal,
    pub net_amount: BigDecimal,
    pub lines: Vec<SlipLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProrateInput {
    #[serde(default, alias = "rate_per_rai", deserialize_with = "deserialize_lenient_opt")]
    pub rate_per_rai: Option<BigDecimal>,
    #[serde(default, alias = "repair_rate", deserialize_with = "deserialize_lenient_opt")]
    pub repair_rate: Option<BigDecimal>,
    #[serde(default)]
    pub assignees: Vec<AssigneeRateConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProrateResult {
    pub shares: TaskRates,
    pub assignees: Vec<AssigneeRateConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveRatesInput {
    pub assignee: AssigneeRateConfig,
    #[serde(default)]
    pub standing: WorkerRates,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveRates {
    pub username: String,
    pub pay_type: PayType,
    pub rates: WorkerRates,
}

/// Compute slip totals for a set of work records without storing anything
pub async fn preview(input: web::Json<PreviewInput>) -> Result<HttpResponse> {
    let PreviewInput { details, deduction } = input.into_inner();

    let summary = aggregate(&details);
    let net_amount = net_amount(&summary.gross_amount, &deduction).map_err(AppError::from)?;
    let lines = details.iter().map(SlipLine::from).collect();

    log::debug!(
        "Previewed {} work records, gross {}",
        details.len(),
        summary.gross_amount
    );

    Ok(ApiResponse::ok(SlipPreview {
        summary,
        deduction,
        net_amount,
        lines,
    }))
}

/// Resolve the amount of a single work record
pub async fn resolve_line(input: web::Json<WorkRecord>) -> Result<HttpResponse> {
    Ok(ApiResponse::ok(resolve_line_amount(&input)))
}

/// Split task-level rates evenly across the selected assignees
pub async fn prorate(input: web::Json<ProrateInput>) -> Result<HttpResponse> {
    let ProrateInput {
        rate_per_rai,
        repair_rate,
        mut assignees,
    } = input.into_inner();
    let rates = TaskRates {
        rate_per_rai,
        repair_rate,
    };

    prorate_assignees(&mut assignees, &rates).map_err(AppError::from)?;

    let shares = assignees
        .first()
        .map(|share| TaskRates {
            rate_per_rai: rates.rate_per_rai.as_ref().map(|_| share.rate_per_rai.clone()),
            repair_rate: rates.repair_rate.as_ref().map(|_| share.repair_rate.clone()),
        })
        .unwrap_or_default();

    Ok(ApiResponse::ok(ProrateResult { shares, assignees }))
}

/// Rates that apply to one assignee given the worker's standing rates
pub async fn effective_rates(input: web::Json<EffectiveRatesInput>) -> Result<HttpResponse> {
    let EffectiveRatesInput { assignee, standing } = input.into_inner();

    Ok(ApiResponse::ok(EffectiveRates {
        pay_type: assignee.pay_type(),
        rates: assignee.effective_rates(&standing),
        username: assignee.username,
    }))
}

/// Create a payroll slip from reviewed work records
pub async fn create_slip(
    repo: web::Data<PayrollSlipRepository>,
    config: web::Data<Config>,
    input: web::Json<SlipDraft>,
) -> Result<HttpResponse> {
    let slip = repo
        .create_slip(input.into_inner(), &config.slip_no_prefix)
        .await?;

    Ok(ApiResponse::created(SlipDetail::from(slip)))
}

/// List payroll slips, optionally filtered by user, month and status
pub async fn list_slips(
    repo: web::Data<PayrollSlipRepository>,
    query: web::Query<SlipListQuery>,
) -> Result<HttpResponse> {
    let slips = repo.list_by_query(&query).await?;

    Ok(ApiResponse::ok(slips))
}

/// Get a payroll slip with its line breakdown
pub async fn get_slip(
    repo: web::Data<PayrollSlipRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let slip = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payroll slip {} not found", id)))?;

    Ok(ApiResponse::ok(SlipDetail::from(slip)))
}

/// Mark a payroll slip as paid or unpaid
pub async fn update_slip_status(
    repo: web::Data<PayrollSlipRepository>,
    path: web::Path<Uuid>,
    input: web::Json<SlipStatusUpdateInput>,
) -> Result<HttpResponse> {
    let SlipStatusUpdateInput { status, paid_at } = input.into_inner();
    let slip = repo
        .update_status(path.into_inner(), status, paid_at)
        .await?;

    Ok(ApiResponse::ok(slip))
}

/// Delete an unpaid payroll slip
pub async fn delete_slip(
    repo: web::Data<PayrollSlipRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    repo.delete_slip(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Payroll slip deleted",
    )))
}
