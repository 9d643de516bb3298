use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::payroll::aggregate::aggregate;
use crate::payroll::error::PayrollError;
use crate::payroll::line::{LineKind, resolve_line_amount};
use crate::payroll::macros::string_enum;
use crate::payroll::money::{deserialize_lenient, round_money, serialize_plain};
use crate::payroll::month::PayrollMonth;
use crate::payroll::record::WorkRecord;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PayStatus {
        Paid => "Paid",
        Unpaid => "Unpaid",
    }
}

/// Input for a new slip, usually the reviewed output of a preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipDraft {
    pub user_id: String,
    pub month: PayrollMonth,
    #[serde(default, serialize_with = "serialize_plain", deserialize_with = "deserialize_lenient")]
    pub deduction: BigDecimal,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub details: Vec<WorkRecord>,
}

impl SlipDraft {
    /// Checks that do not depend on the work records.
    pub fn validate(&self) -> Result<(), PayrollError> {
        if self.user_id.trim().is_empty() {
            return Err(PayrollError::invalid_argument("userId is required"));
        }
        net_amount(&BigDecimal::zero(), &self.deduction).map(|_| ())
    }
}

/// One worker's payroll for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSlip {
    pub id: Uuid,
    pub slip_no: String,
    pub user_id: String,
    pub month: PayrollMonth,
    pub rai_qty: BigDecimal,
    pub rai_amount: BigDecimal,
    pub repair_days: i32,
    pub repair_amount: BigDecimal,
    pub daily_amount: BigDecimal,
    pub gross_amount: BigDecimal,
    pub deduction: BigDecimal,
    pub net_amount: BigDecimal,
    pub status: PayStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub details: Vec<WorkRecord>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display/export view of one slip line, amount rounded to 2 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipLine {
    pub task_id: String,
    pub title: String,
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub label: LineKind,
    pub amount: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl From<&WorkRecord> for SlipLine {
    fn from(record: &WorkRecord) -> Self {
        let line = resolve_line_amount(record);
        Self {
            task_id: record.task_id.clone(),
            title: record
                .display
                .clone()
                .unwrap_or_else(|| record.title.clone()),
            date: record.date.clone(),
            end_date: record.end_date.clone(),
            label: line.label,
            amount: round_money(&line.amount),
            formula: line.formula,
        }
    }
}

/// `gross - deduction`. The result may be negative: a deduction larger than
/// the month's pay is carried as debt, not clamped.
pub fn net_amount(gross: &BigDecimal, deduction: &BigDecimal) -> Result<BigDecimal, PayrollError> {
    if deduction < &BigDecimal::zero() {
        return Err(PayrollError::invalid_argument(format!(
            "deduction must not be negative, got {deduction}"
        )));
    }

    Ok(gross - deduction)
}

/// `<prefix>-<YYYYMM>-<NNNN>`
pub fn format_slip_no(prefix: &str, month: &PayrollMonth, sequence: i64) -> String {
    format!("{}-{}-{:04}", prefix, month.compact(), sequence)
}

/// Build a new unpaid slip from a draft.
pub fn finalize(
    draft: SlipDraft,
    slip_no: String,
    now: DateTime<Utc>,
) -> Result<PayrollSlip, PayrollError> {
    draft.validate()?;

    let summary = aggregate(&draft.details);
    let net_amount = net_amount(&summary.gross_amount, &draft.deduction)?;
    let note = draft
        .note
        .map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty());

    Ok(PayrollSlip {
        id: Uuid::new_v4(),
        slip_no,
        user_id: draft.user_id,
        month: draft.month,
        rai_qty: summary.rai_qty,
        rai_amount: summary.rai_amount,
        repair_days: summary.repair_days,
        repair_amount: summary.repair_amount,
        daily_amount: summary.daily_amount,
        gross_amount: summary.gross_amount,
        deduction: draft.deduction,
        net_amount,
        status: PayStatus::Unpaid,
        paid_at: None,
        details: draft.details,
        note,
        created_at: now,
        updated_at: now,
    })
}

impl PayrollSlip {
    pub fn is_paid(&self) -> bool {
        self.status == PayStatus::Paid
    }

    /// Move to `status`. Returns `false` when the slip already had it, in
    /// which case nothing (including `paid_at`) changes.
    pub fn apply_status(
        &mut self,
        status: PayStatus,
        paid_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> bool {
        if self.status == status {
            return false;
        }

        self.status = status;
        self.paid_at = match status {
            PayStatus::Paid => Some(paid_at.unwrap_or(now)),
            PayStatus::Unpaid => None,
        };
        self.updated_at = now;
        true
    }

    pub fn ensure_deletable(&self) -> Result<(), PayrollError> {
        if self.is_paid() {
            return Err(PayrollError::SlipAlreadyPaid(self.id));
        }
        Ok(())
    }

    pub fn breakdown(&self) -> Vec<SlipLine> {
        self.details.iter().map(SlipLine::from).collect()
    }

    /// Task ids of records dated in another month. Records without a
    /// readable `YYYY-MM-DD` date are not reported.
    pub fn records_outside_month(&self) -> Vec<&str> {
        self.details
            .iter()
            .filter(|record| {
                record
                    .date
                    .as_deref()
                    .and_then(|date| date.get(..10))
                    .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
                    .is_some_and(|day| !self.month.contains(day))
            })
            .map(|record| record.task_id.as_str())
            .collect()
    }
}
