use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::database::models::macros::text_column;
use crate::error::AppError;
use crate::payroll::{PayStatus, PayrollSlip, WorkRecord};

text_column!(PayStatus);

// Database row type that matches the payroll_slips schema
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PayrollSlipRow {
    pub id: Uuid,
    pub slip_no: String,
    pub slip_seq: i32,
    pub user_id: String,
    pub month: String,
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
    pub details: Json<Vec<WorkRecord>>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PayrollSlipRow> for PayrollSlip {
    type Error = AppError;

    fn try_from(row: PayrollSlipRow) -> Result<Self, Self::Error> {
        let month = row.month.parse().map_err(|err| {
            AppError::internal_server_error_message(format!(
                "payroll slip {} has corrupt month: {}",
                row.id, err
            ))
        })?;

        Ok(Self {
            id: row.id,
            slip_no: row.slip_no,
            user_id: row.user_id,
            month,
            rai_qty: row.rai_qty,
            rai_amount: row.rai_amount,
            repair_days: row.repair_days,
            repair_amount: row.repair_amount,
            daily_amount: row.daily_amount,
            gross_amount: row.gross_amount,
            deduction: row.deduction,
            net_amount: row.net_amount,
            status: row.status,
            paid_at: row.paid_at,
            details: row.details.0,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
