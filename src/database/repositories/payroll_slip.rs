use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction, types::Json};
use uuid::Uuid;

use crate::database::models::SlipListQuery;
use crate::database::types::PayrollSlipRow;
use crate::error::AppError;
use crate::payroll::{PayStatus, PayrollMonth, PayrollSlip, SlipDraft, finalize, format_slip_no};

const SLIP_COLUMNS: &str = r#"
    id,
    slip_no,
    slip_seq,
    user_id,
    month,
    rai_qty,
    rai_amount,
    repair_days,
    repair_amount,
    daily_amount,
    gross_amount,
    deduction,
    net_amount,
    status,
    paid_at,
    details,
    note,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct PayrollSlipRepository {
    pool: PgPool,
}

impl PayrollSlipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finalize `draft` and store it under the next slip number of its month.
    pub async fn create_slip(
        &self,
        draft: SlipDraft,
        slip_no_prefix: &str,
    ) -> Result<PayrollSlip, AppError> {
        draft.validate()?;

        let mut tx = self.pool.begin().await?;

        // Serializes numbering within a month.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(format!("payroll_slips:{}", draft.month))
            .execute(&mut *tx)
            .await?;

        let sequence: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(slip_seq), 0) + 1 FROM payroll_slips WHERE month = $1",
        )
        .bind(draft.month.to_string())
        .fetch_one(&mut *tx)
        .await?;

        let slip_no = format_slip_no(slip_no_prefix, &draft.month, i64::from(sequence));
        let slip = finalize(draft, slip_no, Utc::now())?;

        let stray = slip.records_outside_month();
        if !stray.is_empty() {
            log::warn!(
                "Payroll slip {} for {} includes work dated outside the month: {}",
                slip.slip_no,
                slip.month,
                stray.join(", ")
            );
        }

        let row = sqlx::query_as::<_, PayrollSlipRow>(&format!(
            r#"
            INSERT INTO payroll_slips (
                id,
                slip_no,
                slip_seq,
                user_id,
                month,
                rai_qty,
                rai_amount,
                repair_days,
                repair_amount,
                daily_amount,
                gross_amount,
                deduction,
                net_amount,
                status,
                paid_at,
                details,
                note,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING {SLIP_COLUMNS}
            "#
        ))
        .bind(slip.id)
        .bind(&slip.slip_no)
        .bind(sequence)
        .bind(&slip.user_id)
        .bind(slip.month.to_string())
        .bind(&slip.rai_qty)
        .bind(&slip.rai_amount)
        .bind(slip.repair_days)
        .bind(&slip.repair_amount)
        .bind(&slip.daily_amount)
        .bind(&slip.gross_amount)
        .bind(&slip.deduction)
        .bind(&slip.net_amount)
        .bind(slip.status)
        .bind(slip.paid_at)
        .bind(Json(&slip.details))
        .bind(&slip.note)
        .bind(slip.created_at)
        .bind(slip.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        log::info!(
            "Created payroll slip {} for user {} ({}), net {}",
            slip.slip_no,
            slip.user_id,
            slip.month,
            slip.net_amount
        );

        row.try_into()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PayrollSlip>, AppError> {
        let row = sqlx::query_as::<_, PayrollSlipRow>(&format!(
            "SELECT {SLIP_COLUMNS} FROM payroll_slips WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PayrollSlip::try_from).transpose()
    }

    /// Slips matching every given filter, newest first.
    pub async fn list_slips(
        &self,
        user_id: Option<&str>,
        month: Option<PayrollMonth>,
        status: Option<PayStatus>,
    ) -> Result<Vec<PayrollSlip>, AppError> {
        let rows = sqlx::query_as::<_, PayrollSlipRow>(&format!(
            r#"
            SELECT {SLIP_COLUMNS}
            FROM payroll_slips
            WHERE ($1::text IS NULL OR user_id = $1)
              AND ($2::text IS NULL OR month = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY month DESC, slip_seq DESC
            "#
        ))
        .bind(user_id)
        .bind(month.map(|month| month.to_string()))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PayrollSlip::try_from).collect()
    }

    pub async fn list_by_query(&self, query: &SlipListQuery) -> Result<Vec<PayrollSlip>, AppError> {
        let month = query
            .month
            .as_deref()
            .map(str::parse::<PayrollMonth>)
            .transpose()?;

        self.list_slips(query.user_id.as_deref(), month, query.status)
            .await
    }

    /// Toggle paid state. Paying an already paid slip keeps its original
    /// `paid_at`.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: PayStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<PayrollSlip, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut slip = Self::lock_slip(&mut tx, id).await?;

        if slip.apply_status(status, paid_at, Utc::now()) {
            sqlx::query(
                r#"
                UPDATE payroll_slips
                SET
                    status = $1,
                    paid_at = $2,
                    updated_at = $3
                WHERE
                    id = $4
                "#,
            )
            .bind(slip.status)
            .bind(slip.paid_at)
            .bind(slip.updated_at)
            .bind(slip.id)
            .execute(&mut *tx)
            .await?;

            log::info!("Payroll slip {} marked {}", slip.slip_no, slip.status);
        } else {
            log::debug!("Payroll slip {} already {}", slip.slip_no, slip.status);
        }

        tx.commit().await?;
        Ok(slip)
    }

    /// Delete an unpaid slip. Paid slips are refused with a conflict.
    pub async fn delete_slip(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let slip = Self::lock_slip(&mut tx, id).await?;

        slip.ensure_deletable()?;

        sqlx::query("DELETE FROM payroll_slips WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log::info!("Deleted payroll slip {}", slip.slip_no);
        Ok(())
    }

    async fn lock_slip(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<PayrollSlip, AppError> {
        let row = sqlx::query_as::<_, PayrollSlipRow>(&format!(
            "SELECT {SLIP_COLUMNS} FROM payroll_slips WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payroll slip {} not found", id)))?;

        row.try_into()
    }
}
