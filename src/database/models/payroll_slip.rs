use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::payroll::{PayStatus, PayrollSlip, SlipLine};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipStatusUpdateInput {
    pub status: PayStatus,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipListQuery {
    pub user_id: Option<String>,
    pub month: Option<String>,
    pub status: Option<PayStatus>,
}

/// A stored slip together with its pay period and rendered lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipDetail {
    #[serde(flatten)]
    pub slip: PayrollSlip,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub lines: Vec<SlipLine>,
}

impl From<PayrollSlip> for SlipDetail {
    fn from(slip: PayrollSlip) -> Self {
        let lines = slip.breakdown();
        Self {
            period_start: slip.month.first_day(),
            period_end: slip.month.last_day(),
            slip,
            lines,
        }
    }
}
