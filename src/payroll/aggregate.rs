use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::payroll::line::{LineKind, resolve_line_amount};
use crate::payroll::record::WorkRecord;

/// Slip-level totals over one worker's records. Amounts are exact; rounding
/// happens only when lines are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipSummary {
    pub rai_qty: BigDecimal,
    pub rai_amount: BigDecimal,
    pub repair_days: i32,
    pub repair_amount: BigDecimal,
    pub daily_amount: BigDecimal,
    pub gross_amount: BigDecimal,
}

impl Default for SlipSummary {
    fn default() -> Self {
        Self {
            rai_qty: BigDecimal::zero(),
            rai_amount: BigDecimal::zero(),
            repair_days: 0,
            repair_amount: BigDecimal::zero(),
            daily_amount: BigDecimal::zero(),
            gross_amount: BigDecimal::zero(),
        }
    }
}

pub fn aggregate(records: &[WorkRecord]) -> SlipSummary {
    let mut summary = SlipSummary::default();

    for record in records {
        let line = resolve_line_amount(record);
        match line.label {
            LineKind::AreaRate => {
                summary.rai_qty += record.area.clone();
                summary.rai_amount += line.amount;
            }
            LineKind::Repair => {
                summary.repair_days += 1;
                summary.repair_amount += line.amount;
            }
            LineKind::DailyRate => summary.daily_amount += line.amount,
            LineKind::Unclassified => {}
        }
    }

    summary.gross_amount =
        &summary.rai_amount + &summary.repair_amount + &summary.daily_amount;
    summary
}
