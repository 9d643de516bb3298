use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::payroll::record::{JobType, PayType, WorkRecord};

/// How a work record is paid. Repair jobs take precedence over the
/// worker's pay type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    #[serde(rename = "repair")]
    Repair,
    #[serde(rename = "area-rate")]
    AreaRate,
    #[serde(rename = "daily-rate")]
    DailyRate,
    #[serde(rename = "amount")]
    Unclassified,
}

impl LineKind {
    pub fn of(record: &WorkRecord) -> Self {
        if record.job_type == JobType::Repair {
            return LineKind::Repair;
        }

        match record.worker_pay_type {
            PayType::PerRai => LineKind::AreaRate,
            PayType::Daily => LineKind::DailyRate,
            PayType::Other(_) => LineKind::Unclassified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Repair => "repair",
            LineKind::AreaRate => "area-rate",
            LineKind::DailyRate => "daily-rate",
            LineKind::Unclassified => "amount",
        }
    }
}

/// Monetary contribution of a single work record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAmount {
    pub label: LineKind,
    pub amount: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

pub fn resolve_line_amount(record: &WorkRecord) -> LineAmount {
    let kind = LineKind::of(record);

    let (amount, formula) = match kind {
        LineKind::Repair => (record.repair_rate.clone(), None),
        LineKind::AreaRate => (
            &record.area * &record.rate_per_rai,
            Some(format!("{} rai × {}", record.area, record.rate_per_rai)),
        ),
        LineKind::DailyRate => (record.daily_rate.clone(), None),
        LineKind::Unclassified => (BigDecimal::zero(), None),
    };

    LineAmount {
        label: kind,
        amount,
        formula,
    }
}
