//! Splitting a task-level rate across the workers assigned to the task.
//!
//! Shares are rounded half away from zero to two decimals, so the shares of
//! a split can differ from the task rate by up to `0.01` per assignee
//! (100 over 3 workers pays 33.33 each).

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::payroll::error::PayrollError;
use crate::payroll::money::{deserialize_lenient_opt, round_money, serialize_plain_opt};
use crate::payroll::record::AssigneeRateConfig;

/// Rates entered once for a whole task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRates {
    #[serde(
        default,
        alias = "rate_per_rai",
        serialize_with = "serialize_plain_opt",
        deserialize_with = "deserialize_lenient_opt"
    )]
    pub rate_per_rai: Option<BigDecimal>,
    #[serde(
        default,
        alias = "repair_rate",
        serialize_with = "serialize_plain_opt",
        deserialize_with = "deserialize_lenient_opt"
    )]
    pub repair_rate: Option<BigDecimal>,
}

/// Equal share of `rate` for each of `assignees` workers.
pub fn prorate(rate: &BigDecimal, assignees: usize) -> Result<BigDecimal, PayrollError> {
    if assignees == 0 {
        return Err(PayrollError::invalid_argument(
            "cannot prorate a rate across zero assignees",
        ));
    }

    let count = BigDecimal::from(assignees as u64);
    Ok(round_money(&(rate.clone() / count)))
}

/// Overwrite each assignee's rates with its share of the task rates.
/// Every assignee ends up with `use_default = false`. At least one task rate
/// must be given, otherwise nothing would replace the standing rates.
pub fn prorate_assignees(
    assignees: &mut [AssigneeRateConfig],
    rates: &TaskRates,
) -> Result<(), PayrollError> {
    let count = assignees.len();
    if count == 0 {
        return Err(PayrollError::invalid_argument(
            "cannot prorate a rate across zero assignees",
        ));
    }

    let rate_per_rai = rates
        .rate_per_rai
        .as_ref()
        .map(|rate| prorate(rate, count))
        .transpose()?;
    let repair_rate = rates
        .repair_rate
        .as_ref()
        .map(|rate| prorate(rate, count))
        .transpose()?;

    if rate_per_rai.is_none() && repair_rate.is_none() {
        return Err(PayrollError::invalid_argument(
            "ratePerRai or repairRate is required to prorate",
        ));
    }

    for assignee in assignees.iter_mut() {
        if let Some(share) = &rate_per_rai {
            assignee.rate_per_rai = share.clone();
        }
        if let Some(share) = &repair_rate {
            assignee.repair_rate = share.clone();
        }
        assignee.use_default = false;
    }

    Ok(())
}
