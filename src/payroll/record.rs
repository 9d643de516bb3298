use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::payroll::macros::open_string_enum;
use crate::payroll::money::{deserialize_lenient, serialize_plain};

open_string_enum! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum JobType {
        Field => "field",
        Repair => "repair",
    }
}

open_string_enum! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum PayType {
        PerRai => "per_rai",
        Daily => "daily",
    }
}

/// One unit of completed or assigned work attributed to a worker.
///
/// Every numeric field is parsed leniently; a record never fails to
/// deserialize because of a bad amount. Snake-case spellings are accepted as
/// aliases for each camel-case field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    #[serde(default, alias = "task_id", deserialize_with = "deserialize_text")]
    pub task_id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    pub display: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_opt")]
    pub date: Option<String>,
    #[serde(default, alias = "end_date", deserialize_with = "deserialize_text_opt")]
    pub end_date: Option<String>,
    #[serde(default, alias = "job_type")]
    pub job_type: JobType,
    #[serde(default, alias = "worker_pay_type")]
    pub worker_pay_type: PayType,
    #[serde(default, serialize_with = "serialize_plain", deserialize_with = "deserialize_lenient")]
    pub area: BigDecimal,
    #[serde(
        default,
        alias = "rate_per_rai",
        serialize_with = "serialize_plain",
        deserialize_with = "deserialize_lenient"
    )]
    pub rate_per_rai: BigDecimal,
    #[serde(
        default,
        alias = "repair_rate",
        serialize_with = "serialize_plain",
        deserialize_with = "deserialize_lenient"
    )]
    pub repair_rate: BigDecimal,
    #[serde(
        default,
        alias = "daily_rate",
        serialize_with = "serialize_plain",
        deserialize_with = "deserialize_lenient"
    )]
    pub daily_rate: BigDecimal,
}

impl WorkRecord {
    fn blank(task_id: &str, job_type: JobType, worker_pay_type: PayType) -> Self {
        Self {
            task_id: task_id.to_string(),
            title: String::new(),
            display: None,
            date: None,
            end_date: None,
            job_type,
            worker_pay_type,
            area: BigDecimal::default(),
            rate_per_rai: BigDecimal::default(),
            repair_rate: BigDecimal::default(),
            daily_rate: BigDecimal::default(),
        }
    }

    /// Field work paid by area.
    pub fn per_rai(task_id: &str, area: BigDecimal, rate_per_rai: BigDecimal) -> Self {
        Self {
            area,
            rate_per_rai,
            ..Self::blank(task_id, JobType::Field, PayType::PerRai)
        }
    }

    /// Field work paid at a flat daily rate.
    pub fn daily(task_id: &str, daily_rate: BigDecimal) -> Self {
        Self {
            daily_rate,
            ..Self::blank(task_id, JobType::Field, PayType::Daily)
        }
    }

    /// Repair job; the worker's own pay type does not matter.
    pub fn repair(task_id: &str, worker_pay_type: PayType, repair_rate: BigDecimal) -> Self {
        Self {
            repair_rate,
            ..Self::blank(task_id, JobType::Repair, worker_pay_type)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// A worker's standing rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRates {
    #[serde(
        default,
        alias = "rate_per_rai",
        serialize_with = "serialize_plain",
        deserialize_with = "deserialize_lenient"
    )]
    pub rate_per_rai: BigDecimal,
    #[serde(
        default,
        alias = "repair_rate",
        serialize_with = "serialize_plain",
        deserialize_with = "deserialize_lenient"
    )]
    pub repair_rate: BigDecimal,
    #[serde(
        default,
        alias = "daily_rate",
        serialize_with = "serialize_plain",
        deserialize_with = "deserialize_lenient"
    )]
    pub daily_rate: BigDecimal,
}

/// Pay parameters for one worker assigned to one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeRateConfig {
    #[serde(deserialize_with = "deserialize_text")]
    pub username: String,
    #[serde(default, alias = "is_daily")]
    pub is_daily: bool,
    #[serde(default = "use_default_initially", alias = "use_default")]
    pub use_default: bool,
    #[serde(
        default,
        alias = "rate_per_rai",
        serialize_with = "serialize_plain",
        deserialize_with = "deserialize_lenient"
    )]
    pub rate_per_rai: BigDecimal,
    #[serde(
        default,
        alias = "repair_rate",
        serialize_with = "serialize_plain",
        deserialize_with = "deserialize_lenient"
    )]
    pub repair_rate: BigDecimal,
    #[serde(
        default,
        alias = "daily_rate",
        serialize_with = "serialize_plain",
        deserialize_with = "deserialize_lenient"
    )]
    pub daily_rate: BigDecimal,
}

fn use_default_initially() -> bool {
    true
}

impl AssigneeRateConfig {
    pub fn new(username: impl Into<String>, is_daily: bool) -> Self {
        Self {
            username: username.into(),
            is_daily,
            use_default: true,
            rate_per_rai: BigDecimal::default(),
            repair_rate: BigDecimal::default(),
            daily_rate: BigDecimal::default(),
        }
    }

    pub fn pay_type(&self) -> PayType {
        if self.is_daily {
            PayType::Daily
        } else {
            PayType::PerRai
        }
    }

    /// Rates that apply to this assignee: the standing ones when
    /// `use_default` is set, the task overrides otherwise.
    pub fn effective_rates(&self, standing: &WorkerRates) -> WorkerRates {
        if self.use_default {
            return standing.clone();
        }

        WorkerRates {
            rate_per_rai: self.rate_per_rai.clone(),
            repair_rate: self.repair_rate.clone(),
            daily_rate: self.daily_rate.clone(),
        }
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn deserialize_text_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}
