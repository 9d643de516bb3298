//! Lenient monetary parsing.
//!
//! Rates and areas reach the service as JSON numbers, numeric strings
//! ("1,200.50", "฿350"), empty strings or `null`. All of them go through
//! [`money_or_zero`] / [`parse_money_or_zero`], which never fail: anything that
//! is not a plain decimal becomes zero.
//!
//! Amounts are written back out with [`serialize_plain`], never in exponent
//! form, so anything this service serializes reads back unchanged.

use std::str::FromStr;
use std::sync::LazyLock;

use bigdecimal::{BigDecimal, FromPrimitive, RoundingMode, Zero};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Thousands separators, whitespace and currency marks.
static MONEY_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,_\s฿$]").expect("money noise pattern is valid"));

static PLAIN_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?)([0-9]*)(?:\.([0-9]*))?$").expect("plain decimal pattern is valid")
});

/// Scale used for displayed and prorated amounts.
pub const MONEY_SCALE: i64 = 2;

/// Parse a user supplied amount, falling back to zero.
pub fn parse_money_or_zero(raw: &str) -> BigDecimal {
    let cleaned = MONEY_NOISE.replace_all(raw, "");
    let Some(caps) = PLAIN_DECIMAL.captures(&cleaned) else {
        return BigDecimal::zero();
    };

    let negative = caps.get(1).is_some_and(|m| m.as_str() == "-");
    let whole = caps.get(2).map_or("", |m| m.as_str());
    let fraction = caps.get(3).map_or("", |m| m.as_str());

    if whole.is_empty() && fraction.is_empty() {
        return BigDecimal::zero();
    }

    let mut normalized = String::with_capacity(whole.len() + fraction.len() + 3);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if whole.is_empty() { "0" } else { whole });
    if !fraction.is_empty() {
        normalized.push('.');
        normalized.push_str(fraction);
    }

    BigDecimal::from_str(&normalized).unwrap_or_else(|_| BigDecimal::zero())
}

/// Coerce any JSON value to an amount. Numbers are read from their decimal
/// text so `0.1` stays exactly `0.1`.
pub fn money_or_zero(value: &Value) -> BigDecimal {
    match value {
        Value::Number(number) => BigDecimal::from_str(&number.to_string())
            .ok()
            .or_else(|| number.as_f64().and_then(BigDecimal::from_f64))
            .unwrap_or_else(BigDecimal::zero),
        Value::String(text) => parse_money_or_zero(text),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => BigDecimal::zero(),
    }
}

/// Round to two decimal places, half away from zero.
pub fn round_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp)
}

/// `deserialize_with` target for loosely typed amount fields.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(money_or_zero(&value))
}

/// Like [`deserialize_lenient`] but keeps `null` / absent as `None`.
pub fn deserialize_lenient_opt<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(money_or_zero(&other)),
    })
}

/// `serialize_with` target for amounts: plain decimal text, no exponent.
pub fn serialize_plain<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_plain_string())
}

pub fn serialize_plain_opt<S>(value: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serialize_plain(value, serializer),
        None => serializer.serialize_none(),
    }
}
