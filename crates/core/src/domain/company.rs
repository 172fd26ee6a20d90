use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_COMPANY_ID: i64 = 1;
pub const DEFAULT_SYMBOL: &str = "UNKNOWN";
pub const DEFAULT_PRICE: f64 = 100.0;
pub const DEFAULT_SECTOR: &str = "Technology";

/// A company as described by a caller, after defaults and coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInput {
    pub id: i64,
    pub symbol: String,
    pub current_price: f64,
    pub sector: String,
}

impl Default for CompanyInput {
    fn default() -> Self {
        Self {
            id: DEFAULT_COMPANY_ID,
            symbol: DEFAULT_SYMBOL.to_string(),
            current_price: DEFAULT_PRICE,
            sector: DEFAULT_SECTOR.to_string(),
        }
    }
}

impl CompanyInput {
    /// Builds a company from a loosely-typed JSON payload.
    ///
    /// Absent (or `null`) fields take their defaults. `current_price` accepts
    /// numbers and numeric strings but must end up finite and positive.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let Value::Object(fields) = value else {
            return Err(ValidationError::new(format!(
                "company data must be a JSON object (got {})",
                json_kind(value)
            )));
        };

        let mut company = Self::default();
        if let Some(v) = present(fields, "id") {
            company.id = coerce_id(v)?;
        }
        if let Some(v) = present(fields, "symbol") {
            company.symbol = coerce_text("symbol", v)?;
        }
        if let Some(v) = present(fields, "current_price") {
            company.current_price = coerce_price(v)?;
        }
        if let Some(v) = present(fields, "sector") {
            company.sector = coerce_text("sector", v)?;
        }
        Ok(company)
    }
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn coerce_id(value: &Value) -> Result<i64, ValidationError> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.ok_or_else(|| ValidationError::for_field("id", format!("expected an integer, got {value}")))
}

fn coerce_text(field: &'static str, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ValidationError::for_field(
            field,
            format!("expected a string, got {}", json_kind(other)),
        )),
    }
}

fn coerce_price(value: &Value) -> Result<f64, ValidationError> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        ValidationError::for_field("current_price", format!("could not convert {value} to a number"))
    })?;

    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::for_field(
            "current_price",
            format!("must be a positive finite number (got {price})"),
        ));
    }
    Ok(price)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
