//! Form validation for the create and edit pages. Runs before any API call is made.

use crate::model::NewAnalytics;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date formats accepted from the form: the HTML date input and the day-first picker format.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Raw form fields as submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    pub report_date: String,
    #[serde(default)]
    pub total_orders: String,
    #[serde(default)]
    pub total_revenue: String,
    #[serde(default)]
    pub restaurant_id: String,
}

/// Field name to message, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn insert(&mut self, field: &'static str, message: String) {
        self.0.insert(field, message);
    }
}

pub struct FormValidator;

impl FormValidator {
    /// Validate every field, collecting all errors, and build the API input on success.
    pub fn validate(values: &FormValues) -> Result<NewAnalytics, FieldErrors> {
        let mut errors = FieldErrors::default();
        let report_date = record_err(&mut errors, "report_date", parse_date("report_date", &values.report_date));
        let total_orders = record_err(&mut errors, "total_orders", parse_count("total_orders", &values.total_orders));
        let total_revenue = record_err(&mut errors, "total_revenue", parse_count("total_revenue", &values.total_revenue));

        match (report_date, total_orders, total_revenue) {
            (Some(report_date), Some(total_orders), Some(total_revenue)) if errors.is_empty() => {
                let restaurant_id = values.restaurant_id.trim();
                Ok(NewAnalytics {
                    id: None,
                    restaurant_id: (!restaurant_id.is_empty()).then(|| restaurant_id.to_string()),
                    report_date,
                    total_orders,
                    total_revenue,
                })
            }
            _ => Err(errors),
        }
    }
}

fn record_err<T>(errors: &mut FieldErrors, field: &'static str, r: Result<T, String>) -> Option<T> {
    match r {
        Ok(v) => Some(v),
        Err(message) => {
            errors.insert(field, message);
            None
        }
    }
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(format!("{} is a required field", field));
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .ok_or_else(|| format!("{} must be a `date` type", field))
}

/// Required, numeric, integral and not negative.
fn parse_count(field: &str, raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(format!("{} is a required field", field));
    }
    let n = match raw.parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            let f: f64 = raw
                .parse()
                .ok()
                .filter(|f: &f64| f.is_finite())
                .ok_or_else(|| format!("{} must be a `number` type", field))?;
            if f.fract() != 0.0 {
                return Err(format!("{} must be an integer", field));
            }
            if f.abs() >= i64::MAX as f64 {
                return Err(format!("{} is too large", field));
            }
            f as i64
        }
    };
    if n < 0 {
        return Err(format!("{} must be greater than or equal to 0", field));
    }
    Ok(n)
}
