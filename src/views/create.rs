//! Create page: a blank form seeded with today's date and zero totals.

use crate::validation::FormValues;
use crate::views::FormView;
use chrono::NaiveDate;

pub const CREATE_TITLE: &str = "Create Analytics";
pub const CREATE_ACTION: &str = "/analytics/create";

pub fn default_values(today: NaiveDate) -> FormValues {
    FormValues {
        report_date: today.format("%Y-%m-%d").to_string(),
        total_orders: "0".into(),
        total_revenue: "0".into(),
        restaurant_id: String::new(),
    }
}

pub fn create_form(values: FormValues) -> FormView {
    FormView::new(CREATE_TITLE, CREATE_ACTION.to_string(), values)
}
