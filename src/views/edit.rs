//! Edit page: the form is seeded from the fetched record once it is available.

use crate::cache::Fetched;
use crate::model::AnalyticsRecord;
use crate::validation::FormValues;
use crate::views::FormView;
use std::fmt::Display;

pub const EDIT_TITLE: &str = "Edit Analytics";

pub fn edit_action(id: &str) -> String {
    format!("/analytics/edit/{}", id)
}

pub fn values_from_record(r: &AnalyticsRecord) -> FormValues {
    FormValues {
        report_date: r.report_date.format("%Y-%m-%d").to_string(),
        total_orders: r.total_orders.to_string(),
        total_revenue: r.total_revenue.to_string(),
        restaurant_id: r.restaurant_id.clone().unwrap_or_default(),
    }
}

pub fn edit_form(id: &str, values: FormValues) -> FormView {
    FormView::new(EDIT_TITLE, edit_action(id), values)
}

/// Loading, error-only, or a seeded form (with the error on top when the data is stale).
pub fn edit_from_fetched<E: Display>(id: &str, fetched: Fetched<AnalyticsRecord, E>) -> FormView {
    let loading = fetched.is_loading();
    let mut view = match &fetched.data {
        Some(record) => edit_form(id, values_from_record(record)),
        None => {
            let mut v = edit_form(id, FormValues::default());
            v.show_form = false;
            v
        }
    };
    view.loading = loading;
    if let Some(e) = fetched.error {
        view = view.with_error(e);
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn missing_record_hides_the_form() {
        let view = edit_from_fetched::<String>(
            "a1",
            Fetched {
                data: None,
                error: Some("analytics record a1 not found".into()),
            },
        );
        assert!(!view.show_form);
        assert!(!view.loading);
        assert_eq!(view.error.as_deref(), Some("analytics record a1 not found"));
    }

    #[test]
    fn record_seeds_values() {
        let record = AnalyticsRecord {
            id: "a1".into(),
            restaurant_id: None,
            report_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            total_orders: 4,
            total_revenue: 44,
        };
        let view = edit_from_fetched::<String>("a1", Fetched { data: Some(record), error: None });
        assert!(view.show_form);
        assert_eq!(view.action, "/analytics/edit/a1");
        assert_eq!(view.values.report_date, "2026-01-05");
        assert_eq!(view.values.total_orders, "4");
        assert_eq!(view.values.restaurant_id, "");
    }
}
