//! Analytics table.

use crate::cache::Fetched;
use crate::model::AnalyticsRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;

pub const LIST_TITLE: &str = "Analytics";

#[derive(Debug, Serialize)]
pub struct ListRow {
    pub id: String,
    pub restaurant_id: String,
    pub report_date: String,
    pub total_orders: i64,
    pub total_revenue: i64,
    pub edit_href: String,
}

impl From<AnalyticsRecord> for ListRow {
    fn from(r: AnalyticsRecord) -> Self {
        ListRow {
            edit_href: format!("/analytics/edit/{}", r.id),
            report_date: date_string(r.report_date),
            restaurant_id: r.restaurant_id.unwrap_or_default(),
            total_orders: r.total_orders,
            total_revenue: r.total_revenue,
            id: r.id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListView {
    pub title: &'static str,
    pub loading: bool,
    pub error: Option<String>,
    pub rows: Vec<ListRow>,
}

impl ListView {
    pub fn from_fetched<E: Display>(fetched: Fetched<Vec<AnalyticsRecord>, E>) -> Self {
        let loading = fetched.is_loading();
        ListView {
            title: LIST_TITLE,
            loading,
            error: fetched.error.map(|e| e.to_string()),
            rows: fetched
                .data
                .unwrap_or_default()
                .into_iter()
                .map(ListRow::from)
                .collect(),
        }
    }
}

/// "Sat Oct 17 2026".
pub fn date_string(d: NaiveDate) -> String {
    d.format("%a %b %d %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_string_pads_the_day() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(date_string(d), "Sat Mar 07 2026");
    }

    #[test]
    fn missing_restaurant_renders_blank() {
        let row = ListRow::from(AnalyticsRecord {
            id: "a1".into(),
            restaurant_id: None,
            report_date: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            total_orders: 0,
            total_revenue: 0,
        });
        assert_eq!(row.restaurant_id, "");
        assert_eq!(row.edit_href, "/analytics/edit/a1");
    }
}
