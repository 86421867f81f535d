//! Analytics records and the restaurants they reference.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One day's order and revenue totals for a restaurant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalyticsRecord {
    pub id: String,
    pub restaurant_id: Option<String>,
    pub report_date: NaiveDate,
    pub total_orders: i64,
    pub total_revenue: i64,
}

/// Body of `POST /api/analytics`. The id is generated when omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnalytics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub restaurant_id: Option<String>,
    pub report_date: NaiveDate,
    pub total_orders: i64,
    pub total_revenue: i64,
}

impl NewAnalytics {
    pub fn into_record(self) -> AnalyticsRecord {
        AnalyticsRecord {
            id: self.id.unwrap_or_else(generate_id),
            restaurant_id: self.restaurant_id,
            report_date: self.report_date,
            total_orders: self.total_orders,
            total_revenue: self.total_revenue,
        }
    }
}

/// Body of `PUT /api/analytics/{id}`: every field present is written as given.
///
/// `restaurant_id` distinguishes "absent" (`None`) from "set to null" (`Some(None)`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsPatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "present_nullable")]
    pub restaurant_id: Option<Option<String>>,
    #[serde(default)]
    pub report_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_orders: Option<i64>,
    #[serde(default)]
    pub total_revenue: Option<i64>,
}

impl AnalyticsPatch {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.restaurant_id.is_none()
            && self.report_date.is_none()
            && self.total_orders.is_none()
            && self.total_revenue.is_none()
    }

    pub fn apply(self, record: &mut AnalyticsRecord) {
        if let Some(id) = self.id {
            record.id = id;
        }
        if let Some(restaurant_id) = self.restaurant_id {
            record.restaurant_id = restaurant_id;
        }
        if let Some(d) = self.report_date {
            record.report_date = d;
        }
        if let Some(n) = self.total_orders {
            record.total_orders = n;
        }
        if let Some(n) = self.total_revenue {
            record.total_revenue = n;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRestaurant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl NewRestaurant {
    pub fn into_restaurant(self) -> Restaurant {
        Restaurant {
            id: self.id.unwrap_or_else(generate_id),
            name: self.name,
        }
    }
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Forms submit "no restaurant" as an empty string.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<String>::deserialize(deserializer)?;
    Ok(v.filter(|s| !s.is_empty()))
}

fn present_nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    empty_as_none(deserializer).map(Some)
}
