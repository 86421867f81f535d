//! Form shared by the create and edit pages.

use crate::cache::Fetched;
use crate::model::Restaurant;
use crate::validation::{FieldErrors, FormValues};
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Serialize)]
pub struct FormView {
    pub title: &'static str,
    pub action: String,
    pub loading: bool,
    /// False when there is nothing to edit (e.g. the record could not be loaded).
    pub show_form: bool,
    pub is_valid: bool,
    pub values: FormValues,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub restaurants: Vec<Restaurant>,
}

impl FormView {
    pub fn new(title: &'static str, action: String, values: FormValues) -> Self {
        FormView {
            title,
            action,
            loading: false,
            show_form: true,
            is_valid: true,
            values,
            field_errors: FieldErrors::default(),
            error: None,
            restaurants: Vec::new(),
        }
    }

    pub fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        self.is_valid = errors.is_empty();
        self.field_errors = errors;
        self
    }

    pub fn with_error(mut self, error: impl Display) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// Options for the restaurant selector. A failed lookup is shown unless an error is already displayed.
    pub fn with_restaurants<E: Display>(mut self, restaurants: Fetched<Vec<Restaurant>, E>) -> Self {
        self.restaurants = restaurants.data.unwrap_or_default();
        if let Some(e) = restaurants.error {
            if self.error.is_none() {
                self.error = Some(e.to_string());
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restaurant_error_does_not_hide_an_earlier_error() {
        let view = FormView::new("t", "/a".into(), FormValues::default())
            .with_error("create failed")
            .with_restaurants(Fetched::<Vec<Restaurant>, _> {
                data: None,
                error: Some("lookup failed"),
            });
        assert_eq!(view.error.as_deref(), Some("create failed"));
        assert!(view.restaurants.is_empty());
    }

    #[test]
    fn field_errors_mark_the_form_invalid() {
        let errors = crate::validation::FormValidator::validate(&FormValues::default()).unwrap_err();
        let view = FormView::new("t", "/a".into(), FormValues::default()).with_field_errors(errors);
        assert!(!view.is_valid);
        assert!(view.field_errors.get("report_date").is_some());
    }
}
