// src/domain/validation.rs

use crate::domain::farmer::FarmerForm;
use crate::domain::harvest::parse_calendar_date;
use crate::domain::user::{Role, UserForm};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Outcome of a form check. Every violated rule is listed, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}

/// Result of trying to save a form: either the stored value or the reasons it was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<T> {
    Saved(T),
    Rejected(ValidationResult),
}

impl<T> FormOutcome<T> {
    pub fn rejected(errors: Vec<String>) -> Self {
        FormOutcome::Rejected(ValidationResult { errors })
    }
}

fn is_contact_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')')
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn validate_farmer_data(data: &FarmerForm) -> ValidationResult {
    let mut result = ValidationResult::default();

    if data.first_name.trim().is_empty() {
        result.push("First name is required");
    }
    if data.last_name.trim().is_empty() {
        result.push("Last name is required");
    }
    if data.barangay.trim().is_empty() {
        result.push("Barangay is required");
    }
    if data.town.trim().is_empty() {
        result.push("Town is required");
    }

    if !data.contact_number.is_empty() && !data.contact_number.chars().all(is_contact_char) {
        result.push("Invalid contact number format");
    }

    let land_area = data.land_area.trim();
    if !land_area.is_empty() {
        let ok = land_area
            .parse::<f64>()
            .map(|v| v.is_finite() && v >= 0.0)
            .unwrap_or(false);
        if !ok {
            result.push("Land area must be a positive number");
        }
    }

    let planted = (!data.planted_date.is_empty()).then(|| parse_calendar_date(&data.planted_date));
    let harvest = (!data.harvest_date.is_empty()).then(|| parse_calendar_date(&data.harvest_date));

    if matches!(planted, Some(Err(_))) {
        result.push("Invalid planted date format (use YYYY-MM-DD)");
    }
    if matches!(harvest, Some(Err(_))) {
        result.push("Invalid harvest date format (use YYYY-MM-DD)");
    }
    if let (Some(Ok(planted)), Some(Ok(harvest))) = (planted, harvest) {
        if harvest <= planted {
            result.push("Harvest date must be after planted date");
        }
    }

    result
}

pub fn validate_user_data(data: &UserForm, is_editing: bool) -> ValidationResult {
    let mut result = ValidationResult::default();

    let username = data.username.trim();
    if username.is_empty() {
        result.push("Username is required");
    } else if username.chars().count() < MIN_USERNAME_LEN {
        result.push("Username must be at least 3 characters");
    } else if !username.chars().all(is_username_char) {
        result.push("Username can only contain letters, numbers, and underscores");
    }

    // Required on create, optional on edit, but never shorter than the minimum.
    if !is_editing && data.password.is_empty() {
        result.push("Password is required");
    } else if !data.password.is_empty() && data.password.chars().count() < MIN_PASSWORD_LEN {
        result.push("Password must be at least 6 characters");
    }

    if data.role.parse::<Role>().is_err() {
        result.push("Invalid role selected");
    }

    result
}
