// src/domain/farmer.rs

use crate::domain::harvest::{parse_calendar_date, DATE_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// A farmer as stored in the `farmers` table. Read-only to the domain layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmerRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    pub location_group: String,
    pub barangay: String,
    pub town: String,
    pub contact_number: String,
    /// Hectares. `None` when never entered, which sums as 0.
    pub land_area: Option<f64>,
    pub planted_date: Option<NaiveDate>,
    pub harvest_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub user_id: Option<String>,
}

impl FarmerRecord {
    /// "Juan D. Cruz", or "Juan Cruz" without a middle initial.
    pub fn display_name(&self) -> String {
        match self.middle_initial.as_deref().map(str::trim) {
            Some(mi) if !mi.is_empty() => {
                format!("{} {}. {}", self.first_name, mi, self.last_name)
            }
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Case-insensitive substring match on names and location, as used by the
    /// farmer list search box. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        [&self.first_name, &self.last_name, &self.town, &self.barangay]
            .iter()
            .any(|field| field.to_lowercase().contains(&q))
    }
}

/// Raw farmer form exactly as submitted. Everything is text so validation can
/// report every problem instead of failing on the first parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FarmerForm {
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: String,
    pub location_group: String,
    pub barangay: String,
    pub town: String,
    pub contact_number: String,
    pub land_area: String,
    pub planted_date: String,
    pub harvest_date: String,
}

impl FarmerForm {
    pub fn from_pairs(fields: &HashMap<String, String>) -> Self {
        let get = |k: &str| fields.get(k).cloned().unwrap_or_default();
        Self {
            first_name: get("first_name"),
            last_name: get("last_name"),
            middle_initial: get("middle_initial"),
            location_group: get("location_group"),
            barangay: get("barangay"),
            town: get("town"),
            contact_number: get("contact_number"),
            land_area: get("land_area"),
            planted_date: get("planted_date"),
            harvest_date: get("harvest_date"),
        }
    }

    /// Prefill for the edit screen.
    pub fn from_record(record: &FarmerRecord) -> Self {
        let fmt_date = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            middle_initial: record.middle_initial.clone().unwrap_or_default(),
            location_group: record.location_group.clone(),
            barangay: record.barangay.clone(),
            town: record.town.clone(),
            contact_number: record.contact_number.clone(),
            land_area: record.land_area.map(|a| a.to_string()).unwrap_or_default(),
            planted_date: fmt_date(record.planted_date),
            harvest_date: fmt_date(record.harvest_date),
        }
    }

    /// Convert a form that already passed validation into typed values.
    /// Optional fields that are blank become `None`.
    pub fn to_farmer_data(&self) -> FarmerData {
        let opt_text = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        let opt_date = |s: &str| {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                parse_calendar_date(t).ok()
            }
        };
        FarmerData {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            middle_initial: opt_text(&self.middle_initial),
            location_group: self.location_group.trim().to_string(),
            barangay: self.barangay.trim().to_string(),
            town: self.town.trim().to_string(),
            contact_number: self.contact_number.trim().to_string(),
            land_area: opt_text(&self.land_area).and_then(|s| s.parse::<f64>().ok()),
            planted_date: opt_date(&self.planted_date),
            harvest_date: opt_date(&self.harvest_date),
        }
    }
}

/// Typed payload for create/update writes.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmerData {
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    pub location_group: String,
    pub barangay: String,
    pub town: String,
    pub contact_number: String,
    pub land_area: Option<f64>,
    pub planted_date: Option<NaiveDate>,
    pub harvest_date: Option<NaiveDate>,
}
