// src/domain/harvest.rs

use chrono::NaiveDate;
use thiserror::Error;

/// Calendar format used for planted/harvest dates everywhere (forms, storage).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Last day-count that still counts as "due soon".
pub const DUE_SOON_DAYS: i64 = 3;
/// Last day-count that still counts as "this week".
pub const THIS_WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("malformed calendar date '{0}' (expected YYYY-MM-DD)")]
    Malformed(String),
}

/// Lifecycle bucket of a single record relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarvestStatus {
    Overdue,
    DueSoon,
    ThisWeek,
    Scheduled,
    /// No harvest date set. Excluded from every harvest-based view.
    None,
}

impl HarvestStatus {
    /// The four statuses that take part in counts and schedules, in display order.
    pub const TRACKED: [HarvestStatus; 4] = [
        HarvestStatus::Overdue,
        HarvestStatus::DueSoon,
        HarvestStatus::ThisWeek,
        HarvestStatus::Scheduled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HarvestStatus::Overdue => "overdue",
            HarvestStatus::DueSoon => "due-soon",
            HarvestStatus::ThisWeek => "this-week",
            HarvestStatus::Scheduled => "scheduled",
            HarvestStatus::None => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HarvestStatus::Overdue => "Overdue",
            HarvestStatus::DueSoon => "Due Soon",
            HarvestStatus::ThisWeek => "This Week",
            HarvestStatus::Scheduled => "Scheduled",
            HarvestStatus::None => "No harvest date",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            HarvestStatus::Overdue => "#EF4444",
            HarvestStatus::DueSoon => "#F59E0B",
            HarvestStatus::ThisWeek => "#EAB308",
            HarvestStatus::Scheduled => "#22C55E",
            HarvestStatus::None => "#9CA3AF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Whole days from the reference day to the harvest day. `None` when no date is set.
    pub days: Option<i64>,
    pub status: HarvestStatus,
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, DateError> {
    let raw = raw.trim();
    let shape_ok = raw.len() == 10
        && raw.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(DateError::Malformed(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| DateError::Malformed(raw.to_string()))
}

/// Signed whole-day distance from `reference` to `harvest`.
///
/// Both sides are calendar dates, so the ceiling of the remaining duration is
/// the plain day difference: a harvest later today is 0, yesterday is -1.
pub fn days_until(harvest: NaiveDate, reference: NaiveDate) -> i64 {
    harvest.signed_duration_since(reference).num_days()
}

/// Status for a known day-count. Checks run in priority order.
pub fn status_for_days(days: i64) -> HarvestStatus {
    if days < 0 {
        HarvestStatus::Overdue
    } else if days <= DUE_SOON_DAYS {
        HarvestStatus::DueSoon
    } else if days <= THIS_WEEK_DAYS {
        HarvestStatus::ThisWeek
    } else {
        HarvestStatus::Scheduled
    }
}

pub fn classify(harvest_date: Option<NaiveDate>, reference: NaiveDate) -> Classification {
    match harvest_date {
        Some(date) => {
            let days = days_until(date, reference);
            Classification {
                days: Some(days),
                status: status_for_days(days),
            }
        }
        None => Classification {
            days: None,
            status: HarvestStatus::None,
        },
    }
}

/// Like [`classify`] but for a raw stored/form value. Empty input is "no date";
/// anything else that is not a real `YYYY-MM-DD` date is reported.
pub fn classify_raw(
    harvest_date: Option<&str>,
    reference: NaiveDate,
) -> Result<Classification, DateError> {
    let date = match harvest_date.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(parse_calendar_date(raw)?),
        None => None,
    };
    Ok(classify(date, reference))
}

/// Inclusive range of day-counts relative to the reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestWindow {
    pub min_days: i64,
    pub max_days: i64,
}

impl HarvestWindow {
    /// Harvest calendar and card-level "due this week" range.
    pub const DUE_THIS_WEEK: HarvestWindow = HarvestWindow::new(0, THIS_WEEK_DAYS);
    /// Dashboard/report "upcoming harvests" range. Wider than the card range on purpose.
    pub const UPCOMING: HarvestWindow = HarvestWindow::new(0, 30);
    /// Report "ready for harvest": a week either side of today.
    pub const HARVESTABLE: HarvestWindow = HarvestWindow::new(-7, 7);

    pub const fn new(min_days: i64, max_days: i64) -> Self {
        Self { min_days, max_days }
    }

    pub fn contains_days(&self, days: i64) -> bool {
        self.min_days <= days && days <= self.max_days
    }

    pub fn contains(&self, harvest_date: Option<NaiveDate>, reference: NaiveDate) -> bool {
        harvest_date.is_some_and(|d| self.contains_days(days_until(d, reference)))
    }
}

pub fn within_window(
    harvest_date: Option<NaiveDate>,
    reference: NaiveDate,
    min_days: i64,
    max_days: i64,
) -> bool {
    HarvestWindow::new(min_days, max_days).contains(harvest_date, reference)
}

/// Badge shown on a farmer card. Cards tier differently from the status
/// buckets: anything within a week is "due soon", within 30 days "upcoming",
/// and later harvests get no badge at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBadge {
    Overdue,
    DueSoon,
    Upcoming,
}

impl CardBadge {
    pub fn label(self) -> &'static str {
        match self {
            CardBadge::Overdue => "Overdue",
            CardBadge::DueSoon => "Due Soon",
            CardBadge::Upcoming => "Upcoming",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            CardBadge::Overdue => "#EF4444",
            CardBadge::DueSoon => "#F59E0B",
            CardBadge::Upcoming => "#EAB308",
        }
    }
}

pub fn card_badge(classification: Classification) -> Option<CardBadge> {
    let days = classification.days?;
    if days < 0 {
        Some(CardBadge::Overdue)
    } else if HarvestWindow::DUE_THIS_WEEK.contains_days(days) {
        Some(CardBadge::DueSoon)
    } else if HarvestWindow::UPCOMING.contains_days(days) {
        Some(CardBadge::Upcoming)
    } else {
        None
    }
}
