// src/domain/aggregate.rs

//! Derived views over a snapshot of farmer records.
//!
//! Every function here is a pure transform of `(records, reference)`. The
//! caller captures the reference day once per page so all views on that page
//! agree with each other.

use crate::domain::farmer::FarmerRecord;
use crate::domain::harvest::{
    classify, days_until, status_for_days, HarvestStatus, HarvestWindow, THIS_WEEK_DAYS,
};
use chrono::NaiveDate;
use std::collections::HashMap;

pub const DEFAULT_SCHEDULE_DAYS: i64 = 7;
pub const DEFAULT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub overdue: usize,
    pub due_soon: usize,
    pub this_week: usize,
    pub scheduled: usize,
    /// Records with no harvest date. Never part of any bucket.
    pub unscheduled: usize,
}

impl StatusCounts {
    pub fn get(&self, status: HarvestStatus) -> usize {
        match status {
            HarvestStatus::Overdue => self.overdue,
            HarvestStatus::DueSoon => self.due_soon,
            HarvestStatus::ThisWeek => self.this_week,
            HarvestStatus::Scheduled => self.scheduled,
            HarvestStatus::None => self.unscheduled,
        }
    }

    /// Records that have a harvest date.
    pub fn total(&self) -> usize {
        self.overdue + self.due_soon + self.this_week + self.scheduled
    }

    /// Non-empty buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (HarvestStatus, usize)> + '_ {
        HarvestStatus::TRACKED
            .into_iter()
            .map(|s| (s, self.get(s)))
            .filter(|(_, n)| *n > 0)
    }
}

pub fn count_by_status(records: &[FarmerRecord], reference: NaiveDate) -> StatusCounts {
    records
        .iter()
        .fold(StatusCounts::default(), |mut counts, record| {
            match classify(record.harvest_date, reference).status {
                HarvestStatus::Overdue => counts.overdue += 1,
                HarvestStatus::DueSoon => counts.due_soon += 1,
                HarvestStatus::ThisWeek => counts.this_week += 1,
                HarvestStatus::Scheduled => counts.scheduled += 1,
                HarvestStatus::None => counts.unscheduled += 1,
            }
            counts
        })
}

/// Number of records whose harvest day falls inside `window`.
pub fn count_in_window(
    records: &[FarmerRecord],
    reference: NaiveDate,
    window: HarvestWindow,
) -> usize {
    records
        .iter()
        .filter(|r| window.contains(r.harvest_date, reference))
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Town,
    Barangay,
    LocationGroup,
}

impl LocationField {
    /// `None` when the record leaves this field empty.
    pub fn select(self, record: &FarmerRecord) -> Option<&str> {
        let value = match self {
            LocationField::Town => &record.town,
            LocationField::Barangay => &record.barangay,
            LocationField::LocationGroup => &record.location_group,
        };
        (!value.is_empty()).then_some(value.as_str())
    }
}

/// Count records per literal field value (case-sensitive, no trimming).
/// Ordered by descending count; equal counts keep first-seen order.
pub fn group_by_field(records: &[FarmerRecord], field: LocationField) -> Vec<(String, usize)> {
    let mut groups: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for value in records.iter().filter_map(|r| field.select(r)) {
        match index.get(value) {
            Some(&i) => groups[i].1 += 1,
            None => {
                index.insert(value, groups.len());
                groups.push((value.to_string(), 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-encountered order.
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledHarvest<'a> {
    pub farmer: &'a FarmerRecord,
    pub harvest_date: NaiveDate,
    pub days: i64,
}

/// Harvests due between today and `max_days` from now, soonest first.
pub fn upcoming_schedule(
    records: &[FarmerRecord],
    reference: NaiveDate,
    max_days: i64,
) -> Vec<ScheduledHarvest<'_>> {
    let window = HarvestWindow::new(0, max_days);
    let mut schedule: Vec<ScheduledHarvest<'_>> = records
        .iter()
        .filter_map(|farmer| {
            let harvest_date = farmer.harvest_date?;
            let days = days_until(harvest_date, reference);
            window.contains_days(days).then_some(ScheduledHarvest {
                farmer,
                harvest_date,
                days,
            })
        })
        .collect();
    schedule.sort_by_key(|s| s.harvest_date);
    schedule
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LandAreaSummary {
    pub total: f64,
    pub average: f64,
    pub count: usize,
}

pub fn land_area_summary(records: &[FarmerRecord]) -> LandAreaSummary {
    let count = records.len();
    let total: f64 = records.iter().map(|r| r.land_area.unwrap_or(0.0)).sum();
    let average = if count > 0 { total / count as f64 } else { 0.0 };
    LandAreaSummary {
        total,
        average,
        count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Overdue,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity<'a> {
    pub kind: ActivityKind,
    pub farmer: &'a FarmerRecord,
    pub days: i64,
}

impl Activity<'_> {
    pub fn description(&self) -> String {
        match self.kind {
            ActivityKind::Overdue => format!("Harvest was due {} days ago", self.days.abs()),
            ActivityKind::Upcoming => format!("Harvest due in {} days", self.days),
        }
    }

    pub fn time_label(&self) -> String {
        match self.kind {
            ActivityKind::Overdue => format!("{} days ago", self.days.abs()),
            ActivityKind::Upcoming => format!("In {} days", self.days),
        }
    }
}

/// Overdue harvests first, then those due within a week; each group closest
/// to today first, truncated to `limit`.
pub fn recent_activity(
    records: &[FarmerRecord],
    reference: NaiveDate,
    limit: usize,
) -> Vec<Activity<'_>> {
    let mut activities: Vec<Activity<'_>> = records
        .iter()
        .filter_map(|farmer| {
            let days = days_until(farmer.harvest_date?, reference);
            let kind = if days < 0 {
                ActivityKind::Overdue
            } else if days <= THIS_WEEK_DAYS {
                ActivityKind::Upcoming
            } else {
                return None;
            };
            Some(Activity { kind, farmer, days })
        })
        .collect();

    activities.sort_by_key(|a| (a.kind != ActivityKind::Overdue, a.days.abs()));
    activities.truncate(limit);
    activities
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Overdue,
    Urgent,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarvestNotification<'a> {
    pub kind: NotificationKind,
    pub priority: Priority,
    pub farmer: &'a FarmerRecord,
    pub harvest_date: NaiveDate,
    pub message: String,
}

/// Alerts for the notification bell: overdue and due-within-3-days are high
/// priority, the rest of this week medium. Stable within a priority.
pub fn harvest_notifications(
    records: &[FarmerRecord],
    reference: NaiveDate,
) -> Vec<HarvestNotification<'_>> {
    let mut notes: Vec<HarvestNotification<'_>> = records
        .iter()
        .filter_map(|farmer| {
            let harvest_date = farmer.harvest_date?;
            let days = days_until(harvest_date, reference);
            let (kind, priority, message) = match status_for_days(days) {
                HarvestStatus::Overdue => (
                    NotificationKind::Overdue,
                    Priority::High,
                    format!("Harvest was due {} days ago", days.abs()),
                ),
                HarvestStatus::DueSoon => (
                    NotificationKind::Urgent,
                    Priority::High,
                    format!(
                        "Harvest due in {} day{}",
                        days,
                        if days == 1 { "" } else { "s" }
                    ),
                ),
                HarvestStatus::ThisWeek => (
                    NotificationKind::Upcoming,
                    Priority::Medium,
                    "Harvest due this week".to_string(),
                ),
                HarvestStatus::Scheduled | HarvestStatus::None => return None,
            };
            Some(HarvestNotification {
                kind,
                priority,
                farmer,
                harvest_date,
                message,
            })
        })
        .collect();
    notes.sort_by_key(|n| n.priority);
    notes
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FarmerFilter {
    #[default]
    All,
    /// Harvest inside the 30-day upcoming window.
    Upcoming,
    Overdue,
}

impl FarmerFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("upcoming") => FarmerFilter::Upcoming,
            Some("overdue") => FarmerFilter::Overdue,
            _ => FarmerFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FarmerFilter::All => "all",
            FarmerFilter::Upcoming => "upcoming",
            FarmerFilter::Overdue => "overdue",
        }
    }
}

/// Farmer list search + filter chips. Input order is preserved.
pub fn filter_farmers<'a>(
    records: &'a [FarmerRecord],
    query: &str,
    filter: FarmerFilter,
    reference: NaiveDate,
) -> Vec<&'a FarmerRecord> {
    records
        .iter()
        .filter(|r| r.matches_query(query))
        .filter(|r| match filter {
            FarmerFilter::All => true,
            FarmerFilter::Upcoming => HarvestWindow::UPCOMING.contains(r.harvest_date, reference),
            FarmerFilter::Overdue => {
                classify(r.harvest_date, reference).status == HarvestStatus::Overdue
            }
        })
        .collect()
}
