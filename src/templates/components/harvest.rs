use chrono::NaiveDate;
use maud::{html, Markup};

use crate::domain::aggregate::{Activity, ActivityKind, HarvestNotification, Priority, ScheduledHarvest};
use crate::domain::farmer::FarmerRecord;
use crate::domain::format::{format_date, format_hectares, format_optional_date};
use crate::domain::harvest::{card_badge, classify};
use crate::templates::components::card::pill;

/// Farmer list entry with the card-level harvest badge.
pub fn farmer_card(farmer: &FarmerRecord, reference: NaiveDate) -> Markup {
    let badge = card_badge(classify(farmer.harvest_date, reference));
    html! {
        div class="card farmer-card" {
            div style="display: flex; justify-content: space-between; align-items: center;" {
                h3 style="margin: 0;" { (farmer.display_name()) }
                @if let Some(badge) = badge {
                    (pill(badge.label(), badge.color()))
                }
            }
            p style="color: #6b7280; margin: 4px 0;" {
                (farmer.barangay) ", " (farmer.town)
                @if !farmer.location_group.is_empty() {
                    " · " (farmer.location_group)
                }
            }
            dl style="display: grid; grid-template-columns: auto 1fr; gap: 2px 12px; margin: 8px 0;" {
                @if !farmer.contact_number.is_empty() {
                    dt { "Contact" } dd { (farmer.contact_number) }
                }
                @if let Some(area) = farmer.land_area {
                    dt { "Land area" } dd { (format_hectares(area)) }
                }
                @if farmer.planted_date.is_some() {
                    dt { "Planted" } dd { (format_optional_date(farmer.planted_date)) }
                }
                @if farmer.harvest_date.is_some() {
                    dt { "Harvest" } dd { (format_optional_date(farmer.harvest_date)) }
                }
            }
            div style="display: flex; gap: 8px;" {
                a href=(format!("/farmers/{}/edit", farmer.id)) { "Edit" }
                form method="post" action=(format!("/farmers/{}/delete", farmer.id)) style="margin: 0;" {
                    button type="submit" class="btn-link danger" { "Delete" }
                }
            }
        }
    }
}

/// Horizontal bars, widths relative to the largest group.
pub fn location_breakdown(title: &str, groups: &[(String, usize)]) -> Markup {
    let max = groups.iter().map(|(_, n)| *n).max().unwrap_or(0);
    html! {
        section class="card" {
            h3 { (title) }
            @if groups.is_empty() {
                p class="muted" { "No data yet." }
            } @else {
                @for (name, count) in groups {
                    @let width = if max == 0 { 0 } else { count * 100 / max };
                    div class="bar-row" style="display: flex; align-items: center; gap: 8px; margin: 4px 0;" {
                        span style="width: 140px;" { (name) }
                        div style="flex: 1; background: #f3f4f6; border-radius: 4px;" {
                            div style=(format!("width: {width}%; background: #16a34a; height: 10px; border-radius: 4px;")) {}
                        }
                        span style="width: 32px; text-align: right;" { (count) }
                    }
                }
            }
        }
    }
}

pub fn harvest_calendar(schedule: &[ScheduledHarvest<'_>], days: i64) -> Markup {
    html! {
        section class="card" {
            h3 { "Harvest calendar (next " (days) " days)" }
            @if schedule.is_empty() {
                p class="muted" { "No harvests scheduled." }
            } @else {
                ul class="calendar" {
                    @for entry in schedule {
                        li {
                            strong { (format_date(entry.harvest_date)) }
                            " · " (entry.farmer.display_name())
                            " (" (entry.farmer.town) ")"
                            @if entry.days == 0 {
                                " · today"
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn recent_activity_list(activity: &[Activity<'_>]) -> Markup {
    html! {
        section class="card" {
            h3 { "Recent activity" }
            @if activity.is_empty() {
                p class="muted" { "Nothing needs attention." }
            } @else {
                ul {
                    @for item in activity {
                        @let color = match item.kind {
                            ActivityKind::Overdue => "#dc2626",
                            ActivityKind::Upcoming => "#f59e0b",
                        };
                        li style=(format!("border-left: 3px solid {color}; padding-left: 8px; margin: 6px 0;")) {
                            strong { (item.farmer.display_name()) }
                            " · " (item.description())
                            span class="muted" style="float: right;" { (item.time_label()) }
                        }
                    }
                }
            }
        }
    }
}

pub fn notifications_panel(notes: &[HarvestNotification<'_>]) -> Markup {
    html! {
        section class="card" id="notifications" {
            h3 { "Notifications (" (notes.len()) ")" }
            @for note in notes {
                @let color = match note.priority {
                    Priority::High => "#dc2626",
                    Priority::Medium => "#f59e0b",
                };
                div class="notification" style=(format!("border-left: 3px solid {color}; padding: 4px 8px; margin: 4px 0;")) {
                    strong { (note.farmer.display_name()) }
                    div { (note.message) " · " (format_date(note.harvest_date)) }
                }
            }
        }
    }
}
