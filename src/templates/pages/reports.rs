use crate::domain::aggregate::{LandAreaSummary, ScheduledHarvest, StatusCounts};
use crate::domain::format::format_hectares;
use crate::domain::user::CurrentUser;
use crate::templates::components::{harvest_calendar, location_breakdown, pill, stat_card};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct ReportsVm<'a> {
    pub total_farmers: usize,
    pub land: LandAreaSummary,
    pub counts: StatusCounts,
    /// Harvests in the 30-day window.
    pub upcoming: usize,
    /// Harvests within a week either side of today.
    pub harvestable: usize,
    pub by_town: Vec<(String, usize)>,
    pub by_barangay: Vec<(String, usize)>,
    pub by_group: Vec<(String, usize)>,
    pub schedule: Vec<ScheduledHarvest<'a>>,
    pub schedule_days: i64,
}

pub fn reports_page(user: &CurrentUser, vm: &ReportsVm<'_>) -> Markup {
    desktop_layout(
        "Reports",
        Some(user),
        html! {
            main class="container" {
                div style="display: flex; justify-content: space-between; align-items: center;" {
                    h1 { "Reports" }
                    a href="/reports/export" class="btn" { "Download XLSX" }
                }

                div class="stats-grid" style="display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 1rem;" {
                    (stat_card("Farmers", &vm.total_farmers.to_string(), "#2563eb"))
                    (stat_card("Total land area", &format_hectares(vm.land.total), "#16a34a"))
                    (stat_card("Average land area", &format_hectares(vm.land.average), "#0d9488"))
                    (stat_card("Ready for harvest", &vm.harvestable.to_string(), "#7c3aed"))
                }

                section class="card" {
                    h3 { "Harvest timeline" }
                    table style="width: 100%; border-collapse: collapse;" {
                        tbody {
                            @for (status, count) in vm.counts.iter() {
                                tr {
                                    td style="padding: 6px 8px;" { (pill(status.label(), status.color())) }
                                    td style="padding: 6px 8px; text-align: right;" { (count) }
                                }
                            }
                            tr {
                                td style="padding: 6px 8px;" { "Upcoming (next 30 days)" }
                                td style="padding: 6px 8px; text-align: right;" { (vm.upcoming) }
                            }
                            tr {
                                td style="padding: 6px 8px; color: #6b7280;" { "No harvest date" }
                                td style="padding: 6px 8px; text-align: right; color: #6b7280;" { (vm.counts.unscheduled) }
                            }
                        }
                    }
                }

                div style="display: grid; grid-template-columns: 1fr 1fr; gap: 1rem;" {
                    (location_breakdown("Farmers by town", &vm.by_town))
                    (location_breakdown("Farmers by barangay", &vm.by_barangay))
                }
                @if !vm.by_group.is_empty() {
                    (location_breakdown("Farmers by group", &vm.by_group))
                }

                (harvest_calendar(&vm.schedule, vm.schedule_days))
            }
        },
    )
}
