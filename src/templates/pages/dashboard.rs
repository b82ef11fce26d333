use crate::domain::aggregate::{Activity, HarvestNotification, LandAreaSummary};
use crate::domain::format::format_hectares;
use crate::domain::user::CurrentUser;
use crate::templates::components::{notifications_panel, recent_activity_list, stat_card};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct DashboardVm<'a> {
    pub total_farmers: usize,
    pub land: LandAreaSummary,
    /// Harvests in the 30-day upcoming window.
    pub upcoming: usize,
    pub overdue: usize,
    pub activity: Vec<Activity<'a>>,
    pub notifications: Vec<HarvestNotification<'a>>,
}

pub fn dashboard_page(user: &CurrentUser, vm: &DashboardVm<'_>) -> Markup {
    desktop_layout(
        "Dashboard",
        Some(user),
        html! {
            main class="container" {
                h1 { "Dashboard" }
                p { "Signed in as " strong { (user.username) } }

                div class="stats-grid" style="display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 1rem;" {
                    (stat_card("Total farmers", &vm.total_farmers.to_string(), "#2563eb"))
                    (stat_card("Total land area", &format_hectares(vm.land.total), "#16a34a"))
                    (stat_card("Average per farmer", &format_hectares(vm.land.average), "#0d9488"))
                    (stat_card("Upcoming harvests", &vm.upcoming.to_string(), "#f59e0b"))
                    (stat_card("Overdue harvests", &vm.overdue.to_string(), "#dc2626"))
                }

                div style="display: grid; grid-template-columns: 2fr 1fr; gap: 1rem; margin-top: 1rem;" {
                    (recent_activity_list(&vm.activity))
                    (notifications_panel(&vm.notifications))
                }

                section class="card" {
                    h3 { "Quick actions" }
                    ul {
                        li { a href="/farmers/new" { "Register a farmer" } }
                        li { a href="/farmers?filter=upcoming" { "Upcoming harvests" } }
                        li { a href="/reports" { "Open reports" } }
                    }
                }
            }
        },
    )
}
