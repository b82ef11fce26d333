use crate::domain::aggregate::FarmerFilter;
use crate::domain::farmer::FarmerRecord;
use crate::domain::user::CurrentUser;
use crate::templates::components::farmer_card;
use crate::templates::desktop_layout;
use chrono::NaiveDate;
use maud::{html, Markup};

const FILTERS: [(FarmerFilter, &str); 3] = [
    (FarmerFilter::All, "All"),
    (FarmerFilter::Upcoming, "Upcoming"),
    (FarmerFilter::Overdue, "Overdue"),
];

pub fn farmers_page(
    user: &CurrentUser,
    farmers: &[&FarmerRecord],
    query: &str,
    filter: FarmerFilter,
    reference: NaiveDate,
) -> Markup {
    desktop_layout(
        "Farmers",
        Some(user),
        html! {
            main class="container" {
                div style="display: flex; justify-content: space-between; align-items: center;" {
                    h1 { "Farmers" }
                    a href="/farmers/new" class="btn primary" { "Add farmer" }
                }

                form method="get" action="/farmers" style="display: flex; gap: 8px; margin-bottom: 1rem;" {
                    input type="search" name="q" value=(query) placeholder="Search name, town, or barangay";
                    input type="hidden" name="filter" value=(filter.as_str());
                    button type="submit" { "Search" }
                }

                nav class="chips" style="display: flex; gap: 8px; margin-bottom: 1rem;" {
                    @for (chip, label) in FILTERS {
                        @let href = format!("/farmers?q={}&filter={}", urlencode(query), chip.as_str());
                        @if chip == filter {
                            a href=(href) class="chip active" aria-current="true" { strong { (label) } }
                        } @else {
                            a href=(href) class="chip" { (label) }
                        }
                    }
                }

                p class="muted" { (farmers.len()) " farmer(s)" }

                @if farmers.is_empty() {
                    p { "No farmers match." }
                } @else {
                    div class="farmer-grid" style="display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem;" {
                        @for farmer in farmers {
                            (farmer_card(farmer, reference))
                        }
                    }
                }
            }
        },
    )
}

fn urlencode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
