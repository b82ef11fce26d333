use maud::{html, Markup};

/// Single KPI tile.
pub fn stat_card(label: &str, value: &str, color: &str) -> Markup {
    html! {
        div class="card stat" style=(format!("border-left: 4px solid {color};")) {
            div class="stat-value" style="font-size: 1.8rem; font-weight: bold;" { (value) }
            div class="stat-label" style="color: #6b7280;" { (label) }
        }
    }
}

/// Coloured pill used for harvest states and roles.
pub fn pill(label: &str, color: &str) -> Markup {
    html! {
        span class="pill" style=(format!("background: {color}; color: white; padding: 2px 10px; border-radius: 999px; font-size: 0.8em;")) {
            (label)
        }
    }
}
