use crate::domain::format::format_timestamp;
use crate::domain::user::{CurrentUser, UserAccount};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn profile_page(user: &CurrentUser, account: &UserAccount, farmers_added: usize) -> Markup {
    desktop_layout(
        "Profile",
        Some(user),
        html! {
            main class="container narrow" {
                h1 { "Profile" }
                section class="card" {
                    dl style="display: grid; grid-template-columns: auto 1fr; gap: 4px 16px;" {
                        dt { "Username" } dd { (account.username) }
                        dt { "Role" } dd { (account.role.as_str()) }
                        dt { "Member since" } dd { (format_timestamp(account.created_at)) }
                        dt { "Farmers registered" } dd { (farmers_added) }
                    }
                }
                form method="post" action="/logout" {
                    button type="submit" class="danger" { "Log out" }
                }
                p class="muted" style="text-align: center;" {
                    "Farmer Management System · v" (env!("CARGO_PKG_VERSION"))
                }
            }
        },
    )
}
