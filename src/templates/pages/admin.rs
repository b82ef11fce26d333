use crate::domain::format::format_timestamp;
use crate::domain::user::{CurrentUser, Role, RoleCounts, UserAccount};
use crate::templates::components::{pill, stat_card};
use crate::templates::desktop_layout;
use maud::{html, Markup};

fn role_color(role: Role) -> &'static str {
    match role {
        Role::Admin => "#7c3aed",
        Role::User => "#2563eb",
    }
}

pub fn admin_page(user: &CurrentUser, accounts: &[UserAccount], counts: RoleCounts) -> Markup {
    desktop_layout(
        "User management",
        Some(user),
        html! {
            main class="container" {
                div style="display: flex; justify-content: space-between; align-items: center;" {
                    h1 { "User management" }
                    a href="/admin/users/new" class="btn primary" { "Add user" }
                }

                div class="stats-grid" style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin-bottom: 2rem;" {
                    (stat_card("Accounts", &accounts.len().to_string(), "#2563eb"))
                    (stat_card("Admins", &counts.admins.to_string(), "#7c3aed"))
                    (stat_card("Regular users", &counts.users.to_string(), "#16a34a"))
                }

                div class="card" style="overflow-x: auto;" {
                    table style="width: 100%; border-collapse: collapse;" {
                        thead {
                            tr {
                                th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Username" }
                                th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Role" }
                                th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Created" }
                                th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Actions" }
                            }
                        }
                        tbody {
                            @for account in accounts {
                                tr {
                                    td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" {
                                        (account.username)
                                        @if account.id == user.id {
                                            span class="muted" { " (you)" }
                                        }
                                    }
                                    td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" {
                                        (pill(account.role.as_str(), role_color(account.role)))
                                    }
                                    td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" {
                                        (format_timestamp(account.created_at))
                                    }
                                    td style="padding: 8px; border-bottom: 1px solid #f3f4f6; display: flex; gap: 8px;" {
                                        a href=(format!("/admin/users/{}/edit", account.id)) { "Edit" }
                                        @if account.id != user.id {
                                            form method="post" action=(format!("/admin/users/{}/delete", account.id)) style="margin: 0;" {
                                                button type="submit" class="btn-link danger" { "Delete" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
