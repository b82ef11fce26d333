use crate::domain::user::{CurrentUser, Role, UserForm};
use crate::templates::{desktop_layout, errors_list};
use maud::{html, Markup};

/// `editing` carries the id of the account being edited.
pub fn user_form_page(
    user: &CurrentUser,
    form: &UserForm,
    errors: &[String],
    editing: Option<&str>,
) -> Markup {
    let (title, action) = match editing {
        None => ("Add user", "/admin/users".to_string()),
        Some(id) => ("Edit user", format!("/admin/users/{id}")),
    };

    desktop_layout(
        title,
        Some(user),
        html! {
            main class="container narrow" {
                h1 { (title) }
                (errors_list(errors))
                form method="post" action=(action) class="stack" {
                    label for="username" { "Username" }
                    input type="text" id="username" name="username" value=(form.username) required;

                    label for="password" {
                        "Password"
                        @if editing.is_some() {
                            span class="muted" { " (leave blank to keep current)" }
                        }
                    }
                    input type="password" id="password" name="password"
                        autocomplete="new-password" required[editing.is_none()];

                    label for="role" { "Role" }
                    select id="role" name="role" {
                        @for role in [Role::User, Role::Admin] {
                            option value=(role.as_str()) selected[form.role == role.as_str()] {
                                (role.as_str())
                            }
                        }
                    }

                    div style="display: flex; gap: 8px;" {
                        button type="submit" class="primary" { "Save" }
                        a href="/admin" { "Cancel" }
                    }
                }
            }
        },
    )
}
