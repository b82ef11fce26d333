use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn login_page(error: Option<&str>, username: &str) -> Markup {
    desktop_layout(
        "Sign in",
        None,
        html! {
            main class="container narrow" {
                h1 { "Sign in" }
                @if let Some(error) = error {
                    p class="form-errors" role="alert" style="color: #b91c1c;" { (error) }
                }
                form method="post" action="/login" class="stack" {
                    label for="username" { "Username" }
                    input type="text" id="username" name="username" value=(username)
                        autocomplete="username" required;
                    label for="password" { "Password" }
                    input type="password" id="password" name="password"
                        autocomplete="current-password" required;
                    button type="submit" class="primary" { "Sign in" }
                }
                p class="microcopy" {
                    "No account yet? " a href="/signup" { "Create one" }
                }
            }
        },
    )
}
