use crate::templates::{desktop_layout, errors_list};
use maud::{html, Markup};

pub fn signup_page(errors: &[String], username: &str) -> Markup {
    desktop_layout(
        "Create account",
        None,
        html! {
            main class="container narrow" {
                h1 { "Create account" }
                (errors_list(errors))
                form method="post" action="/signup" class="stack" {
                    label for="username" { "Username" }
                    input type="text" id="username" name="username" value=(username)
                        autocomplete="username" required;
                    label for="password" { "Password" }
                    input type="password" id="password" name="password"
                        autocomplete="new-password" required;
                    label for="confirm_password" { "Confirm password" }
                    input type="password" id="confirm_password" name="confirm_password"
                        autocomplete="new-password" required;
                    button type="submit" class="primary" { "Sign up" }
                }
                p class="microcopy" {
                    "Already registered? " a href="/login" { "Sign in" }
                }
            }
        },
    )
}
