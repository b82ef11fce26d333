use crate::domain::user::CurrentUser;
use maud::{html, Markup, DOCTYPE};

/// Page shell. `user` is `None` on the signed-out screens (login, signup),
/// which get a bare header without navigation.
pub fn desktop_layout(title: &str, user: Option<&CurrentUser>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Farmer Registry" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
              header class="flex items-center justify-between px-6 py-3 shadow" {
                  svg
                      xmlns="http://www.w3.org/2000/svg"
                      width="24"
                      height="24"
                      viewBox="0 0 24 24"
                      fill="none"
                      stroke="#16a34a"
                      stroke-width="2"
                      stroke-linecap="round"
                      stroke-linejoin="round"
                      class="icon icon-tabler icon-tabler-plant"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M7 15h10v4a2 2 0 0 1 -2 2h-6a2 2 0 0 1 -2 -2z" {}
                      path d="M12 9a6 6 0 0 0 -6 -6h-3v2a6 6 0 0 0 6 6h3" {}
                      path d="M12 11a6 6 0 0 1 6 -6h3v1a6 6 0 0 1 -6 6h-3" {}
                      path d="M12 15l0 -6" {}
                  }
                  h3 { "Farmer Registry" }
                  @if let Some(user) = user {
                      nav {
                          ul {
                              li { a href="/" { "Dashboard" } }
                              li { a href="/farmers" { "Farmers" } }
                              li { a href="/reports" { "Reports" } }
                              @if user.is_admin() {
                                  li { a href="/admin" { "Admin" } }
                              }
                              li { a href="/profile" { (user.username) } }
                          }
                      }
                      form method="post" action="/logout" class="inline" {
                          button type="submit" class="btn-link" { "Log out" }
                      }
                  } @else {
                      a href="/login" class="text-base font-medium hover:text-blue-600" { "Login" }
                  }
              }
                (content)
            }
        }
    }
}
