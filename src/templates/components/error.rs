use maud::{html, Markup, DOCTYPE};

/// Standalone error page; does not depend on a signed-in user.
pub fn error_page(status: u16, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                style {
                    "body { font-family: system-ui, sans-serif; max-width: 720px; margin: 4rem auto; padding: 1rem; }"
                    "h1 { font-size: 2rem; margin-bottom: 1rem; }"
                    "p { font-size: 1.1rem; color: #444; }"
                }
            }
            body {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to dashboard" } }
            }
        }
    }
}

/// Validation messages above a form, one per line.
pub fn errors_list(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            div class="form-errors" role="alert" style="border: 1px solid #fecaca; background: #fef2f2; color: #b91c1c; padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem;" {
                ul style="margin: 0; padding-left: 1.2rem;" {
                    @for err in errors {
                        li { (err) }
                    }
                }
            }
        }
    }
}
