use crate::domain::farmer::FarmerForm;
use crate::domain::user::CurrentUser;
use crate::templates::{desktop_layout, errors_list};
use maud::{html, Markup};

/// Whether the form creates a farmer or edits an existing one.
pub enum FormTarget<'a> {
    New,
    Edit(&'a str),
}

pub fn farmer_form_page(
    user: &CurrentUser,
    form: &FarmerForm,
    errors: &[String],
    target: FormTarget<'_>,
) -> Markup {
    let (title, action) = match target {
        FormTarget::New => ("Register farmer", "/farmers".to_string()),
        FormTarget::Edit(id) => ("Edit farmer", format!("/farmers/{id}")),
    };

    desktop_layout(
        title,
        Some(user),
        html! {
            main class="container narrow" {
                h1 { (title) }
                (errors_list(errors))
                form method="post" action=(action) class="stack" {
                    fieldset {
                        legend { "Name" }
                        (text_field("first_name", "First name", &form.first_name, true))
                        (text_field("middle_initial", "Middle initial", &form.middle_initial, false))
                        (text_field("last_name", "Last name", &form.last_name, true))
                    }
                    fieldset {
                        legend { "Location" }
                        (text_field("location_group", "Group / purok", &form.location_group, false))
                        (text_field("barangay", "Barangay", &form.barangay, true))
                        (text_field("town", "Town", &form.town, true))
                    }
                    fieldset {
                        legend { "Farm" }
                        (text_field("contact_number", "Contact number", &form.contact_number, false))
                        label for="land_area" { "Land area (ha)" }
                        input type="number" step="any" min="0" id="land_area" name="land_area" value=(form.land_area);
                        label for="planted_date" { "Planted date" }
                        input type="date" id="planted_date" name="planted_date" value=(form.planted_date);
                        label for="harvest_date" { "Expected harvest date" }
                        input type="date" id="harvest_date" name="harvest_date" value=(form.harvest_date);
                    }
                    div style="display: flex; gap: 8px;" {
                        button type="submit" class="primary" { "Save" }
                        a href="/farmers" { "Cancel" }
                    }
                }
            }
        },
    )
}

fn text_field(name: &str, label: &str, value: &str, required: bool) -> Markup {
    html! {
        label for=(name) { (label) }
        input type="text" id=(name) name=(name) value=(value) required[required];
    }
}
