// src/router/farmers.rs
use tracing::info;

use super::request::ParsedRequest;
use super::{App, Clock};
use crate::db::farmers as db_farmers;
use crate::domain::aggregate::{filter_farmers, FarmerFilter};
use crate::domain::farmer::FarmerForm;
use crate::domain::user::CurrentUser;
use crate::domain::validation::validate_farmer_data;
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, html_response_with_status, redirect};
use crate::templates::pages::{self, FormTarget};

pub fn list(app: &App, req: &ParsedRequest, user: &CurrentUser, clock: Clock) -> ResultResp {
    let query = req.query_param("q").unwrap_or("");
    let filter = FarmerFilter::parse(req.query_param("filter"));

    let records = app.db.with_conn(|conn| db_farmers::list_farmers(conn))?;
    let visible = filter_farmers(&records, query, filter, clock.today);

    html_response(pages::farmers_page(
        user,
        &visible,
        query,
        filter,
        clock.today,
    ))
}

pub fn new_form(user: &CurrentUser) -> ResultResp {
    html_response(pages::farmer_form_page(
        user,
        &FarmerForm::default(),
        &[],
        FormTarget::New,
    ))
}

pub fn create(app: &App, req: &ParsedRequest, user: &CurrentUser, clock: Clock) -> ResultResp {
    let form = FarmerForm::from_pairs(&req.form);
    let check = validate_farmer_data(&form);
    if !check.is_valid() {
        return html_response_with_status(
            422,
            pages::farmer_form_page(user, &form, &check.errors, FormTarget::New),
        );
    }

    let data = form.to_farmer_data();
    let farmer = app
        .db
        .with_conn(|conn| db_farmers::create_farmer(conn, &data, &user.id, clock.timestamp()))?;
    info!(farmer_id = %farmer.id, by = %user.username, "farmer created");
    redirect("/farmers")
}

pub fn edit_form(app: &App, user: &CurrentUser, id: &str) -> ResultResp {
    let farmer = app
        .db
        .with_conn(|conn| db_farmers::get_farmer(conn, id))?
        .ok_or(ServerError::NotFound)?;
    html_response(pages::farmer_form_page(
        user,
        &FarmerForm::from_record(&farmer),
        &[],
        FormTarget::Edit(id),
    ))
}

pub fn update(app: &App, req: &ParsedRequest, user: &CurrentUser, id: &str) -> ResultResp {
    let form = FarmerForm::from_pairs(&req.form);
    let check = validate_farmer_data(&form);
    if !check.is_valid() {
        return html_response_with_status(
            422,
            pages::farmer_form_page(user, &form, &check.errors, FormTarget::Edit(id)),
        );
    }

    let data = form.to_farmer_data();
    app.db
        .with_conn(|conn| db_farmers::update_farmer(conn, id, &data))?;
    info!(farmer_id = id, by = %user.username, "farmer updated");
    redirect("/farmers")
}

pub fn delete(app: &App, user: &CurrentUser, id: &str) -> ResultResp {
    app.db.with_conn(|conn| db_farmers::delete_farmer(conn, id))?;
    info!(farmer_id = id, by = %user.username, "farmer deleted");
    redirect("/farmers")
}
