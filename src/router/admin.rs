// src/router/admin.rs
use tracing::{info, warn};

use super::request::ParsedRequest;
use super::{App, Clock};
use crate::db::users as db_users;
use crate::domain::user::{CurrentUser, Role, RoleCounts, UserForm};
use crate::domain::validation::FormOutcome;
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, html_response_with_status, redirect};
use crate::templates::pages;

pub fn users(app: &App, user: &CurrentUser) -> ResultResp {
    let accounts = app.db.with_conn(|conn| db_users::list_users(conn))?;
    let counts = RoleCounts::tally(&accounts);
    html_response(pages::admin_page(user, &accounts, counts))
}

pub fn new_form(user: &CurrentUser) -> ResultResp {
    let form = UserForm {
        role: Role::User.as_str().to_string(),
        ..UserForm::default()
    };
    html_response(pages::user_form_page(user, &form, &[], None))
}

pub fn create(app: &App, req: &ParsedRequest, user: &CurrentUser, clock: Clock) -> ResultResp {
    let form = UserForm::from_pairs(&req.form);
    let outcome = app
        .db
        .with_conn(|conn| app.accounts.create_user(conn, &form, clock.now))?;

    match outcome {
        FormOutcome::Saved(account) => {
            info!(username = %account.username, by = %user.username, "user added by admin");
            redirect("/admin")
        }
        FormOutcome::Rejected(result) => {
            html_response_with_status(422, pages::user_form_page(user, &form, &result.errors, None))
        }
    }
}

pub fn edit_form(app: &App, user: &CurrentUser, id: &str) -> ResultResp {
    let account = app
        .db
        .with_conn(|conn| db_users::get_user(conn, id))?
        .ok_or(ServerError::NotFound)?;
    let form = UserForm {
        username: account.username,
        password: String::new(),
        role: account.role.as_str().to_string(),
    };
    html_response(pages::user_form_page(user, &form, &[], Some(id)))
}

pub fn update(app: &App, req: &ParsedRequest, user: &CurrentUser, id: &str) -> ResultResp {
    let form = UserForm::from_pairs(&req.form);
    let outcome = app
        .db
        .with_conn(|conn| app.accounts.update_user(conn, id, &form))?;

    match outcome {
        FormOutcome::Saved(account) => {
            info!(user_id = id, username = %account.username, by = %user.username, "user updated by admin");
            redirect("/admin")
        }
        FormOutcome::Rejected(result) => html_response_with_status(
            422,
            pages::user_form_page(user, &form, &result.errors, Some(id)),
        ),
    }
}

pub fn delete(app: &App, user: &CurrentUser, id: &str) -> ResultResp {
    if id == user.id {
        warn!(username = %user.username, "admin tried to delete own account");
        return Err(ServerError::BadRequest(
            "You cannot delete your own account".into(),
        ));
    }
    app.db.with_conn(|conn| db_users::delete_user(conn, id))?;
    info!(user_id = id, by = %user.username, "user deleted");
    redirect("/admin")
}
