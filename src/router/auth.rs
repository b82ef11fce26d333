// src/router/auth.rs
use tracing::info;

use super::request::{clear_session_cookie, session_cookie, ParsedRequest};
use super::{App, Clock};
use crate::auth::accounts::SignupForm;
use crate::auth::sessions::revoke_session;
use crate::db::{farmers as db_farmers, users as db_users};
use crate::domain::user::CurrentUser;
use crate::domain::validation::FormOutcome;
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, html_response_with_status, redirect, redirect_with_cookie};
use crate::templates::pages;

pub fn login_form(user: Option<&CurrentUser>) -> ResultResp {
    if user.is_some() {
        return redirect("/");
    }
    html_response(pages::login_page(None, ""))
}

pub fn login_submit(app: &App, req: &ParsedRequest, clock: Clock) -> ResultResp {
    let username = req.form_field("username");
    let password = req.form_field("password");

    if username.trim().is_empty() || password.is_empty() {
        return html_response_with_status(
            422,
            pages::login_page(Some("Please fill in all fields"), username),
        );
    }

    let result = app
        .db
        .with_conn(|conn| app.accounts.login(conn, username, password, clock.now));

    match result {
        Ok(logged_in) => {
            let cookie = session_cookie(
                &logged_in.token,
                app.config.session_ttl_secs(),
                app.config.security.cookie_secure,
            );
            redirect_with_cookie("/", &cookie)
        }
        Err(ServerError::Unauthorized(msg)) => {
            html_response_with_status(401, pages::login_page(Some(&msg), username))
        }
        Err(e) => Err(e),
    }
}

pub fn signup_form(user: Option<&CurrentUser>) -> ResultResp {
    if user.is_some() {
        return redirect("/");
    }
    html_response(pages::signup_page(&[], ""))
}

pub fn signup_submit(app: &App, req: &ParsedRequest, clock: Clock) -> ResultResp {
    let form = SignupForm {
        username: req.form_field("username").to_string(),
        password: req.form_field("password").to_string(),
        confirm_password: req.form_field("confirm_password").to_string(),
    };

    let outcome = app
        .db
        .with_conn(|conn| app.accounts.signup(conn, &form, clock.now))?;

    match outcome {
        FormOutcome::Saved(account) => {
            info!(username = %account.username, "self-service signup");
            redirect("/login")
        }
        FormOutcome::Rejected(result) => html_response_with_status(
            422,
            pages::signup_page(&result.errors, &form.username),
        ),
    }
}

pub fn logout(app: &App, req: &ParsedRequest, clock: Clock) -> ResultResp {
    if let Some(token) = req.session_token.as_deref() {
        app.db
            .with_conn(|conn| revoke_session(conn, token, clock.now))?;
    }
    redirect_with_cookie("/login", &clear_session_cookie())
}

pub fn profile(app: &App, user: &CurrentUser) -> ResultResp {
    let (account, farmers_added) = app.db.with_conn(|conn| {
        let account = db_users::get_user(conn, &user.id)?.ok_or(ServerError::NotFound)?;
        let added = db_farmers::list_farmers(conn)?
            .iter()
            .filter(|f| f.user_id.as_deref() == Some(user.id.as_str()))
            .count();
        Ok((account, added))
    })?;
    html_response(pages::profile_page(user, &account, farmers_added))
}
