// src/router/mod.rs
use astra::Request;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::auth::accounts::AccountService;
use crate::auth::sessions::load_user_from_session;
use crate::config::Config;
use crate::db::Database;
use crate::domain::user::{require_admin, CurrentUser};
use crate::errors::{ResultResp, ServerError};
use crate::responses::redirect;

mod admin;
mod auth;
mod farmers;
mod reports;
pub mod request;

use request::ParsedRequest;

/// Everything a request handler needs that outlives the request.
pub struct App {
    pub db: Database,
    pub config: Config,
    pub accounts: AccountService,
}

impl App {
    pub fn new(db: Database, config: Config) -> Self {
        let accounts = AccountService::new(config.security.clone());
        Self {
            db,
            config,
            accounts,
        }
    }
}

/// Wall-clock readings taken once per request. Every harvest classification
/// in that request uses the same `today`.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    /// Unix seconds, for sessions.
    pub now: i64,
    pub today: NaiveDate,
}

impl Clock {
    pub fn system() -> Self {
        Self {
            now: Utc::now().timestamp(),
            today: Local::now().date_naive(),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        DateTime::from_timestamp(self.now, 0)
            .unwrap_or_default()
            .naive_utc()
    }
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    handle_at(req, app, Clock::system())
}

pub fn handle_at(req: Request, app: &App, clock: Clock) -> ResultResp {
    let req = ParsedRequest::read(req)?;
    debug!(method = %req.method, path = %req.path, "request");

    let user = match req.session_token.as_deref() {
        Some(token) => app
            .db
            .with_conn(|conn| load_user_from_session(conn, token, clock.now))?,
        None => None,
    };

    let segments = req.segments();
    match (req.method.as_str(), segments.as_slice()) {
        ("GET", ["login"]) => auth::login_form(user.as_ref()),
        ("POST", ["login"]) => auth::login_submit(app, &req, clock),
        ("GET", ["signup"]) => auth::signup_form(user.as_ref()),
        ("POST", ["signup"]) => auth::signup_submit(app, &req, clock),
        ("POST", ["logout"]) => auth::logout(app, &req, clock),
        _ => {
            let Some(user) = user else {
                debug!(path = %req.path, "no session, redirecting to login");
                return redirect("/login");
            };
            route_signed_in(app, &req, &segments, &user, clock)
        }
    }
}

fn route_signed_in(
    app: &App,
    req: &ParsedRequest,
    segments: &[&str],
    user: &CurrentUser,
    clock: Clock,
) -> ResultResp {
    match (req.method.as_str(), segments) {
        ("GET", []) => reports::dashboard(app, user, clock),
        ("GET", ["profile"]) => auth::profile(app, user),

        ("GET", ["farmers"]) => farmers::list(app, req, user, clock),
        ("GET", ["farmers", "new"]) => farmers::new_form(user),
        ("POST", ["farmers"]) => farmers::create(app, req, user, clock),
        ("GET", ["farmers", id, "edit"]) => farmers::edit_form(app, user, id),
        ("POST", ["farmers", id]) => farmers::update(app, req, user, id),
        ("POST", ["farmers", id, "delete"]) => farmers::delete(app, user, id),

        ("GET", ["reports"]) => reports::reports(app, user, clock),
        ("GET", ["reports", "export"]) => reports::export(app, user, clock),

        (_, ["admin", ..]) => {
            require_admin(user)?;
            match (req.method.as_str(), segments) {
                ("GET", ["admin"]) => admin::users(app, user),
                ("GET", ["admin", "users", "new"]) => admin::new_form(user),
                ("POST", ["admin", "users"]) => admin::create(app, req, user, clock),
                ("GET", ["admin", "users", id, "edit"]) => admin::edit_form(app, user, id),
                ("POST", ["admin", "users", id]) => admin::update(app, req, user, id),
                ("POST", ["admin", "users", id, "delete"]) => admin::delete(app, user, id),
                _ => Err(ServerError::NotFound),
            }
        }

        _ => Err(ServerError::NotFound),
    }
}
