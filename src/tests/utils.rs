use crate::auth::password::fast_config;
use crate::auth::sessions::create_session;
use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::domain::user::{Role, UserAccount, UserForm};
use crate::domain::validation::FormOutcome;
use crate::router::{handle_at, App, Clock};
use crate::errors::ResultResp;
use astra::{Body, Response};
use chrono::NaiveDate;
use http::{Method, Request};
use std::io::Read;

/// Fixed "today" so harvest statuses in router tests never drift.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn clock() -> Clock {
    Clock {
        now: 1_792_000_000,
        today: today(),
    }
}

/// Fresh app on its own temp-file database, initialized from the production schema.
pub fn init_test_app() -> App {
    let path = std::env::temp_dir().join(format!("farmer_test_{}.sqlite", uuid::Uuid::new_v4()));
    let db = Database::new(path.to_string_lossy().to_string());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let mut config = Config::default();
    config.security = fast_config();
    App::new(db, config)
}

/// Creates an account and a live session for it; returns the raw cookie token.
pub fn signed_in(app: &App, username: &str, role: Role) -> (UserAccount, String) {
    let c = clock();
    let form = UserForm {
        username: username.to_string(),
        password: "password1".to_string(),
        role: role.as_str().to_string(),
    };
    let outcome = app
        .db
        .with_conn(|conn| app.accounts.create_user(conn, &form, c.now))
        .expect("create account");
    let FormOutcome::Saved(account) = outcome else {
        panic!("account {username} rejected");
    };

    let token = app
        .db
        .with_conn(|conn| create_session(conn, &account.id, c.now, 3600))
        .expect("create session");
    (account, token)
}

pub fn get(app: &App, uri: &str, token: Option<&str>) -> ResultResp {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    handle_at(builder.body(Body::empty()).unwrap(), app, clock())
}

pub fn post_form(app: &App, uri: &str, token: Option<&str>, form: &[(&str, &str)]) -> ResultResp {
    let body: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    handle_at(builder.body(Body::from(body.into_bytes())).unwrap(), app, clock())
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
