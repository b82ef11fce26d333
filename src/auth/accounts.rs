// src/auth/accounts.rs
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDateTime};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::sessions::create_session;
use crate::config::SecurityConfig;
use crate::db::users as db_users;
use crate::domain::user::{CurrentUser, Role, UserAccount, UserForm};
use crate::domain::validation::{validate_user_data, FormOutcome};
use crate::errors::ServerError;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone)]
pub struct LoggedIn {
    pub user: CurrentUser,
    /// Raw session token for the cookie.
    pub token: String,
}

/// Self-service registration form.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Credential checks and account writes. Passwords are hashed here and only
/// the hash is handed to storage.
pub struct AccountService {
    cfg: SecurityConfig,
    /// Verified against on unknown usernames so both login failures cost one hash.
    decoy_hash: OnceLock<String>,
}

fn timestamp(now: i64) -> NaiveDateTime {
    DateTime::from_timestamp(now, 0)
        .unwrap_or_default()
        .naive_utc()
}

impl AccountService {
    pub fn new(cfg: SecurityConfig) -> Self {
        Self {
            cfg,
            decoy_hash: OnceLock::new(),
        }
    }

    fn decoy_hash(&self) -> &str {
        self.decoy_hash.get_or_init(|| {
            hash_password("decoy-password", &self.cfg).unwrap_or_else(|e| {
                warn!(error = %e, "could not derive decoy hash");
                String::new()
            })
        })
    }

    /// Verify username/password directly against the stored Argon2 hash and
    /// open a session. Unknown user and wrong password look the same.
    pub fn login(
        &self,
        conn: &Connection,
        username: &str,
        password: &str,
        now: i64,
    ) -> Result<LoggedIn, ServerError> {
        let username = username.trim();
        let Some((account, stored_hash)) = db_users::find_by_username_with_hash(conn, username)?
        else {
            verify_password(password, self.decoy_hash());
            warn!(username, "login for unknown user");
            return Err(ServerError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !verify_password(password, &stored_hash) {
            warn!(username, "login with wrong password");
            return Err(ServerError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = create_session(conn, &account.id, now, self.cfg.session_ttl_secs())?;
        info!(username, role = %account.role, "user logged in");
        Ok(LoggedIn {
            user: account.into(),
            token,
        })
    }

    /// Registration always creates a regular user.
    pub fn signup(
        &self,
        conn: &Connection,
        form: &SignupForm,
        now: i64,
    ) -> Result<FormOutcome<UserAccount>, ServerError> {
        let user_form = UserForm {
            username: form.username.clone(),
            password: form.password.clone(),
            role: Role::User.as_str().to_string(),
        };
        let mut errors = validate_user_data(&user_form, false).errors;
        if form.password != form.confirm_password {
            errors.push("Passwords do not match".to_string());
        }
        self.create_checked(conn, &user_form, errors, now)
    }

    /// Admin-side account creation.
    pub fn create_user(
        &self,
        conn: &Connection,
        form: &UserForm,
        now: i64,
    ) -> Result<FormOutcome<UserAccount>, ServerError> {
        let errors = validate_user_data(form, false).errors;
        self.create_checked(conn, form, errors, now)
    }

    fn create_checked(
        &self,
        conn: &Connection,
        form: &UserForm,
        mut errors: Vec<String>,
        now: i64,
    ) -> Result<FormOutcome<UserAccount>, ServerError> {
        let username = form.username.trim();
        if errors.is_empty() && db_users::username_taken(conn, username, None)? {
            errors.push("Username is already taken".to_string());
        }
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(errors));
        }

        let role = form
            .role
            .parse::<Role>()
            .map_err(ServerError::BadRequest)?;
        let hash = hash_password(&form.password, &self.cfg)?;
        let account = db_users::create_user(conn, username, &hash, role, timestamp(now))?;
        info!(username, role = %role, "account created");
        Ok(FormOutcome::Saved(account))
    }

    /// Admin-side edit. A blank password keeps the current one.
    pub fn update_user(
        &self,
        conn: &Connection,
        id: &str,
        form: &UserForm,
    ) -> Result<FormOutcome<UserAccount>, ServerError> {
        let mut errors = validate_user_data(form, true).errors;
        let username = form.username.trim();
        if errors.is_empty() && db_users::username_taken(conn, username, Some(id))? {
            errors.push("Username is already taken".to_string());
        }
        if !errors.is_empty() {
            return Ok(FormOutcome::rejected(errors));
        }

        let role = form
            .role
            .parse::<Role>()
            .map_err(ServerError::BadRequest)?;
        let hash = form
            .password()
            .map(|p| hash_password(p, &self.cfg))
            .transpose()?;
        let Some(account) = db_users::update_user(conn, id, username, role, hash.as_deref())?
        else {
            warn!(user_id = id, "refused to demote the last admin");
            return Ok(FormOutcome::rejected(vec![
                "At least one admin account is required".to_string(),
            ]));
        };
        info!(user_id = id, username, "account updated");
        Ok(FormOutcome::Saved(account))
    }

    /// Used by the `create-admin` command to bootstrap the first administrator.
    pub fn create_admin(
        &self,
        conn: &Connection,
        username: &str,
        password: &str,
        now: i64,
    ) -> Result<FormOutcome<UserAccount>, ServerError> {
        let form = UserForm {
            username: username.to_string(),
            password: password.to_string(),
            role: Role::Admin.as_str().to_string(),
        };
        self.create_user(conn, &form, now)
    }
}
