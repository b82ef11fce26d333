// src/router/request.rs
use astra::Request;
use std::collections::HashMap;
use std::io::Read;

use crate::auth::sessions::SESSION_COOKIE;
use crate::errors::ServerError;

/// Larger bodies are rejected; every form here is a handful of short fields.
const MAX_FORM_BYTES: u64 = 64 * 1024;

/// The parts of a request the handlers look at, read once up front.
#[derive(Debug, Default)]
pub struct ParsedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub form: HashMap<String, String>,
    pub session_token: Option<String>,
}

impl ParsedRequest {
    pub fn read(req: Request) -> Result<Self, ServerError> {
        let method = req.method().as_str().to_string();
        let path = req.uri().path().to_string();
        let query = req
            .uri()
            .query()
            .map(|q| parse_urlencoded(q.as_bytes()))
            .unwrap_or_default();
        let session_token = req
            .headers()
            .get("Cookie")
            .and_then(|v| v.to_str().ok())
            .and_then(|c| cookie_value(c, SESSION_COOKIE));

        let form = if method == "POST" {
            let mut body = req.into_body();
            let mut buf = Vec::new();
            body.reader()
                .take(MAX_FORM_BYTES + 1)
                .read_to_end(&mut buf)
                .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
            if buf.len() as u64 > MAX_FORM_BYTES {
                return Err(ServerError::BadRequest("form body too large".into()));
            }
            parse_urlencoded(&buf)
        } else {
            HashMap::new()
        };

        Ok(Self {
            method,
            path,
            query,
            form,
            session_token,
        })
    }

    /// Path split on `/` with empty pieces dropped, so `/farmers/` and
    /// `/farmers` route the same.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn form_field(&self, key: &str) -> &str {
        self.form.get(key).map(String::as_str).unwrap_or("")
    }
}

fn parse_urlencoded(bytes: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(bytes).into_owned().collect()
}

fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

/// `Set-Cookie` value for a fresh session.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
