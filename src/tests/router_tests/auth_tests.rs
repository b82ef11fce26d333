// src/tests/router_tests/auth_tests.rs
use crate::auth::sessions::load_user_from_session;
use crate::domain::user::Role;
use crate::tests::utils::{body_string, clock, get, init_test_app, location, post_form, signed_in};

#[test]
fn login_page_loads_successfully() {
    let app = init_test_app();

    let resp = get(&app, "/login", None).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("form"));
}

#[test]
fn protected_pages_redirect_to_login() {
    let app = init_test_app();

    for uri in ["/", "/farmers", "/reports", "/admin", "/profile"] {
        let resp = get(&app, uri, None).unwrap();
        assert_eq!(resp.status(), 302, "{uri}");
        assert_eq!(location(&resp), "/login", "{uri}");
    }

    let resp = get(&app, "/farmers", Some("not-a-real-token")).unwrap();
    assert_eq!(location(&resp), "/login");
}

#[test]
fn login_sets_session_cookie_and_redirects_home() {
    let app = init_test_app();
    signed_in(&app, "maria", Role::User);

    let resp = post_form(
        &app,
        "/login",
        None,
        &[("username", "maria"), ("password", "password1")],
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");

    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let token = cookie
        .trim_start_matches("session=")
        .split(';')
        .next()
        .unwrap()
        .to_string();
    let user = app
        .db
        .with_conn(|conn| load_user_from_session(conn, &token, clock().now))
        .unwrap()
        .expect("session should resolve");
    assert_eq!(user.username, "maria");
}

#[test]
fn bad_credentials_rerender_login_with_message() {
    let app = init_test_app();
    signed_in(&app, "maria", Role::User);

    let resp = post_form(
        &app,
        "/login",
        None,
        &[("username", "maria"), ("password", "wrong-one")],
    )
    .unwrap();
    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("Set-Cookie").is_none());
    assert!(body_string(resp).contains("Invalid credentials"));

    let resp = post_form(&app, "/login", None, &[("username", ""), ("password", "")]).unwrap();
    assert_eq!(resp.status(), 422);
    assert!(body_string(resp).contains("Please fill in all fields"));
}

#[test]
fn signup_validates_then_creates_regular_user() {
    let app = init_test_app();

    let resp = post_form(
        &app,
        "/signup",
        None,
        &[
            ("username", "ab"),
            ("password", "123"),
            ("confirm_password", "1234"),
        ],
    )
    .unwrap();
    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("Username must be at least 3 characters"));
    assert!(body.contains("Password must be at least 6 characters"));
    assert!(body.contains("Passwords do not match"));

    let resp = post_form(
        &app,
        "/signup",
        None,
        &[
            ("username", "new_farmer"),
            ("password", "secret12"),
            ("confirm_password", "secret12"),
        ],
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");

    let role: String = app
        .db
        .with_conn(|conn| {
            Ok(conn.query_row(
                "select role from users where username = 'new_farmer'",
                [],
                |r| r.get(0),
            )?)
        })
        .unwrap();
    assert_eq!(role, "user");
}

#[test]
fn logout_revokes_session() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "maria", Role::User);

    assert_eq!(get(&app, "/", Some(&token)).unwrap().status(), 200);

    let resp = post_form(&app, "/logout", Some(&token), &[]).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(cookie.contains("Max-Age=0"));

    let resp = get(&app, "/", Some(&token)).unwrap();
    assert_eq!(location(&resp), "/login");
}

#[test]
fn signed_in_user_skips_login_page() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "maria", Role::User);

    let resp = get(&app, "/login", Some(&token)).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
}

#[test]
fn profile_shows_account() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "maria", Role::User);

    let resp = get(&app, "/profile", Some(&token)).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("maria"));
    assert!(body.contains("Farmers registered"));
}
