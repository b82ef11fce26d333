// src/tests/router_tests/admin_tests.rs
use crate::db::users::{get_user, list_users};
use crate::domain::user::Role;
use crate::errors::ServerError;
use crate::tests::utils::{body_string, get, init_test_app, location, post_form, signed_in};

#[test]
fn admin_page_loads_for_admin() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "boss", Role::Admin);
    signed_in(&app, "worker", Role::User);

    let resp = get(&app, "/admin", Some(&token)).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("User management"));
    assert!(body.contains("worker"));
    assert!(body.contains("Regular users"));
}

#[test]
fn regular_user_is_forbidden_from_admin() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "worker", Role::User);

    for uri in ["/admin", "/admin/users/new"] {
        assert!(matches!(
            get(&app, uri, Some(&token)),
            Err(ServerError::Forbidden(_))
        ));
    }
    assert!(matches!(
        post_form(
            &app,
            "/admin/users",
            Some(&token),
            &[("username", "sneaky"), ("password", "secret12"), ("role", "admin")]
        ),
        Err(ServerError::Forbidden(_))
    ));

    // The nav does not offer the admin link either.
    let body = body_string(get(&app, "/", Some(&token)).unwrap());
    assert!(!body.contains("href=\"/admin\""));
}

#[test]
fn admin_creates_and_edits_user() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "boss", Role::Admin);

    let resp = post_form(
        &app,
        "/admin/users",
        Some(&token),
        &[("username", "ab"), ("password", "123"), ("role", "user")],
    )
    .unwrap();
    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("Username must be at least 3 characters"));
    assert!(body.contains("Password must be at least 6 characters"));

    let resp = post_form(
        &app,
        "/admin/users",
        Some(&token),
        &[("username", "clerk"), ("password", "secret12"), ("role", "user")],
    )
    .unwrap();
    assert_eq!(location(&resp), "/admin");

    let clerk = app
        .db
        .with_conn(|conn| list_users(conn))
        .unwrap()
        .into_iter()
        .find(|u| u.username == "clerk")
        .expect("clerk created");
    assert_eq!(clerk.role, Role::User);

    let resp = post_form(
        &app,
        &format!("/admin/users/{}", clerk.id),
        Some(&token),
        &[("username", "clerk"), ("password", ""), ("role", "admin")],
    )
    .unwrap();
    assert_eq!(location(&resp), "/admin");
    let clerk = app
        .db
        .with_conn(|conn| get_user(conn, &clerk.id))
        .unwrap()
        .unwrap();
    assert_eq!(clerk.role, Role::Admin);
}

#[test]
fn duplicate_username_is_rejected() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "boss", Role::Admin);
    signed_in(&app, "worker", Role::User);

    let resp = post_form(
        &app,
        "/admin/users",
        Some(&token),
        &[("username", "worker"), ("password", "secret12"), ("role", "user")],
    )
    .unwrap();
    assert_eq!(resp.status(), 422);
    assert!(body_string(resp).contains("Username is already taken"));
}

#[test]
fn admin_cannot_delete_self_but_can_delete_others() {
    let app = init_test_app();
    let (boss, token) = signed_in(&app, "boss", Role::Admin);
    let (worker, worker_token) = signed_in(&app, "worker", Role::User);

    assert!(matches!(
        post_form(&app, &format!("/admin/users/{}/delete", boss.id), Some(&token), &[]),
        Err(ServerError::BadRequest(_))
    ));

    let resp = post_form(
        &app,
        &format!("/admin/users/{}/delete", worker.id),
        Some(&token),
        &[],
    )
    .unwrap();
    assert_eq!(location(&resp), "/admin");

    // The deleted user's session died with the account.
    let resp = get(&app, "/", Some(&worker_token)).unwrap();
    assert_eq!(location(&resp), "/login");
}
