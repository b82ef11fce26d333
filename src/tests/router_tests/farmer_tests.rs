// src/tests/router_tests/farmer_tests.rs
use crate::db::farmers::list_farmers;
use crate::domain::user::Role;
use crate::errors::ServerError;
use crate::tests::utils::{body_string, get, init_test_app, location, post_form, signed_in};

const JUAN: [(&str, &str); 9] = [
    ("first_name", "Juan"),
    ("middle_initial", "D"),
    ("last_name", "Cruz"),
    ("barangay", "San Roque"),
    ("town", "Tanay"),
    ("contact_number", "0917 123 4567"),
    ("land_area", "2.5"),
    ("planted_date", "2026-07-01"),
    ("harvest_date", "2026-10-17"),
];

#[test]
fn create_farmer_then_list_it() {
    let app = init_test_app();
    let (account, token) = signed_in(&app, "maria", Role::User);

    let resp = post_form(&app, "/farmers", Some(&token), &JUAN).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/farmers");

    let stored = app.db.with_conn(|conn| list_farmers(conn)).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user_id.as_deref(), Some(account.id.as_str()));

    let body = body_string(get(&app, "/farmers", Some(&token)).unwrap());
    assert!(body.contains("Juan D. Cruz"));
    // Harvest was two days ago relative to the test clock, so the card gets a badge.
    assert!(body.contains("class=\"pill\""));
}

#[test]
fn invalid_farmer_form_lists_every_problem() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "maria", Role::User);

    let resp = post_form(
        &app,
        "/farmers",
        Some(&token),
        &[
            ("first_name", ""),
            ("last_name", "Cruz"),
            ("barangay", "X"),
            ("town", "Y"),
            ("contact_number", "abc"),
        ],
    )
    .unwrap();

    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("First name is required"));
    assert!(body.contains("Invalid contact number format"));
    // Submitted values are kept in the form.
    assert!(body.contains("value=\"Cruz\""));

    assert!(app
        .db
        .with_conn(|conn| list_farmers(conn))
        .unwrap()
        .is_empty());
}

#[test]
fn edit_update_and_delete_farmer() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "maria", Role::User);
    post_form(&app, "/farmers", Some(&token), &JUAN).unwrap();
    let id = app.db.with_conn(|conn| list_farmers(conn)).unwrap()[0]
        .id
        .clone();

    let body = body_string(get(&app, &format!("/farmers/{id}/edit"), Some(&token)).unwrap());
    assert!(body.contains("Edit farmer"));
    assert!(body.contains("value=\"2026-10-17\""));

    let mut changed = JUAN.to_vec();
    changed[4] = ("town", "Baras");
    let resp = post_form(&app, &format!("/farmers/{id}"), Some(&token), &changed).unwrap();
    assert_eq!(location(&resp), "/farmers");
    let stored = app.db.with_conn(|conn| list_farmers(conn)).unwrap();
    assert_eq!(stored[0].town, "Baras");

    let resp = post_form(&app, &format!("/farmers/{id}/delete"), Some(&token), &[]).unwrap();
    assert_eq!(location(&resp), "/farmers");
    assert!(app
        .db
        .with_conn(|conn| list_farmers(conn))
        .unwrap()
        .is_empty());
}

#[test]
fn unknown_farmer_is_not_found() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "maria", Role::User);

    assert!(matches!(
        get(&app, "/farmers/nope/edit", Some(&token)),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        post_form(&app, "/farmers/nope/delete", Some(&token), &[]),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn search_and_filter_narrow_the_list() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "maria", Role::User);

    post_form(&app, "/farmers", Some(&token), &JUAN).unwrap();
    post_form(
        &app,
        "/farmers",
        Some(&token),
        &[
            ("first_name", "Ana"),
            ("last_name", "Reyes"),
            ("barangay", "Pinugay"),
            ("town", "Baras"),
            ("harvest_date", "2026-11-01"),
        ],
    )
    .unwrap();

    let body = body_string(get(&app, "/farmers?q=baras", Some(&token)).unwrap());
    assert!(body.contains("Ana Reyes"));
    assert!(!body.contains("Juan D. Cruz"));

    let body = body_string(get(&app, "/farmers?filter=overdue", Some(&token)).unwrap());
    assert!(body.contains("Juan D. Cruz"));
    assert!(!body.contains("Ana Reyes"));

    let body = body_string(get(&app, "/farmers?filter=upcoming", Some(&token)).unwrap());
    assert!(body.contains("Ana Reyes"));
    assert!(!body.contains("Juan D. Cruz"));
}
