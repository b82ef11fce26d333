// src/tests/router_tests/dashboard_tests.rs
use crate::domain::user::Role;
use crate::tests::utils::{body_string, get, init_test_app, post_form, signed_in};
use crate::router::App;

fn seed_farmers(app: &App, token: &str) {
    let rows: [[(&str, &str); 6]; 3] = [
        [
            ("first_name", "Juan"),
            ("last_name", "Cruz"),
            ("barangay", "San Roque"),
            ("town", "Tanay"),
            ("land_area", "2"),
            ("harvest_date", "2026-10-17"),
        ],
        [
            ("first_name", "Ana"),
            ("last_name", "Reyes"),
            ("barangay", "Pinugay"),
            ("town", "Baras"),
            ("land_area", "4"),
            ("harvest_date", "2026-10-21"),
        ],
        [
            ("first_name", "Leo"),
            ("last_name", "Santos"),
            ("barangay", "Sampaloc"),
            ("town", "Tanay"),
            ("land_area", ""),
            ("harvest_date", ""),
        ],
    ];
    for row in rows {
        let resp = post_form(app, "/farmers", Some(token), &row).unwrap();
        assert_eq!(resp.status(), 302);
    }
}

#[test]
fn dashboard_shows_totals_and_alerts() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "dash", Role::User);
    seed_farmers(&app, &token);

    let resp = get(&app, "/", Some(&token)).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    assert!(body.contains("Signed in as"));
    assert!(body.contains("dash"));
    // 6 ha over 3 farmers.
    assert!(body.contains("6.0 ha"));
    assert!(body.contains("2.0 ha"));
    assert!(body.contains("Harvest was due 2 days ago"));
    assert!(body.contains("Harvest due in 2 days"));
    assert!(body.contains("Notifications (2)"));
}

#[test]
fn empty_dashboard_renders_zeroes() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "dash", Role::User);

    let body = body_string(get(&app, "/", Some(&token)).unwrap());
    assert!(body.contains("0.0 ha"));
    assert!(body.contains("Nothing needs attention."));
}

#[test]
fn reports_group_by_location_and_list_calendar() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "dash", Role::User);
    seed_farmers(&app, &token);

    let resp = get(&app, "/reports", Some(&token)).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    assert!(body.contains("Farmers by town"));
    assert!(body.contains("Farmers by barangay"));
    // Tanay has two farmers and is the widest bar.
    assert!(body.contains("width: 100%"));
    assert!(body.contains("width: 50%"));
    assert!(body.contains("Harvest calendar (next 7 days)"));
    assert!(body.contains("Oct 21, 2026"));
    // Nobody has a group, so that breakdown is left out.
    assert!(!body.contains("Farmers by group"));
}

#[test]
fn export_downloads_xlsx() {
    let app = init_test_app();
    let (_, token) = signed_in(&app, "dash", Role::User);
    seed_farmers(&app, &token);

    let resp = get(&app, "/reports/export", Some(&token)).unwrap();
    assert_eq!(resp.status(), 200);
    let content_type = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert_eq!(
        content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}
