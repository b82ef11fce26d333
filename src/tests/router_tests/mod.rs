mod admin_tests;
mod auth_tests;
mod dashboard_tests;
mod farmer_tests;
