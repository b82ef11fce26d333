pub mod admin;
pub mod dashboard;
pub mod farmer_form;
pub mod farmers;
pub mod login;
pub mod profile;
pub mod reports;
pub mod signup;
pub mod user_form;

pub use admin::admin_page;
pub use dashboard::{dashboard_page, DashboardVm};
pub use farmer_form::{farmer_form_page, FormTarget};
pub use farmers::farmers_page;
pub use login::login_page;
pub use profile::profile_page;
pub use reports::{reports_page, ReportsVm};
pub use signup::signup_page;
pub use user_form::user_form_page;
