// src/router/reports.rs
use tracing::info;

use super::{App, Clock};
use crate::db::farmers as db_farmers;
use crate::domain::aggregate::{
    count_by_status, count_in_window, group_by_field, harvest_notifications, land_area_summary,
    recent_activity, upcoming_schedule, LocationField,
};
use crate::domain::harvest::{HarvestStatus, HarvestWindow};
use crate::domain::user::CurrentUser;
use crate::errors::ResultResp;
use crate::responses::html_response;
use crate::spreadsheets::export_farmers_xlsx;
use crate::templates::pages::{self, DashboardVm, ReportsVm};

pub fn dashboard(app: &App, user: &CurrentUser, clock: Clock) -> ResultResp {
    let records = app.db.with_conn(|conn| db_farmers::list_farmers(conn))?;
    let counts = count_by_status(&records, clock.today);

    let vm = DashboardVm {
        total_farmers: records.len(),
        land: land_area_summary(&records),
        upcoming: count_in_window(&records, clock.today, HarvestWindow::UPCOMING),
        overdue: counts.get(HarvestStatus::Overdue),
        activity: recent_activity(
            &records,
            clock.today,
            app.config.dashboard.recent_activity_limit,
        ),
        notifications: harvest_notifications(&records, clock.today),
    };
    html_response(pages::dashboard_page(user, &vm))
}

pub fn reports(app: &App, user: &CurrentUser, clock: Clock) -> ResultResp {
    let records = app.db.with_conn(|conn| db_farmers::list_farmers(conn))?;
    let schedule_days = app.config.dashboard.schedule_days;

    let vm = ReportsVm {
        total_farmers: records.len(),
        land: land_area_summary(&records),
        counts: count_by_status(&records, clock.today),
        upcoming: count_in_window(&records, clock.today, HarvestWindow::UPCOMING),
        harvestable: count_in_window(&records, clock.today, HarvestWindow::HARVESTABLE),
        by_town: group_by_field(&records, LocationField::Town),
        by_barangay: group_by_field(&records, LocationField::Barangay),
        by_group: group_by_field(&records, LocationField::LocationGroup),
        schedule: upcoming_schedule(&records, clock.today, schedule_days),
        schedule_days,
    };
    html_response(pages::reports_page(user, &vm))
}

pub fn export(app: &App, user: &CurrentUser, clock: Clock) -> ResultResp {
    let records = app.db.with_conn(|conn| db_farmers::list_farmers(conn))?;
    info!(rows = records.len(), by = %user.username, "farmer register exported");
    export_farmers_xlsx(&records, clock.today)
}
