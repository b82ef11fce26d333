pub mod card;
pub mod error;
pub mod harvest;

pub use card::{pill, stat_card};
pub use error::{error_page, errors_list};
pub use harvest::{
    farmer_card, harvest_calendar, location_breakdown, notifications_panel, recent_activity_list,
};
