use crate::domain::farmer::FarmerRecord;
use crate::domain::harvest::{classify, DATE_FORMAT};
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};

const HEADERS: [&str; 11] = [
    "First Name",
    "Middle Initial",
    "Last Name",
    "Group",
    "Barangay",
    "Town",
    "Contact Number",
    "Land Area (ha)",
    "Planted",
    "Expected Harvest",
    "Harvest Status",
];

fn xlsx_err(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Farmer register as an .xlsx buffer, status computed against `reference`.
pub fn build_farmers_workbook(
    farmers: &[FarmerRecord],
    reference: NaiveDate,
) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx_err(header))?;
    }

    let date_text = |d: Option<NaiveDate>| {
        d.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    };

    for (i, farmer) in farmers.iter().enumerate() {
        let r = (i + 1) as u32;
        let status = classify(farmer.harvest_date, reference).status;

        worksheet
            .write_string(r, 0, &farmer.first_name)
            .map_err(xlsx_err("first name"))?;
        worksheet
            .write_string(r, 1, farmer.middle_initial.as_deref().unwrap_or(""))
            .map_err(xlsx_err("middle initial"))?;
        worksheet
            .write_string(r, 2, &farmer.last_name)
            .map_err(xlsx_err("last name"))?;
        worksheet
            .write_string(r, 3, &farmer.location_group)
            .map_err(xlsx_err("group"))?;
        worksheet
            .write_string(r, 4, &farmer.barangay)
            .map_err(xlsx_err("barangay"))?;
        worksheet
            .write_string(r, 5, &farmer.town)
            .map_err(xlsx_err("town"))?;
        worksheet
            .write_string(r, 6, &farmer.contact_number)
            .map_err(xlsx_err("contact number"))?;
        if let Some(area) = farmer.land_area {
            worksheet
                .write_number(r, 7, area)
                .map_err(xlsx_err("land area"))?;
        }
        worksheet
            .write_string(r, 8, &date_text(farmer.planted_date))
            .map_err(xlsx_err("planted date"))?;
        worksheet
            .write_string(r, 9, &date_text(farmer.harvest_date))
            .map_err(xlsx_err("harvest date"))?;
        worksheet
            .write_string(r, 10, status.label())
            .map_err(xlsx_err("status"))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_farmers_xlsx(farmers: &[FarmerRecord], reference: NaiveDate) -> ResultResp {
    let buffer = build_farmers_workbook(farmers, reference)?;
    xlsx_response(buffer, &format!("farmers_{}.xlsx", reference.format(DATE_FORMAT)))
}
