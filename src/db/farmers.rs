// src/db/farmers.rs
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;
use uuid::Uuid;

use crate::domain::farmer::{FarmerData, FarmerRecord};
use crate::domain::harvest::{parse_calendar_date, DATE_FORMAT};
use crate::errors::ServerError;

const FARMER_COLUMNS: &str = r#"
    id, first_name, last_name, middle_initial, location_group, barangay, town,
    contact_number, land_area, planted_date, harvest_date, created_at, user_id
"#;

/// Stored dates are text. Anything that no longer parses is treated as unset
/// so one bad row cannot take down a whole dashboard.
fn stored_date(id: &str, column: &str, raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match parse_calendar_date(&raw) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!(farmer_id = id, column, error = %e, "ignoring unparsable stored date");
            None
        }
    }
}

fn map_farmer(row: &Row<'_>) -> rusqlite::Result<FarmerRecord> {
    let id: String = row.get(0)?;
    let planted_date = stored_date(&id, "planted_date", row.get(9)?);
    let harvest_date = stored_date(&id, "harvest_date", row.get(10)?);
    Ok(FarmerRecord {
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        middle_initial: row.get(3)?,
        location_group: row.get(4)?,
        barangay: row.get(5)?,
        town: row.get(6)?,
        contact_number: row.get(7)?,
        land_area: row.get(8)?,
        planted_date,
        harvest_date,
        created_at: row.get(11)?,
        user_id: row.get(12)?,
        id,
    })
}

fn date_text(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format(DATE_FORMAT).to_string())
}

/// Every farmer, newest first.
pub fn list_farmers(conn: &Connection) -> Result<Vec<FarmerRecord>, ServerError> {
    let sql = format!("select {FARMER_COLUMNS} from farmers order by created_at desc, rowid desc");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(format!("prepare list farmers failed: {e}")))?;

    let rows = stmt
        .query_map([], map_farmer)
        .map_err(|e| ServerError::DbError(format!("list farmers failed: {e}")))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(format!("read farmer row failed: {e}")))
}

pub fn get_farmer(conn: &Connection, id: &str) -> Result<Option<FarmerRecord>, ServerError> {
    let sql = format!("select {FARMER_COLUMNS} from farmers where id = ?");
    conn.query_row(&sql, params![id], map_farmer)
        .optional()
        .map_err(|e| ServerError::DbError(format!("select farmer failed: {e}")))
}

pub fn create_farmer(
    conn: &Connection,
    data: &FarmerData,
    user_id: &str,
    now: NaiveDateTime,
) -> Result<FarmerRecord, ServerError> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        r#"
        insert into farmers (
            id, first_name, last_name, middle_initial, location_group, barangay, town,
            contact_number, land_area, planted_date, harvest_date, created_at, user_id
        ) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            id,
            data.first_name,
            data.last_name,
            data.middle_initial,
            data.location_group,
            data.barangay,
            data.town,
            data.contact_number,
            data.land_area,
            date_text(data.planted_date),
            date_text(data.harvest_date),
            now,
            user_id,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert farmer failed: {e}")))?;

    get_farmer(conn, &id)?.ok_or(ServerError::InternalError)
}

/// Overwrites every editable column. Returns `NotFound` for an unknown id.
pub fn update_farmer(
    conn: &Connection,
    id: &str,
    data: &FarmerData,
) -> Result<FarmerRecord, ServerError> {
    let updated = conn
        .execute(
            r#"
            update farmers set
                first_name = ?, last_name = ?, middle_initial = ?, location_group = ?,
                barangay = ?, town = ?, contact_number = ?, land_area = ?,
                planted_date = ?, harvest_date = ?
            where id = ?
            "#,
            params![
                data.first_name,
                data.last_name,
                data.middle_initial,
                data.location_group,
                data.barangay,
                data.town,
                data.contact_number,
                data.land_area,
                date_text(data.planted_date),
                date_text(data.harvest_date),
                id,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update farmer failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    get_farmer(conn, id)?.ok_or(ServerError::NotFound)
}

pub fn delete_farmer(conn: &Connection, id: &str) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from farmers where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete farmer failed: {e}")))?;
    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("../../sql/schema.sql"))
            .unwrap();
        conn.execute(
            "insert into users (id, username, password_hash, role, created_at) values ('u1', 'clerk', 'x', 'user', '2024-01-01 00:00:00')",
            [],
        )
        .unwrap();
        conn
    }

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn data(first: &str) -> FarmerData {
        FarmerData {
            first_name: first.to_string(),
            last_name: "Santos".into(),
            middle_initial: Some("R".into()),
            location_group: "North".into(),
            barangay: "Sampaloc".into(),
            town: "Tanay".into(),
            contact_number: "0917 000 0000".into(),
            land_area: Some(2.5),
            planted_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            harvest_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        }
    }

    #[test]
    fn create_then_list_newest_first() {
        let conn = conn();
        create_farmer(&conn, &data("Ana"), "u1", at(8)).unwrap();
        let second = create_farmer(&conn, &data("Ben"), "u1", at(9)).unwrap();

        assert_eq!(second.first_name, "Ben");
        assert_eq!(second.harvest_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(second.user_id.as_deref(), Some("u1"));

        let all = list_farmers(&conn).unwrap();
        let names: Vec<&str> = all.iter().map(|f| f.first_name.as_str()).collect();
        assert_eq!(names, vec!["Ben", "Ana"]);
    }

    #[test]
    fn update_replaces_fields_and_clears_dates() {
        let conn = conn();
        let f = create_farmer(&conn, &data("Ana"), "u1", at(8)).unwrap();

        let mut changed = data("Anna");
        changed.harvest_date = None;
        changed.land_area = None;
        let updated = update_farmer(&conn, &f.id, &changed).unwrap();

        assert_eq!(updated.first_name, "Anna");
        assert_eq!(updated.harvest_date, None);
        assert_eq!(updated.land_area, None);
        assert_eq!(updated.created_at, f.created_at);
    }

    #[test]
    fn update_and_delete_unknown_id_are_not_found() {
        let conn = conn();
        assert!(matches!(
            update_farmer(&conn, "missing", &data("X")),
            Err(ServerError::NotFound)
        ));
        assert!(matches!(
            delete_farmer(&conn, "missing"),
            Err(ServerError::NotFound)
        ));
    }

    #[test]
    fn delete_removes_row() {
        let conn = conn();
        let f = create_farmer(&conn, &data("Ana"), "u1", at(8)).unwrap();
        delete_farmer(&conn, &f.id).unwrap();
        assert!(get_farmer(&conn, &f.id).unwrap().is_none());
    }

    #[test]
    fn garbage_stored_date_reads_as_unset() {
        let conn = conn();
        let f = create_farmer(&conn, &data("Ana"), "u1", at(8)).unwrap();
        conn.execute(
            "update farmers set harvest_date = 'soon' where id = ?",
            params![f.id],
        )
        .unwrap();

        let reread = get_farmer(&conn, &f.id).unwrap().unwrap();
        assert_eq!(reread.harvest_date, None);
        assert!(reread.planted_date.is_some());
    }
}
