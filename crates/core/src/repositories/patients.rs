//! Patient table access.
//!
//! Plain functions over a borrowed [`Connection`]; the caller decides the
//! connection's lifetime. Rows come back with the symptom column still in its
//! stored text form.

use crate::{PatientError, PatientResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

const SELECT_COLUMNS: &str = "SELECT id, name, age, symptoms, created_at FROM patients";

/// A row of the `patients` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub symptoms_text: String,
    pub created_at: DateTime<Utc>,
}

struct PatientRow {
    id: i64,
    name: String,
    age: i64,
    symptoms: String,
    created_at: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        symptoms: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn record_from_row(row: PatientRow) -> PatientResult<PatientRecord> {
    let created_at = DateTime::parse_from_rfc3339(&row.created_at)
        .map_err(|source| PatientError::InvalidTimestamp {
            value: row.created_at.clone(),
            source,
        })?
        .with_timezone(&Utc);

    Ok(PatientRecord {
        id: row.id,
        name: row.name,
        age: row.age,
        symptoms_text: row.symptoms,
        created_at,
    })
}

/// Inserts a patient and returns the stored row, including `id` and `created_at`.
pub fn insert_patient(
    conn: &Connection,
    name: &str,
    age: i64,
    symptoms_text: &str,
) -> PatientResult<PatientRecord> {
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    let row = conn
        .query_row(
            "INSERT INTO patients (name, age, symptoms, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, name, age, symptoms, created_at",
            params![name, age, symptoms_text, created_at],
            read_row,
        )
        .map_err(PatientError::Insert)?;

    record_from_row(row)
}

/// Looks up a patient by id.
pub fn get_patient(conn: &Connection, id: i64) -> PatientResult<Option<PatientRecord>> {
    let row = conn
        .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], read_row)
        .optional()
        .map_err(PatientError::Query)?;

    row.map(record_from_row).transpose()
}

/// Lists patients, newest id first.
///
/// A non-empty `name_filter` keeps only names containing it, ignoring ASCII
/// case. Wildcard characters in the filter match literally.
pub fn list_patients(
    conn: &Connection,
    name_filter: Option<&str>,
) -> PatientResult<Vec<PatientRecord>> {
    match name_filter.filter(|n| !n.is_empty()) {
        Some(name) => query_records(
            conn,
            &format!("{SELECT_COLUMNS} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id DESC"),
            params![contains_pattern(name)],
        ),
        None => query_records(conn, &format!("{SELECT_COLUMNS} ORDER BY id DESC"), []),
    }
}

fn query_records<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> PatientResult<Vec<PatientRecord>> {
    let mut stmt = conn.prepare(sql).map_err(PatientError::Query)?;
    let rows = stmt
        .query_map(params, read_row)
        .map_err(PatientError::Query)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(PatientError::Query)?;

    rows.into_iter().map(record_from_row).collect()
}

/// Number of stored patients.
pub fn count_patients(conn: &Connection) -> PatientResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))
        .map_err(PatientError::Query)
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with `\` as escape.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
