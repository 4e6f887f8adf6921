// src/report/revisions.rs
use crate::utils::error::RevisionError;
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::Timelike;
use std::path::Path;

/// Column titles expected in the revision source, in display order.
pub const REVISION_COLUMNS: [&str; 5] = [
    "Rev.No",
    "Date",
    "Author",
    "Reviewed/Approved by",
    "Description",
];

/// One row of the document's review history, already coerced to display text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionRecord {
    pub revision: String,
    pub date: String,
    pub author: String,
    pub approver: String,
    pub description: String,
}

impl RevisionRecord {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.revision.clone(),
            self.date.clone(),
            self.author.clone(),
            self.approver.clone(),
            self.description.clone(),
        ]
    }
}

/// Loads revision records from a `.csv` file or any spreadsheet calamine can open
/// (first worksheet only).
pub fn load_revisions(path: &Path) -> Result<Vec<RevisionRecord>, RevisionError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let rows = if is_csv {
        read_csv_rows(path)?
    } else {
        read_sheet_rows(path)?
    };
    let records = records_from_rows(rows)?;

    tracing::info!(
        "Loaded {} revision records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, RevisionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }
    Ok(rows)
}

fn read_sheet_rows(path: &Path) -> Result<Vec<Vec<String>>, RevisionError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| RevisionError::Open(format!("{}: {}", path.display(), e)))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(RevisionError::NoWorksheet)?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| RevisionError::Open(format!("{} [{}]: {}", path.display(), sheet, e)))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR:{e:?}"),
        Data::DateTime(dt) => datetime_text(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Calendar dates print as `YYYY-MM-DD`, with the time appended only when it is
/// not midnight. Values chrono cannot place (durations, out of range) keep the raw serial.
fn datetime_text(dt: &ExcelDateTime) -> String {
    match dt.as_datetime() {
        Some(value) if value.num_seconds_from_midnight() == 0 => {
            value.format("%Y-%m-%d").to_string()
        }
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => dt.to_string(),
    }
}

/// First row is the header; columns are located by title so their order in the
/// source does not matter.
fn records_from_rows(rows: Vec<Vec<String>>) -> Result<Vec<RevisionRecord>, RevisionError> {
    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();

    let mut columns = [0usize; 5];
    for (slot, name) in columns.iter_mut().zip(REVISION_COLUMNS) {
        *slot = header
            .iter()
            .position(|title| title.trim() == name)
            .ok_or(RevisionError::MissingColumn(name))?;
    }

    let records = rows
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| {
            let cell = |idx: usize| row.get(columns[idx]).cloned().unwrap_or_default();
            RevisionRecord {
                revision: cell(0),
                date: cell(1),
                author: cell(2),
                approver: cell(3),
                description: cell(4),
            }
        })
        .collect();

    Ok(records)
}
