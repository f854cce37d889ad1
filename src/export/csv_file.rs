use std::path::Path;

use crate::error::{LedgerError, Result};
use crate::sheet::{Cell, Sheet};

/// `Member Contributions` -> `member_contributions.csv`
pub(crate) fn file_name(sheet_name: &str) -> String {
    format!("{}.csv", sheet_name.to_lowercase().replace(' ', "_"))
}

pub(crate) fn write_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        wtr.write_record(row.iter().map(Cell::to_string))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a CSV file as a sheet. Every cell is text; parsing happens when the
/// sheet is turned into records.
pub(crate) fn read_sheet(path: &Path, sheet_name: &str) -> Result<Sheet> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)?;

    let mut records = rdr.records();
    let headers = match records.next() {
        Some(record) => record?.iter().map(|s| s.to_string()).collect(),
        None => {
            return Err(LedgerError::Schema {
                sheet: sheet_name.to_string(),
                detail: format!("{} is empty", path.display()),
            })
        }
    };

    let mut sheet = Sheet::new(sheet_name, headers);
    for record in records {
        let record = record?;
        sheet.rows.push(record.iter().map(Cell::text).collect());
    }
    Ok(sheet)
}
