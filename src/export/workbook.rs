use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::io::Cursor;

use crate::error::{LedgerError, Result};
use crate::sheet::{Cell, Sheet};

/// Encode sheets as an xlsx workbook: bold header row, no index column.
pub(crate) fn encode(sheets: &[Sheet]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (c, title) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, column(c)?, title, &header)?;
        }

        for (r, cells) in sheet.rows.iter().enumerate() {
            // Row 0 is the header.
            let row = r
                .checked_add(1)
                .and_then(|r| u32::try_from(r).ok())
                .ok_or(XlsxError::RowColumnLimitError)?;
            for (c, cell) in cells.iter().enumerate() {
                let col = column(c)?;
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    Cell::Number(d) => {
                        let value = d.to_f64().unwrap_or_default();
                        worksheet.write_number_with_format(row, col, value, &money)?;
                    }
                    Cell::Integer(n) => {
                        worksheet.write_number(row, col, f64::from(*n))?;
                    }
                    Cell::Empty => {}
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn column(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| LedgerError::Export(XlsxError::RowColumnLimitError))
}

/// Decode every worksheet of an xlsx workbook. The first row is the header.
pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_from_rs::<Xlsx<_>, _>(Cursor::new(bytes))
        .map_err(|e| LedgerError::Import(e.to_string()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| LedgerError::Import(format!("{name}: {e}")))?;

        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default();

        let mut sheet = Sheet::new(name, headers);
        sheet.rows = rows.map(|r| r.iter().map(to_cell).collect()).collect();
        sheets.push(sheet);
    }

    Ok(sheets)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(Decimal::from(*i)),
        Data::Float(f) => Decimal::from_f64(*f)
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(f.to_string())),
        other => Cell::Text(other.to_string()),
    }
}
