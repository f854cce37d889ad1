//! Tabular interchange form shared by the table editor, CSV files and the
//! workbook codec. Every wholesale replace of a ledger collection goes
//! through [`Sheet::to_records`], which checks the header row and parses each
//! cell before anything is swapped in.

mod records;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{LedgerError, Result};
use crate::models::MAX_AMOUNT;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Text(String),
    Number(Decimal),
    Integer(u32),
    Empty,
}

impl Cell {
    pub(crate) fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(d) => write!(f, "{}", d.normalize()),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Empty => Ok(()),
        }
    }
}

/// A record type that maps onto one named sheet.
pub(crate) trait Record: Sized {
    const SHEET: &'static str;
    /// Every column written out, in order.
    const COLUMNS: &'static [&'static str];
    /// Columns computed from the others; accepted on input and ignored.
    const DERIVED: &'static [&'static str];

    fn to_cells(&self) -> Vec<Cell>;
    fn from_row(row: &RowReader<'_>) -> Result<Self>;
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sheet {
    pub(crate) name: String,
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub(crate) fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub(crate) fn from_records<R: Record>(records: &[R]) -> Self {
        let mut sheet = Self::new(
            R::SHEET,
            R::COLUMNS.iter().map(|c| c.to_string()).collect(),
        );
        sheet.rows = records.iter().map(Record::to_cells).collect();
        sheet
    }

    /// Validate the header row and parse every non-blank row.
    pub(crate) fn to_records<R: Record>(&self) -> Result<Vec<R>> {
        let columns = ColumnMap::resolve::<R>(self)?;
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| !cells.iter().all(Cell::is_empty))
            .map(|(i, cells)| {
                R::from_row(&RowReader {
                    sheet: &self.name,
                    // Spreadsheet numbering: header is row 1.
                    row_number: i + 2,
                    columns: &columns,
                    cells,
                })
            })
            .collect()
    }

    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Overwrite one cell, padding short rows.
    pub(crate) fn set_cell(&mut self, row: usize, col: usize, value: Cell) -> bool {
        let Some(cells) = self.rows.get_mut(row) else {
            return false;
        };
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = value;
        true
    }
}

/// Positions of the required columns of a record type within a sheet.
pub(crate) struct ColumnMap {
    names: Vec<&'static str>,
    positions: Vec<usize>,
}

impl ColumnMap {
    fn resolve<R: Record>(sheet: &Sheet) -> Result<Self> {
        let schema_error = |detail: String| LedgerError::Schema {
            sheet: sheet.name.clone(),
            detail,
        };

        for (i, header) in sheet.headers.iter().enumerate() {
            let header = header.trim();
            if header.is_empty() {
                continue;
            }
            if !R::COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(header)) {
                return Err(schema_error(format!("unexpected column '{header}'")));
            }
            if sheet.headers[..i]
                .iter()
                .any(|h| h.trim().eq_ignore_ascii_case(header))
            {
                return Err(schema_error(format!("duplicate column '{header}'")));
            }
        }

        let names: Vec<&'static str> = R::COLUMNS
            .iter()
            .filter(|c| !R::DERIVED.contains(c))
            .copied()
            .collect();
        let mut positions = Vec::with_capacity(names.len());
        for name in &names {
            match sheet.column_index(name) {
                Some(idx) => positions.push(idx),
                None => return Err(schema_error(format!("missing column '{name}'"))),
            }
        }

        Ok(Self { names, positions })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|i| self.positions[i])
    }
}

static EMPTY: Cell = Cell::Empty;

/// Typed access to one data row of a sheet.
pub(crate) struct RowReader<'a> {
    sheet: &'a str,
    row_number: usize,
    columns: &'a ColumnMap,
    cells: &'a [Cell],
}

impl RowReader<'_> {
    fn cell(&self, column: &str) -> &Cell {
        self.columns
            .position(column)
            .and_then(|idx| self.cells.get(idx))
            .unwrap_or(&EMPTY)
    }

    fn invalid(&self, column: &str, cell: &Cell) -> LedgerError {
        LedgerError::InvalidCell {
            sheet: self.sheet.to_string(),
            row: self.row_number,
            column: column.to_string(),
            value: cell.to_string(),
        }
    }

    pub(crate) fn text(&self, column: &str) -> String {
        self.cell(column).to_string().trim().to_string()
    }

    /// A decimal amount no larger in magnitude than [`MAX_AMOUNT`].
    pub(crate) fn money(&self, column: &str) -> Result<Decimal> {
        let cell = self.cell(column);
        let value = match cell {
            Cell::Number(d) => *d,
            Cell::Integer(n) => Decimal::from(*n),
            Cell::Text(s) => {
                Decimal::from_str(s.trim()).map_err(|_| self.invalid(column, cell))?
            }
            Cell::Empty => return Err(self.invalid(column, cell)),
        };
        if value.abs() > MAX_AMOUNT {
            return Err(self.invalid(column, cell));
        }
        Ok(value)
    }

    pub(crate) fn count(&self, column: &str) -> Result<u32> {
        let cell = self.cell(column);
        match cell {
            Cell::Integer(n) => Ok(*n),
            Cell::Number(d) if d.fract().is_zero() => {
                d.to_u32().ok_or_else(|| self.invalid(column, cell))
            }
            Cell::Text(s) => s.trim().parse().map_err(|_| self.invalid(column, cell)),
            _ => Err(self.invalid(column, cell)),
        }
    }

    pub(crate) fn parse_with<T>(&self, column: &str, parse: fn(&str) -> Option<T>) -> Result<T> {
        let cell = self.cell(column);
        parse(&cell.to_string()).ok_or_else(|| self.invalid(column, cell))
    }
}
