use crate::error::{LedgerError, Result};

/// An ordered collection of records backing one editable table.
///
/// `allows_row_insert_delete` is the capability the table editor exposes:
/// a fixed table can have its cells edited but never gain or lose rows
/// through [`Table::replace`].
#[derive(Debug, Clone)]
pub(crate) struct Table<T> {
    name: &'static str,
    rows: Vec<T>,
    allows_row_insert_delete: bool,
}

impl<T> Table<T> {
    pub(crate) fn dynamic(name: &'static str) -> Self {
        Self {
            name,
            rows: Vec::new(),
            allows_row_insert_delete: true,
        }
    }

    pub(crate) fn fixed(name: &'static str, rows: Vec<T>) -> Self {
        Self {
            name,
            rows,
            allows_row_insert_delete: false,
        }
    }

    pub(crate) fn rows(&self) -> &[T] {
        &self.rows
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn allows_row_insert_delete(&self) -> bool {
        self.allows_row_insert_delete
    }

    pub(crate) fn push(&mut self, row: T) -> Result<()> {
        if !self.allows_row_insert_delete {
            return Err(LedgerError::RowCountMismatch {
                table: self.name,
                expected: self.rows.len(),
                actual: self.rows.len() + 1,
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Wholesale replace, as the table editor hands back the whole grid.
    pub(crate) fn replace(&mut self, rows: Vec<T>) -> Result<()> {
        if !self.allows_row_insert_delete && rows.len() != self.rows.len() {
            return Err(LedgerError::RowCountMismatch {
                table: self.name,
                expected: self.rows.len(),
                actual: rows.len(),
            });
        }
        self.rows = rows;
        Ok(())
    }

    /// Change the contents and, for a fixed table, its row count.
    pub(crate) fn reset(&mut self, rows: Vec<T>) {
        self.rows = rows;
    }
}
