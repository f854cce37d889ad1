use thiserror::Error;

/// Rejections raised by ledger mutations and the workbook/CSV codecs.
///
/// None of these are fatal: the offending mutation is dropped and the ledger
/// keeps its previous state.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("{table} has a fixed row count of {expected}, got {actual}")]
    RowCountMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Sheet '{sheet}': {detail}")]
    Schema { sheet: String, detail: String },

    #[error("Sheet '{sheet}', row {row}, column '{column}': cannot read '{value}'")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Failed to encode workbook: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to read workbook: {0}")]
    Import(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LedgerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;
