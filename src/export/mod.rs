mod csv_file;
mod workbook;

pub(crate) use csv_file::{file_name as csv_file_name, read_sheet, write_sheet};
pub(crate) use workbook::{decode, encode};

pub(crate) const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
