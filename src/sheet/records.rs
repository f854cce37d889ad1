use super::{Cell, Record, RowReader};
use crate::error::Result;
use crate::models::{Expense, ExpenseCategory, Member, RevenueEntry};

impl Record for Expense {
    const SHEET: &'static str = "Expenses";
    const COLUMNS: &'static [&'static str] =
        &["Description", "Category", "Estimated", "Paid", "Status"];
    const DERIVED: &'static [&'static str] = &["Status"];

    fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.description.as_str()),
            Cell::text(self.category.as_str()),
            Cell::Number(self.estimated),
            Cell::Number(self.paid),
            Cell::text(self.status().as_str()),
        ]
    }

    fn from_row(row: &RowReader<'_>) -> Result<Self> {
        Ok(Expense::new(
            row.text("Description"),
            row.parse_with("Category", ExpenseCategory::parse)?,
            row.money("Estimated")?,
            row.money("Paid")?,
        ))
    }
}

impl Record for Member {
    const SHEET: &'static str = "Member Contributions";
    const COLUMNS: &'static [&'static str] = &["Name", "Paid"];
    const DERIVED: &'static [&'static str] = &[];

    fn to_cells(&self) -> Vec<Cell> {
        vec![Cell::text(self.name.as_str()), Cell::Number(self.paid)]
    }

    fn from_row(row: &RowReader<'_>) -> Result<Self> {
        Ok(Member::new(row.text("Name"), row.money("Paid")?))
    }
}

impl Record for RevenueEntry {
    const SHEET: &'static str = "Revenue";
    const COLUMNS: &'static [&'static str] =
        &["Source", "Quantity", "Unit Price", "Total Received"];
    const DERIVED: &'static [&'static str] = &["Total Received"];

    fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.source.as_str()),
            Cell::Integer(self.quantity),
            Cell::Number(self.unit_price),
            Cell::Number(self.total_received()),
        ]
    }

    fn from_row(row: &RowReader<'_>) -> Result<Self> {
        Ok(RevenueEntry::new(
            row.text("Source"),
            row.count("Quantity")?,
            row.money("Unit Price")?,
        ))
    }
}
