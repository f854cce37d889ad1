//! The session ledger: expenses, member contributions and ticket revenue,
//! plus everything derived from them.

mod table;

use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{LedgerError, Result};
use crate::export;
use crate::models::{
    per_member, Expense, ExpenseCategory, Member, MemberStanding, RevenueEntry, Summary,
    MAX_AMOUNT,
};
use crate::sheet::{Record, Sheet};

pub(crate) use table::Table;

/// Which of the three collections an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableKind {
    Expenses,
    Members,
    Revenue,
}

impl TableKind {
    pub(crate) fn all() -> &'static [TableKind] {
        &[Self::Expenses, Self::Members, Self::Revenue]
    }

    pub(crate) fn sheet_name(&self) -> &'static str {
        match self {
            Self::Expenses => Expense::SHEET,
            Self::Members => Member::SHEET,
            Self::Revenue => RevenueEntry::SHEET,
        }
    }

    /// Computed columns: shown and exported, never edited.
    pub(crate) fn derived_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Expenses => Expense::DERIVED,
            Self::Members => Member::DERIVED,
            Self::Revenue => RevenueEntry::DERIVED,
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expenses" | "expense" | "e" => Some(Self::Expenses),
            "members" | "member" | "contributions" | "m" => Some(Self::Members),
            "revenue" | "sales" | "tickets" | "r" => Some(Self::Revenue),
            _ => None,
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sheet_name())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    expenses: Table<Expense>,
    members: Table<Member>,
    revenue: Table<RevenueEntry>,
}

impl Ledger {
    /// Start a session with `member_count` placeholder members.
    pub(crate) fn new(member_count: usize) -> Self {
        let members = (1..=member_count).map(Member::placeholder).collect();
        Self {
            expenses: Table::dynamic(Expense::SHEET),
            members: Table::fixed(Member::SHEET, members),
            revenue: Table::dynamic(RevenueEntry::SHEET),
        }
    }

    pub(crate) fn expenses(&self) -> &[Expense] {
        self.expenses.rows()
    }

    pub(crate) fn members(&self) -> &[Member] {
        self.members.rows()
    }

    pub(crate) fn revenue(&self) -> &[RevenueEntry] {
        self.revenue.rows()
    }

    pub(crate) fn member_count(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn row_count(&self, kind: TableKind) -> usize {
        match kind {
            TableKind::Expenses => self.expenses.len(),
            TableKind::Members => self.members.len(),
            TableKind::Revenue => self.revenue.len(),
        }
    }

    pub(crate) fn allows_row_insert_delete(&self, kind: TableKind) -> bool {
        match kind {
            TableKind::Expenses => self.expenses.allows_row_insert_delete(),
            TableKind::Members => self.members.allows_row_insert_delete(),
            TableKind::Revenue => self.revenue.allows_row_insert_delete(),
        }
    }

    // ── Mutations ────────────────────────────────────────────

    pub(crate) fn add_expense(
        &mut self,
        description: String,
        category: ExpenseCategory,
        estimated: Decimal,
        paid: Decimal,
    ) -> Result<()> {
        new_amount("estimated amount", estimated)?;
        new_amount("paid amount", paid)?;
        let expense = Expense::new(description, category, estimated, paid);
        info!(
            description = %expense.description,
            category = %expense.category,
            %estimated,
            %paid,
            status = %expense.status(),
            "expense added"
        );
        self.expenses.push(expense)
    }

    pub(crate) fn add_revenue(
        &mut self,
        source: String,
        quantity: i64,
        unit_price: Decimal,
    ) -> Result<()> {
        if quantity < 1 {
            return Err(LedgerError::invalid("quantity", "must be at least 1"));
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| LedgerError::invalid("quantity", "too large"))?;
        new_amount("unit price", unit_price)?;
        let entry = RevenueEntry::new(source, quantity, unit_price);
        info!(
            source = %entry.source,
            quantity,
            %unit_price,
            total = %entry.total_received(),
            "sale recorded"
        );
        self.revenue.push(entry)
    }

    pub(crate) fn replace_expenses(&mut self, rows: Vec<Expense>) -> Result<()> {
        for e in &rows {
            within_ceiling("estimated amount", e.estimated)?;
            within_ceiling("paid amount", e.paid)?;
        }
        let count = rows.len();
        self.expenses.replace(rows).inspect_err(log_rejected)?;
        info!(rows = count, "expenses replaced");
        Ok(())
    }

    pub(crate) fn replace_members(&mut self, rows: Vec<Member>) -> Result<()> {
        for m in &rows {
            within_ceiling("paid amount", m.paid)?;
        }
        let count = rows.len();
        self.members.replace(rows).inspect_err(log_rejected)?;
        info!(rows = count, "member contributions replaced");
        Ok(())
    }

    pub(crate) fn replace_revenue(&mut self, rows: Vec<RevenueEntry>) -> Result<()> {
        for r in &rows {
            within_ceiling("unit price", r.unit_price)?;
        }
        let count = rows.len();
        self.revenue.replace(rows).inspect_err(log_rejected)?;
        info!(rows = count, "revenue replaced");
        Ok(())
    }

    /// Validate an edited grid and swap it in. On any error the ledger is
    /// left untouched.
    pub(crate) fn replace_sheet(&mut self, kind: TableKind, sheet: &Sheet) -> Result<()> {
        match kind {
            TableKind::Expenses => {
                let rows: Vec<Expense> = sheet.to_records().inspect_err(log_rejected)?;
                self.replace_expenses(rows)
            }
            TableKind::Members => {
                let rows: Vec<Member> = sheet.to_records().inspect_err(log_rejected)?;
                self.replace_members(rows)
            }
            TableKind::Revenue => {
                let rows: Vec<RevenueEntry> = sheet.to_records().inspect_err(log_rejected)?;
                self.replace_revenue(rows)
            }
        }
    }

    /// The "number of members" control: grow with placeholders or drop
    /// trailing members who have not contributed yet.
    pub(crate) fn resize_members(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Err(LedgerError::invalid("member count", "must be at least 1"));
        }
        let current = self.members.rows();
        if let Some(m) = current
            .iter()
            .skip(count)
            .find(|m| m.paid != Decimal::ZERO)
        {
            return Err(LedgerError::invalid(
                "member count",
                format!("{} already contributed and cannot be removed", m.name),
            ));
        }

        let mut rows: Vec<Member> = current.iter().take(count).cloned().collect();
        rows.extend((rows.len() + 1..=count).map(Member::placeholder));
        info!(from = current.len(), to = count, "member table resized");
        self.members.reset(rows);
        Ok(())
    }

    // ── Derived values ───────────────────────────────────────

    pub(crate) fn compute_summary(&self, member_count: usize) -> Summary {
        Summary::from_totals(
            member_count,
            self.expenses().iter().map(|e| e.estimated).sum(),
            self.expenses().iter().map(|e| e.paid).sum(),
            self.members().iter().map(|m| m.paid).sum(),
            self.revenue().iter().map(RevenueEntry::total_received).sum(),
        )
    }

    pub(crate) fn member_standings(&self, member_count: usize) -> Vec<MemberStanding> {
        let total: Decimal = self.expenses().iter().map(|e| e.estimated).sum();
        let quota = per_member(total, member_count);
        self.members()
            .iter()
            .map(|m| MemberStanding {
                name: m.name.clone(),
                paid: m.paid,
                outstanding: quota - m.paid,
            })
            .collect()
    }

    /// Estimated cost per category, in category order, empty ones omitted.
    pub(crate) fn spending_by_category(&self) -> Vec<(ExpenseCategory, Decimal)> {
        ExpenseCategory::all()
            .iter()
            .filter_map(|cat| {
                let mut items = self
                    .expenses()
                    .iter()
                    .filter(|e| e.category == *cat)
                    .peekable();
                items.peek()?;
                Some((*cat, items.map(|e| e.estimated).sum()))
            })
            .collect()
    }

    /// Tickets sold across every sale. Summed as `u64` since each entry
    /// may hold up to `u32::MAX`.
    pub(crate) fn tickets_sold(&self) -> u64 {
        self.revenue().iter().map(|r| u64::from(r.quantity)).sum()
    }

    // ── Sheets, workbook and CSV ─────────────────────────────

    pub(crate) fn sheet(&self, kind: TableKind) -> Sheet {
        match kind {
            TableKind::Expenses => Sheet::from_records(self.expenses()),
            TableKind::Members => Sheet::from_records(self.members()),
            TableKind::Revenue => Sheet::from_records(self.revenue()),
        }
    }

    pub(crate) fn export_workbook(&self) -> Result<Vec<u8>> {
        let sheets: Vec<Sheet> = TableKind::all().iter().map(|k| self.sheet(*k)).collect();
        let bytes = export::encode(&sheets).inspect_err(log_rejected)?;
        info!(bytes = bytes.len(), "workbook encoded");
        Ok(bytes)
    }

    /// Replace all three collections from a workbook. Either every sheet is
    /// accepted or nothing changes. The member table takes the workbook's
    /// row count.
    pub(crate) fn import_workbook(&mut self, bytes: &[u8]) -> Result<()> {
        let sheets = export::decode(bytes).inspect_err(log_rejected)?;
        let find = |kind: TableKind| {
            sheets
                .iter()
                .find(|s| s.name == kind.sheet_name())
                .ok_or_else(|| LedgerError::Schema {
                    sheet: kind.sheet_name().to_string(),
                    detail: "sheet not found in workbook".into(),
                })
        };

        let expenses: Vec<Expense> = find(TableKind::Expenses)?.to_records()?;
        let members: Vec<Member> = find(TableKind::Members)?.to_records()?;
        let revenue: Vec<RevenueEntry> = find(TableKind::Revenue)?.to_records()?;
        if members.is_empty() {
            return Err(LedgerError::invalid("member count", "workbook has no members"));
        }

        info!(
            expenses = expenses.len(),
            members = members.len(),
            revenue = revenue.len(),
            "workbook imported"
        );
        self.expenses.reset(expenses);
        self.members.reset(members);
        self.revenue.reset(revenue);
        Ok(())
    }

    /// Write one CSV file per collection into `dir`.
    pub(crate) fn export_csv(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::new();
        for kind in TableKind::all() {
            let path = dir.join(export::csv_file_name(kind.sheet_name()));
            export::write_sheet(&path, &self.sheet(*kind))?;
            written.push(path);
        }
        info!(dir = %dir.display(), "csv files written");
        Ok(written)
    }

    /// Replace one collection from a CSV file, with the same validation as a
    /// table edit. Returns the new row count.
    pub(crate) fn load_csv(&mut self, kind: TableKind, path: &Path) -> Result<usize> {
        let sheet = export::read_sheet(path, kind.sheet_name()).inspect_err(log_rejected)?;
        self.replace_sheet(kind, &sheet)?;
        Ok(self.row_count(kind))
    }
}

/// Amounts entered through `add_*`: non-negative and under the ceiling.
fn new_amount(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        warn!(field, %value, "negative amount rejected");
        return Err(LedgerError::invalid(field, "must not be negative"));
    }
    within_ceiling(field, value)
}

fn within_ceiling(field: &'static str, value: Decimal) -> Result<()> {
    if value.abs() > MAX_AMOUNT {
        warn!(field, %value, "amount over ceiling rejected");
        return Err(LedgerError::invalid(
            field,
            format!("must not exceed {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

fn log_rejected(err: &LedgerError) {
    warn!(error = %err, "ledger change rejected");
}

#[cfg(test)]
mod tests;
