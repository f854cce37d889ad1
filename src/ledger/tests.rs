#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Outcome, PaymentStatus};
use crate::sheet::Cell;

fn ledger_with_expense(estimated: Decimal, paid: Decimal) -> Ledger {
    let mut ledger = Ledger::new(8);
    ledger
        .add_expense("Hall".into(), ExpenseCategory::Venue, estimated, paid)
        .unwrap();
    ledger
}

// ── Construction ──────────────────────────────────────────────

#[test]
fn test_new_seeds_placeholder_members() {
    let ledger = Ledger::new(8);
    assert_eq!(ledger.member_count(), 8);
    assert_eq!(ledger.members()[0].name, "Member 1");
    assert_eq!(ledger.members()[7].name, "Member 8");
    assert!(ledger.expenses().is_empty());
    assert!(ledger.revenue().is_empty());
}

#[test]
fn test_table_capabilities() {
    let ledger = Ledger::new(3);
    assert!(ledger.allows_row_insert_delete(TableKind::Expenses));
    assert!(!ledger.allows_row_insert_delete(TableKind::Members));
    assert!(ledger.allows_row_insert_delete(TableKind::Revenue));
}

// ── add_expense / add_revenue ─────────────────────────────────

#[test]
fn test_add_expense_derives_status() {
    let mut ledger = Ledger::new(8);
    ledger
        .add_expense("DJ".into(), ExpenseCategory::Attractions, dec!(800), dec!(200))
        .unwrap();
    assert_eq!(ledger.expenses().len(), 1);
    assert_eq!(ledger.expenses()[0].status(), PaymentStatus::Partial);
}

#[test]
fn test_add_expense_rejects_negative() {
    let mut ledger = Ledger::new(8);
    let err = ledger
        .add_expense("DJ".into(), ExpenseCategory::Attractions, dec!(-1), Decimal::ZERO)
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput { .. }));
    let err = ledger
        .add_expense("DJ".into(), ExpenseCategory::Attractions, dec!(10), dec!(-1))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput { .. }));
    assert!(ledger.expenses().is_empty());
}

#[test]
fn test_add_revenue_computes_total() {
    let mut ledger = Ledger::new(8);
    ledger.add_revenue("Batch 1".into(), 100, dec!(20)).unwrap();
    assert_eq!(ledger.revenue()[0].total_received(), dec!(2000));
}

#[test]
fn test_add_revenue_rejects_bad_quantity_and_price() {
    let mut ledger = Ledger::new(8);
    assert!(ledger.add_revenue("x".into(), 0, dec!(10)).is_err());
    assert!(ledger.add_revenue("x".into(), -4, dec!(10)).is_err());
    assert!(ledger.add_revenue("x".into(), i64::MAX, dec!(10)).is_err());
    assert!(ledger.add_revenue("x".into(), 1, dec!(-0.01)).is_err());
    assert!(ledger.revenue().is_empty());
}

#[test]
fn test_free_entry_is_allowed() {
    let mut ledger = Ledger::new(8);
    ledger.add_revenue("Guest list".into(), 20, Decimal::ZERO).unwrap();
    assert_eq!(ledger.compute_summary(8).total_revenue, Decimal::ZERO);
}

#[test]
fn test_add_rejects_amounts_over_ceiling() {
    let mut ledger = Ledger::new(8);
    let err = ledger
        .add_expense("Castle".into(), ExpenseCategory::Venue, Decimal::MAX, Decimal::ZERO)
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput { .. }));
    let err = ledger
        .add_revenue("x".into(), 4_000_000_000, dec!(79228162514264337593543950))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput { .. }));
    assert!(ledger.expenses().is_empty());
    assert!(ledger.revenue().is_empty());
}

#[test]
fn test_summary_at_ceiling_does_not_overflow() {
    let mut ledger = Ledger::new(8);
    for _ in 0..2 {
        ledger
            .add_expense("Castle".into(), ExpenseCategory::Venue, MAX_AMOUNT, MAX_AMOUNT)
            .unwrap();
        ledger
            .add_revenue("VIP".into(), i64::from(u32::MAX), MAX_AMOUNT)
            .unwrap();
    }

    let s = ledger.compute_summary(8);
    assert_eq!(s.total_expenses_estimated, MAX_AMOUNT * dec!(2));
    assert_eq!(
        s.total_revenue,
        Decimal::from(u32::MAX) * MAX_AMOUNT * dec!(2)
    );
}

#[test]
fn test_tickets_sold_counts_past_u32() {
    let mut ledger = Ledger::new(8);
    ledger.add_revenue("Batch 1".into(), i64::from(u32::MAX), dec!(1)).unwrap();
    ledger.add_revenue("Batch 2".into(), i64::from(u32::MAX), dec!(1)).unwrap();
    assert_eq!(ledger.tickets_sold(), 2 * u64::from(u32::MAX));
}

// ── Summary ───────────────────────────────────────────────────

#[test]
fn test_summary_scenario_unpaid_members() {
    let ledger = ledger_with_expense(dec!(1000), dec!(1000));
    let s = ledger.compute_summary(8);
    assert_eq!(s.total_expenses_estimated, dec!(1000));
    assert_eq!(s.quota_per_member, dec!(125.00));
    assert_eq!(s.cash_on_hand, dec!(-1000));
    assert_eq!(s.profit_or_loss, dec!(-1000));
}

#[test]
fn test_summary_scenario_profit() {
    let mut ledger = ledger_with_expense(dec!(1500), Decimal::ZERO);
    ledger.add_revenue("Batch 1".into(), 100, dec!(20)).unwrap();
    let s = ledger.compute_summary(8);
    assert_eq!(s.total_revenue, dec!(2000));
    assert_eq!(s.profit_or_loss, dec!(500));
    assert_eq!(
        s.outcome(),
        Outcome::Profit {
            share_per_member: dec!(62.50)
        }
    );
}

#[test]
fn test_summary_zero_members() {
    let ledger = ledger_with_expense(dec!(1000), Decimal::ZERO);
    let s = ledger.compute_summary(0);
    assert_eq!(s.quota_per_member, Decimal::ZERO);
}

#[test]
fn test_summary_empty_ledger() {
    let ledger = Ledger::new(8);
    let s = ledger.compute_summary(8);
    assert_eq!(s.cash_on_hand, Decimal::ZERO);
    assert_eq!(s.profit_or_loss, Decimal::ZERO);
    assert_eq!(s.quota_per_member, Decimal::ZERO);
}

#[test]
fn test_cash_on_hand_identity() {
    let mut ledger = ledger_with_expense(dec!(900), dec!(300));
    ledger.add_revenue("Door".into(), 7, dec!(15)).unwrap();
    let mut members = ledger.members().to_vec();
    members[0].paid = dec!(120);
    members[3].paid = dec!(80.50);
    ledger.replace_members(members).unwrap();

    let s = ledger.compute_summary(8);
    assert_eq!(s.total_member_contributions, dec!(200.50));
    assert_eq!(
        s.cash_on_hand,
        s.total_member_contributions + s.total_revenue - s.total_expenses_paid
    );
    assert_eq!(s.cash_on_hand, dec!(5.50));
}

#[test]
fn test_summary_is_pure() {
    let mut ledger = ledger_with_expense(dec!(700), dec!(100));
    ledger.add_revenue("Batch 1".into(), 10, dec!(30)).unwrap();
    let first = ledger.compute_summary(8);
    let second = ledger.compute_summary(8);
    assert_eq!(first, second);
    assert_eq!(ledger.expenses().len(), 1);
}

#[test]
fn test_member_standings() {
    let mut ledger = Ledger::new(4);
    ledger
        .add_expense("Bar".into(), ExpenseCategory::Bar, dec!(400), Decimal::ZERO)
        .unwrap();
    let mut members = ledger.members().to_vec();
    members[0].paid = dec!(100);
    members[1].paid = dec!(40);
    ledger.replace_members(members).unwrap();

    let standings = ledger.member_standings(4);
    assert_eq!(standings.len(), 4);
    assert!(standings[0].is_settled());
    assert_eq!(standings[1].outstanding, dec!(60));
    assert!(!standings[2].is_settled());
}

#[test]
fn test_spending_by_category() {
    let mut ledger = Ledger::new(8);
    ledger
        .add_expense("Flyers".into(), ExpenseCategory::Marketing, dec!(50), Decimal::ZERO)
        .unwrap();
    ledger
        .add_expense("Hall".into(), ExpenseCategory::Venue, dec!(1000), Decimal::ZERO)
        .unwrap();
    ledger
        .add_expense("Ads".into(), ExpenseCategory::Marketing, dec!(70), Decimal::ZERO)
        .unwrap();

    let breakdown = ledger.spending_by_category();
    assert_eq!(
        breakdown,
        vec![
            (ExpenseCategory::Venue, dec!(1000)),
            (ExpenseCategory::Marketing, dec!(120)),
        ]
    );
}

// ── Wholesale replace ─────────────────────────────────────────

#[test]
fn test_replace_expenses_allows_row_changes() {
    let mut ledger = ledger_with_expense(dec!(100), Decimal::ZERO);
    ledger.replace_expenses(Vec::new()).unwrap();
    assert!(ledger.expenses().is_empty());
}

#[test]
fn test_replace_members_keeps_row_count() {
    let mut ledger = Ledger::new(8);
    let mut members = ledger.members().to_vec();
    members.pop();
    let err = ledger.replace_members(members).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::RowCountMismatch {
            expected: 8,
            actual: 7,
            ..
        }
    ));
    assert_eq!(ledger.member_count(), 8);
}

#[test]
fn test_replace_sheet_edit_updates_status() {
    let mut ledger = ledger_with_expense(dec!(500), Decimal::ZERO);
    let mut sheet = ledger.sheet(TableKind::Expenses);
    let paid = sheet.column_index("Paid").unwrap();
    sheet.set_cell(0, paid, Cell::text("500"));
    ledger.replace_sheet(TableKind::Expenses, &sheet).unwrap();
    assert_eq!(ledger.expenses()[0].status(), PaymentStatus::Paid);
}

#[test]
fn test_replace_sheet_revenue_total_follows_edit() {
    let mut ledger = Ledger::new(8);
    ledger.add_revenue("Batch 1".into(), 10, dec!(20)).unwrap();
    let mut sheet = ledger.sheet(TableKind::Revenue);
    let qty = sheet.column_index("Quantity").unwrap();
    sheet.set_cell(0, qty, Cell::text("15"));
    ledger.replace_sheet(TableKind::Revenue, &sheet).unwrap();
    assert_eq!(ledger.compute_summary(8).total_revenue, dec!(300));
}

#[test]
fn test_replace_sheet_failure_keeps_state() {
    let mut ledger = ledger_with_expense(dec!(500), dec!(100));
    let before = ledger.expenses().to_vec();

    let mut sheet = ledger.sheet(TableKind::Expenses);
    sheet.set_cell(0, 2, Cell::text("lots"));
    assert!(ledger.replace_sheet(TableKind::Expenses, &sheet).is_err());

    let mut sheet = ledger.sheet(TableKind::Expenses);
    sheet.headers.remove(1);
    for row in &mut sheet.rows {
        row.remove(1);
    }
    assert!(matches!(
        ledger.replace_sheet(TableKind::Expenses, &sheet).unwrap_err(),
        LedgerError::Schema { .. }
    ));

    assert_eq!(ledger.expenses(), before.as_slice());
}

#[test]
fn test_replace_rejects_amount_over_ceiling() {
    let mut ledger = ledger_with_expense(dec!(500), dec!(100));
    let before = ledger.expenses().to_vec();

    let mut sheet = ledger.sheet(TableKind::Expenses);
    let estimated = sheet.column_index("Estimated").unwrap();
    sheet.set_cell(0, estimated, Cell::text("79228162514264337593543950"));
    assert!(matches!(
        ledger.replace_sheet(TableKind::Expenses, &sheet).unwrap_err(),
        LedgerError::InvalidCell { .. }
    ));
    assert_eq!(ledger.expenses(), before.as_slice());

    let mut members = ledger.members().to_vec();
    members[0].paid = Decimal::MAX;
    assert!(matches!(
        ledger.replace_members(members).unwrap_err(),
        LedgerError::InvalidInput { .. }
    ));
    assert_eq!(ledger.members()[0].paid, Decimal::ZERO);
}

#[test]
fn test_replace_sheet_member_row_removed() {
    let mut ledger = Ledger::new(3);
    let mut sheet = ledger.sheet(TableKind::Members);
    sheet.rows.remove(0);
    assert!(matches!(
        ledger.replace_sheet(TableKind::Members, &sheet).unwrap_err(),
        LedgerError::RowCountMismatch { .. }
    ));
}

// ── resize_members ────────────────────────────────────────────

#[test]
fn test_resize_members_grow_and_shrink() {
    let mut ledger = Ledger::new(2);
    ledger.resize_members(4).unwrap();
    assert_eq!(ledger.member_count(), 4);
    assert_eq!(ledger.members()[3].name, "Member 4");

    ledger.resize_members(1).unwrap();
    assert_eq!(ledger.member_count(), 1);
    assert_eq!(ledger.members()[0].name, "Member 1");
}

#[test]
fn test_resize_members_keeps_existing_rows() {
    let mut ledger = Ledger::new(2);
    let mut members = ledger.members().to_vec();
    members[0] = Member::new("Ana".into(), dec!(50));
    ledger.replace_members(members).unwrap();
    ledger.resize_members(3).unwrap();
    assert_eq!(ledger.members()[0].name, "Ana");
    assert_eq!(ledger.members()[2].name, "Member 3");
}

#[test]
fn test_resize_members_guards() {
    let mut ledger = Ledger::new(3);
    assert!(ledger.resize_members(0).is_err());

    let mut members = ledger.members().to_vec();
    members[2].paid = dec!(10);
    ledger.replace_members(members).unwrap();
    assert!(ledger.resize_members(2).is_err());
    assert_eq!(ledger.member_count(), 3);
}

// ── Workbook ──────────────────────────────────────────────────

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new(3);
    ledger
        .add_expense("DJ Pacato".into(), ExpenseCategory::Attractions, dec!(800), dec!(200))
        .unwrap();
    ledger
        .add_expense("Wristbands".into(), ExpenseCategory::Credentialing, dec!(150.75), Decimal::ZERO)
        .unwrap();
    ledger.add_revenue("Batch 1".into(), 100, dec!(20)).unwrap();
    let mut members = ledger.members().to_vec();
    members[1] = Member::new("Bia".into(), dec!(62.5));
    ledger.replace_members(members).unwrap();
    ledger
}

#[test]
fn test_workbook_round_trip() {
    let ledger = sample_ledger();
    let bytes = ledger.export_workbook().unwrap();

    let mut restored = Ledger::new(8);
    restored.import_workbook(&bytes).unwrap();
    assert_eq!(restored.expenses(), ledger.expenses());
    assert_eq!(restored.members(), ledger.members());
    assert_eq!(restored.revenue(), ledger.revenue());
    assert_eq!(restored.member_count(), 3);
}

#[test]
fn test_workbook_has_three_sheets_with_headers() {
    let bytes = sample_ledger().export_workbook().unwrap();
    let sheets = crate::export::decode(&bytes).unwrap();
    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Expenses", "Member Contributions", "Revenue"]);
    assert_eq!(sheets[1].headers, vec!["Name", "Paid"]);
    assert_eq!(
        sheets[2].headers,
        vec!["Source", "Quantity", "Unit Price", "Total Received"]
    );
    assert_eq!(sheets[0].rows.len(), 2);
}

#[test]
fn test_import_workbook_is_atomic() {
    let source = sample_ledger();
    let mut sheets: Vec<Sheet> = TableKind::all().iter().map(|k| source.sheet(*k)).collect();
    // Corrupt the last sheet only.
    sheets[2].rows[0][1] = Cell::text("many");
    let bytes = crate::export::encode(&sheets).unwrap();

    let mut ledger = Ledger::new(8);
    ledger
        .add_expense("Keep me".into(), ExpenseCategory::Other, dec!(1), Decimal::ZERO)
        .unwrap();
    assert!(ledger.import_workbook(&bytes).is_err());
    assert_eq!(ledger.expenses().len(), 1);
    assert_eq!(ledger.expenses()[0].description, "Keep me");
    assert_eq!(ledger.member_count(), 8);
}

#[test]
fn test_import_workbook_missing_sheet() {
    let source = sample_ledger();
    let sheets = vec![source.sheet(TableKind::Expenses)];
    let bytes = crate::export::encode(&sheets).unwrap();
    let mut ledger = Ledger::new(8);
    assert!(matches!(
        ledger.import_workbook(&bytes).unwrap_err(),
        LedgerError::Schema { .. }
    ));
}

#[test]
fn test_import_garbage_bytes() {
    let mut ledger = Ledger::new(8);
    assert!(matches!(
        ledger.import_workbook(b"not a workbook").unwrap_err(),
        LedgerError::Import(_)
    ));
}

// ── CSV ───────────────────────────────────────────────────────

#[test]
fn test_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = sample_ledger();
    let written = ledger.export_csv(dir.path()).unwrap();
    assert_eq!(written.len(), 3);
    assert!(dir.path().join("member_contributions.csv").exists());

    let mut restored = Ledger::new(3);
    assert_eq!(
        restored
            .load_csv(TableKind::Expenses, &dir.path().join("expenses.csv"))
            .unwrap(),
        2
    );
    restored
        .load_csv(TableKind::Members, &dir.path().join("member_contributions.csv"))
        .unwrap();
    restored
        .load_csv(TableKind::Revenue, &dir.path().join("revenue.csv"))
        .unwrap();
    assert_eq!(restored.expenses(), ledger.expenses());
    assert_eq!(restored.members(), ledger.members());
    assert_eq!(restored.revenue(), ledger.revenue());
}

#[test]
fn test_load_csv_member_count_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    Ledger::new(3).export_csv(dir.path()).unwrap();
    let mut ledger = Ledger::new(8);
    let err = ledger
        .load_csv(TableKind::Members, &dir.path().join("member_contributions.csv"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::RowCountMismatch { .. }));
}

#[test]
fn test_load_csv_missing_file() {
    let mut ledger = Ledger::new(8);
    assert!(ledger
        .load_csv(TableKind::Expenses, Path::new("/nonexistent/expenses.csv"))
        .is_err());
}

#[test]
fn test_table_kind_parse() {
    assert_eq!(TableKind::parse("expenses"), Some(TableKind::Expenses));
    assert_eq!(TableKind::parse("Members"), Some(TableKind::Members));
    assert_eq!(TableKind::parse("tickets"), Some(TableKind::Revenue));
    assert_eq!(TableKind::parse("budgets"), None);
}
