#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── PaymentStatus ─────────────────────────────────────────────

fn make_expense(estimated: Decimal, paid: Decimal) -> Expense {
    Expense::new("DJ Pacato".into(), ExpenseCategory::Attractions, estimated, paid)
}

#[test]
fn test_status_paid_in_full() {
    assert_eq!(make_expense(dec!(1000), dec!(1000)).status(), PaymentStatus::Paid);
}

#[test]
fn test_status_overpaid_counts_as_paid() {
    assert_eq!(make_expense(dec!(100), dec!(150)).status(), PaymentStatus::Paid);
}

#[test]
fn test_status_partial() {
    assert_eq!(make_expense(dec!(1000), dec!(0.01)).status(), PaymentStatus::Partial);
    assert_eq!(make_expense(dec!(1000), dec!(999.99)).status(), PaymentStatus::Partial);
}

#[test]
fn test_status_pending() {
    assert_eq!(make_expense(dec!(1000), Decimal::ZERO).status(), PaymentStatus::Pending);
}

#[test]
fn test_status_free_item_is_paid() {
    assert_eq!(make_expense(Decimal::ZERO, Decimal::ZERO).status(), PaymentStatus::Paid);
}

#[test]
fn test_status_follows_edits() {
    let mut expense = make_expense(dec!(500), Decimal::ZERO);
    assert_eq!(expense.status(), PaymentStatus::Pending);
    expense.paid = dec!(200);
    assert_eq!(expense.status(), PaymentStatus::Partial);
    expense.paid = dec!(500);
    assert_eq!(expense.status(), PaymentStatus::Paid);
}

#[test]
fn test_outstanding_never_negative() {
    assert_eq!(make_expense(dec!(500), dec!(200)).outstanding(), dec!(300));
    assert_eq!(make_expense(dec!(500), dec!(700)).outstanding(), Decimal::ZERO);
}

// ── ExpenseCategory ───────────────────────────────────────────

#[test]
fn test_category_parse_labels_and_keys() {
    assert_eq!(ExpenseCategory::parse("DJ/Attractions"), Some(ExpenseCategory::Attractions));
    assert_eq!(ExpenseCategory::parse("dj"), Some(ExpenseCategory::Attractions));
    assert_eq!(ExpenseCategory::parse("VENUE"), Some(ExpenseCategory::Venue));
    assert_eq!(ExpenseCategory::parse("  decor "), Some(ExpenseCategory::Decoration));
    assert_eq!(ExpenseCategory::parse("Bar"), Some(ExpenseCategory::Bar));
    assert_eq!(ExpenseCategory::parse("fireworks"), None);
}

#[test]
fn test_category_labels_round_trip() {
    for cat in ExpenseCategory::all() {
        assert_eq!(ExpenseCategory::parse(cat.as_str()), Some(*cat));
    }
}

// ── RevenueEntry ──────────────────────────────────────────────

#[test]
fn test_total_received() {
    let entry = RevenueEntry::new("Batch 1".into(), 100, dec!(20));
    assert_eq!(entry.total_received(), dec!(2000));
}

#[test]
fn test_total_received_tracks_edits() {
    let mut entry = RevenueEntry::new("Batch 1".into(), 10, dec!(25));
    entry.quantity = 12;
    assert_eq!(entry.total_received(), dec!(300));
}

// ── Member ────────────────────────────────────────────────────

#[test]
fn test_placeholder_member() {
    let m = Member::placeholder(3);
    assert_eq!(m.name, "Member 3");
    assert_eq!(m.paid, Decimal::ZERO);
}

#[test]
fn test_standing_labels() {
    let owing = MemberStanding {
        name: "Ana".into(),
        paid: dec!(50),
        outstanding: dec!(75),
    };
    let settled = MemberStanding {
        name: "Bia".into(),
        paid: dec!(125),
        outstanding: Decimal::ZERO,
    };
    assert!(!owing.is_settled());
    assert_eq!(owing.label(), "Owing");
    assert!(settled.is_settled());
    assert_eq!(settled.label(), "Settled");
}

// ── Summary ───────────────────────────────────────────────────

#[test]
fn test_summary_arithmetic() {
    let s = Summary::from_totals(8, dec!(1000), dec!(1000), Decimal::ZERO, Decimal::ZERO);
    assert_eq!(s.quota_per_member, dec!(125.00));
    assert_eq!(s.cash_on_hand, dec!(-1000));
    assert_eq!(s.profit_or_loss, dec!(-1000));
}

#[test]
fn test_per_member_zero_members() {
    assert_eq!(per_member(dec!(1000), 0), Decimal::ZERO);
}

#[test]
fn test_outcome_profit() {
    let s = Summary::from_totals(8, dec!(1500), Decimal::ZERO, Decimal::ZERO, dec!(2000));
    assert_eq!(
        s.outcome(),
        Outcome::Profit {
            share_per_member: dec!(62.50)
        }
    );
}

#[test]
fn test_outcome_covered_by_contributions() {
    let s = Summary::from_totals(4, dec!(1000), dec!(600), dec!(400), dec!(600));
    assert_eq!(s.outcome(), Outcome::Covered);
}

#[test]
fn test_outcome_break_even_is_covered() {
    let s = Summary::from_totals(4, dec!(1000), Decimal::ZERO, Decimal::ZERO, dec!(1000));
    assert_eq!(s.profit_or_loss, Decimal::ZERO);
    assert_eq!(s.outcome(), Outcome::Covered);
}

#[test]
fn test_outcome_shortfall() {
    let s = Summary::from_totals(4, dec!(1000), Decimal::ZERO, dec!(100), dec!(300));
    assert_eq!(s.outcome(), Outcome::Shortfall { missing: dec!(600) });
}

#[test]
fn test_max_amount_is_one_trillion() {
    assert_eq!(MAX_AMOUNT, dec!(1000000000000));
}
