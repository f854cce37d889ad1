mod expense;
mod member;
mod revenue;
mod summary;

pub use expense::{Expense, ExpenseCategory, PaymentStatus};
pub use member::{Member, MemberStanding};
pub use revenue::RevenueEntry;
pub use summary::{per_member, Outcome, Summary, MAX_AMOUNT};

#[cfg(test)]
mod tests;
