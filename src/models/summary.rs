use rust_decimal::Decimal;

/// Closing narrative for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ticket revenue exceeds the estimated cost; each member gets a share back.
    Profit { share_per_member: Decimal },
    /// Revenue falls short but member contributions cover the gap.
    Covered,
    /// Members still need to put in `missing` in total.
    Shortfall { missing: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub member_count: usize,
    pub total_expenses_estimated: Decimal,
    pub total_expenses_paid: Decimal,
    pub total_member_contributions: Decimal,
    pub total_revenue: Decimal,
    pub cash_on_hand: Decimal,
    pub quota_per_member: Decimal,
    pub profit_or_loss: Decimal,
}

impl Summary {
    pub fn from_totals(
        member_count: usize,
        total_expenses_estimated: Decimal,
        total_expenses_paid: Decimal,
        total_member_contributions: Decimal,
        total_revenue: Decimal,
    ) -> Self {
        Self {
            member_count,
            total_expenses_estimated,
            total_expenses_paid,
            total_member_contributions,
            total_revenue,
            cash_on_hand: total_member_contributions + total_revenue - total_expenses_paid,
            quota_per_member: per_member(total_expenses_estimated, member_count),
            profit_or_loss: total_revenue - total_expenses_estimated,
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.profit_or_loss > Decimal::ZERO {
            Outcome::Profit {
                share_per_member: per_member(self.profit_or_loss, self.member_count),
            }
        } else if self.total_member_contributions
            >= self.total_expenses_estimated - self.total_revenue
        {
            Outcome::Covered
        } else {
            Outcome::Shortfall {
                missing: self.total_expenses_estimated
                    - self.total_revenue
                    - self.total_member_contributions,
            }
        }
    }
}

/// Largest amount the ledger accepts (one trillion). Keeps every sum and
/// quantity × price product far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Even split of `amount`, defined as zero when there is nobody to split it with.
pub fn per_member(amount: Decimal, member_count: usize) -> Decimal {
    if member_count == 0 {
        Decimal::ZERO
    } else {
        amount / Decimal::from(member_count)
    }
}
