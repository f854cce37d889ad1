use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub paid: Decimal,
}

impl Member {
    pub fn new(name: String, paid: Decimal) -> Self {
        Self { name, paid }
    }

    /// Placeholder row used to seed the member table, numbered from 1.
    pub fn placeholder(number: usize) -> Self {
        Self::new(format!("Member {number}"), Decimal::ZERO)
    }
}

/// How a member stands against the per-member quota.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberStanding {
    pub name: String,
    pub paid: Decimal,
    /// Quota minus paid; zero or negative once the member is settled.
    pub outstanding: Decimal,
}

impl MemberStanding {
    pub fn is_settled(&self) -> bool {
        self.outstanding <= Decimal::ZERO
    }

    pub fn label(&self) -> &'static str {
        if self.is_settled() {
            "Settled"
        } else {
            "Owing"
        }
    }
}
