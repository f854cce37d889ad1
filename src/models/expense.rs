use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseCategory {
    Attractions,
    Credentialing,
    Venue,
    Decoration,
    Marketing,
    Bar,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attractions => "DJ/Attractions",
            Self::Credentialing => "Credentialing",
            Self::Venue => "Venue",
            Self::Decoration => "Decoration",
            Self::Marketing => "Marketing",
            Self::Bar => "Bar",
            Self::Other => "Other",
        }
    }

    /// Accepts the display label or a short key, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dj/attractions" | "dj" | "attractions" => Some(Self::Attractions),
            "credentialing" | "wristbands" => Some(Self::Credentialing),
            "venue" => Some(Self::Venue),
            "decoration" | "decor" => Some(Self::Decoration),
            "marketing" | "ads" => Some(Self::Marketing),
            "bar" | "drinks" => Some(Self::Bar),
            "other" | "misc" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Attractions,
            Self::Credentialing,
            Self::Venue,
            Self::Decoration,
            Self::Marketing,
            Self::Bar,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Partial,
    Pending,
}

impl PaymentStatus {
    /// Derive the status of a bill from what it costs and what was paid so far.
    pub fn derive(estimated: Decimal, paid: Decimal) -> Self {
        if paid >= estimated {
            Self::Paid
        } else if paid > Decimal::ZERO {
            Self::Partial
        } else {
            Self::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Partial => "Partial",
            Self::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub description: String,
    pub category: ExpenseCategory,
    pub estimated: Decimal,
    pub paid: Decimal,
}

impl Expense {
    pub fn new(
        description: String,
        category: ExpenseCategory,
        estimated: Decimal,
        paid: Decimal,
    ) -> Self {
        Self {
            description,
            category,
            estimated,
            paid,
        }
    }

    /// Always derived from the current amounts, so table edits stay consistent.
    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::derive(self.estimated, self.paid)
    }

    pub fn outstanding(&self) -> Decimal {
        (self.estimated - self.paid).max(Decimal::ZERO)
    }
}
