use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueEntry {
    pub source: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl RevenueEntry {
    pub fn new(source: String, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            source,
            quantity,
            unit_price,
        }
    }

    /// Derived on every read so edits to quantity or price are reflected.
    pub fn total_received(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}
