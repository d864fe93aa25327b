use std::fmt;

/// A copper amount split into gold, silver and copper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub gold: u64,
    pub silver: u64,
    pub copper: u64,
}

impl Currency {
    pub fn from_copper(value: u64) -> Self {
        Self {
            gold: value / 10_000,
            silver: (value % 10_000) / 100,
            copper: value % 100,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g {}s {}c", self.gold, self.silver, self.copper)
    }
}

/// Formats a copper amount as `"{gold}g {silver}s {copper}c"`.
pub fn format_currency(value: u64) -> String {
    Currency::from_copper(value).to_string()
}
