use serde::{Deserialize, Serialize};

/// Number of shares in one lot.
pub const SHARES_PER_LOT: f64 = 100.0;

/// The six normalized values of the average-down form.
///
/// Prices and fees are integer currency units; lots are plain numbers
/// and may be fractional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub initial_price: u64,
    pub initial_lot: f64,
    /// Total paid for the first purchase (auto-filled or manual)
    pub initial_fee: u64,
    pub next_price: u64,
    pub next_lot: f64,
    /// Total paid for the follow-up purchase (auto-filled or manual)
    pub next_fee: u64,
}

/// Derived figures for a [`CalculationInput`]. Never mutated after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_cost: u64,
    pub total_shares: f64,
    pub total_lot: f64,
    /// Average price per share; 0 when there are no shares.
    pub avg_price: f64,
}

impl CalculationResult {
    /// `true` when the result has nothing worth displaying yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_cost == 0 || self.total_shares == 0.0
    }
}
