use serde::{Deserialize, Serialize};

/// Normalized values of the buy/sell profit form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInput {
    pub buy_price: u64,
    pub sell_price: u64,
    pub lot: f64,
    /// Broker fee on the buy side, in percent of the gross amount
    pub buy_fee_pct: f64,
    /// Broker fee on the sell side, in percent of the gross amount
    pub sell_fee_pct: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResult {
    pub shares: f64,
    /// Gross buy amount plus buy fee
    pub total_buy: f64,
    /// Gross sell amount minus sell fee
    pub total_sell: f64,
    pub profit: f64,
    /// Profit relative to `total_buy`, in percent; 0 when nothing was bought.
    pub profit_pct: f64,
}

impl TradeResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_buy == 0.0 && self.total_sell == 0.0
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.profit > 0.0 {
            Outcome::Profit
        } else if self.profit < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Even
        }
    }
}

/// Sign of a trade's profit, used by front-ends for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Profit,
    Loss,
    Even,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Profit => write!(f, "Profit"),
            Outcome::Loss => write!(f, "Loss"),
            Outcome::Even => write!(f, "Even"),
        }
    }
}
