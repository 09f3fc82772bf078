use crate::models::calculation::SHARES_PER_LOT;
use crate::models::form::{Form, TradeField};
use crate::models::trade::{TradeInput, TradeResult};

use super::normalizer::{finite_or_zero, parse_currency, parse_plain};

/// Buy/sell profit calculator with percentage broker fees.
///
/// Pure business logic, like [`AverageDownService`](super::average_down::AverageDownService).
pub struct TradeService;

impl TradeService {
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn read_input(&self, form: &Form<TradeField>) -> TradeInput {
        TradeInput {
            buy_price: parse_currency(form.text(TradeField::BuyPrice)),
            sell_price: parse_currency(form.text(TradeField::SellPrice)),
            lot: parse_plain(form.text(TradeField::Lot)),
            buy_fee_pct: parse_plain(form.text(TradeField::BuyFee)),
            sell_fee_pct: parse_plain(form.text(TradeField::SellFee)),
        }
    }

    /// Buy fees are added to the cost, sell fees deducted from the proceeds.
    /// Figures that overflow to `inf` or `NaN` are reported as 0.
    #[must_use]
    pub fn calculate(&self, input: &TradeInput) -> TradeResult {
        let shares = input.lot * SHARES_PER_LOT;
        let gross_buy = input.buy_price as f64 * shares;
        let gross_sell = input.sell_price as f64 * shares;
        let buy_fee = input.buy_fee_pct / 100.0 * gross_buy;
        let sell_fee = input.sell_fee_pct / 100.0 * gross_sell;

        let total_buy = gross_buy + buy_fee;
        let total_sell = gross_sell - sell_fee;
        let profit = total_sell - total_buy;
        let profit_pct = if total_buy > 0.0 {
            profit / total_buy * 100.0
        } else {
            0.0
        };

        TradeResult {
            shares: finite_or_zero(shares),
            total_buy: finite_or_zero(total_buy),
            total_sell: finite_or_zero(total_sell),
            profit: finite_or_zero(profit),
            profit_pct: finite_or_zero(profit_pct),
        }
    }
}

impl Default for TradeService {
    fn default() -> Self {
        Self::new()
    }
}
