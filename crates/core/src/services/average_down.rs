use crate::models::calculation::{CalculationInput, CalculationResult, SHARES_PER_LOT};
use crate::models::form::{AverageDownField, Form};

use super::normalizer::{finite_or_zero, parse_currency, parse_plain};

/// Average-down cost calculator.
///
/// Pure business logic: no I/O, no state. Calling [`calculate`](Self::calculate)
/// twice with the same input yields bit-identical results.
pub struct AverageDownService;

impl AverageDownService {
    pub fn new() -> Self {
        Self
    }

    /// Normalize the current text of every form field.
    #[must_use]
    pub fn read_input(&self, form: &Form<AverageDownField>) -> CalculationInput {
        CalculationInput {
            initial_price: parse_currency(form.text(AverageDownField::InitialPrice)),
            initial_lot: parse_plain(form.text(AverageDownField::InitialLot)),
            initial_fee: parse_currency(form.text(AverageDownField::InitialFee)),
            next_price: parse_currency(form.text(AverageDownField::NextPrice)),
            next_lot: parse_plain(form.text(AverageDownField::NextLot)),
            next_fee: parse_currency(form.text(AverageDownField::NextFee)),
        }
    }

    /// Combine both purchases into one position.
    ///
    /// The average price is the total amount paid divided by the total share
    /// count, and falls back to 0 when no shares are held. A share count too
    /// large to represent counts as no shares.
    #[must_use]
    pub fn calculate(&self, input: &CalculationInput) -> CalculationResult {
        let total_shares = finite_or_zero((input.initial_lot + input.next_lot) * SHARES_PER_LOT);
        let total_cost = input.initial_fee.saturating_add(input.next_fee);
        let avg_price = if total_shares > 0.0 {
            finite_or_zero(total_cost as f64 / total_shares)
        } else {
            0.0
        };

        CalculationResult {
            total_cost,
            total_shares,
            total_lot: total_shares / SHARES_PER_LOT,
            avg_price,
        }
    }
}

impl Default for AverageDownService {
    fn default() -> Self {
        Self::new()
    }
}
