use crate::models::calculation::SHARES_PER_LOT;
use crate::models::form::{AverageDownField, Form, ManualOverride};

use super::format::format_rupiah_input;
use super::normalizer::{parse_currency, parse_plain};

/// A price/lot pair and the fee field derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeePair {
    pub price: AverageDownField,
    pub lot: AverageDownField,
    pub fee: AverageDownField,
}

impl FeePair {
    pub const INITIAL: FeePair = FeePair {
        price: AverageDownField::InitialPrice,
        lot: AverageDownField::InitialLot,
        fee: AverageDownField::InitialFee,
    };

    pub const NEXT: FeePair = FeePair {
        price: AverageDownField::NextPrice,
        lot: AverageDownField::NextLot,
        fee: AverageDownField::NextFee,
    };

    pub const BOTH: [FeePair; 2] = [FeePair::INITIAL, FeePair::NEXT];
}

/// Suggests the amount paid for a purchase from its price and lot count.
pub struct AutoFillService;

impl AutoFillService {
    pub fn new() -> Self {
        Self
    }

    /// `price × lot × 100`, or `None` unless both are strictly positive.
    #[must_use]
    pub fn suggested_fee(&self, price: u64, lot: f64) -> Option<u64> {
        if price > 0 && lot > 0.0 {
            Some((price as f64 * lot * SHARES_PER_LOT).round() as u64)
        } else {
            None
        }
    }

    /// Rewrite the pair's fee field unless the user has taken it over.
    /// Returns `true` when the field text changed.
    pub fn apply(
        &self,
        form: &mut Form<AverageDownField>,
        manual: ManualOverride,
        pair: FeePair,
    ) -> bool {
        if manual.is_set() {
            return false;
        }
        let price = parse_currency(form.text(pair.price));
        let lot = parse_plain(form.text(pair.lot));
        let text = self
            .suggested_fee(price, lot)
            .map(format_rupiah_input)
            .unwrap_or_default();

        if form.text(pair.fee) == text {
            return false;
        }
        form.set_text(pair.fee, text);
        true
    }
}

impl Default for AutoFillService {
    fn default() -> Self {
        Self::new()
    }
}
