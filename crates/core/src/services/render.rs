use crate::models::calculation::CalculationResult;
use crate::models::history::{AverageDownEntry, HistoryRecord, TradeEntry};
use crate::models::summary::{ResultSummary, SummaryLine};
use crate::models::trade::TradeResult;

use super::format::{format_idr, format_number};

/// Average prices and lot counts show up to two decimals.
pub const AVERAGE_DOWN_FRACTION_DIGITS: u32 = 2;

/// The trade page rounds prices, lots and percentages to whole numbers.
pub const TRADE_FRACTION_DIGITS: u32 = 0;

/// Summary of an average-down result, or [`ResultSummary::Empty`] while
/// either the total cost or the share count is zero.
#[must_use]
pub fn summarize_average_down(result: &CalculationResult) -> ResultSummary {
    if result.is_empty() {
        return ResultSummary::Empty;
    }
    ResultSummary::Lines {
        lines: vec![
            SummaryLine {
                label: "Average price",
                value: format_number(result.avg_price, AVERAGE_DOWN_FRACTION_DIGITS),
            },
            SummaryLine {
                label: "Total lot",
                value: format_number(result.total_lot, AVERAGE_DOWN_FRACTION_DIGITS),
            },
            SummaryLine {
                label: "Total cost",
                value: format_idr(result.total_cost as f64),
            },
        ],
        outcome: None,
    }
}

/// Summary of a trade result, or [`ResultSummary::Empty`] while both totals are zero.
#[must_use]
pub fn summarize_trade(result: &TradeResult) -> ResultSummary {
    if result.is_empty() {
        return ResultSummary::Empty;
    }
    ResultSummary::Lines {
        lines: vec![
            SummaryLine {
                label: "Total buy",
                value: format_idr(result.total_buy),
            },
            SummaryLine {
                label: "Total sell",
                value: format_idr(result.total_sell),
            },
            SummaryLine {
                label: "Profit/loss",
                value: profit_text(result),
            },
        ],
        outcome: Some(result.outcome()),
    }
}

fn profit_text(result: &TradeResult) -> String {
    format!(
        "{} ({}%)",
        format_idr(result.profit),
        format_number(result.profit_pct, TRADE_FRACTION_DIGITS)
    )
}

fn purchase_text(price: u64, lot: f64, fee: u64) -> String {
    format!(
        "{} | Lot {} | {}",
        format_number(price as f64, AVERAGE_DOWN_FRACTION_DIGITS),
        format_number(lot, AVERAGE_DOWN_FRACTION_DIGITS),
        format_idr(fee as f64)
    )
}

impl HistoryRecord for AverageDownEntry {
    fn columns(&self) -> Vec<String> {
        let i = &self.input;
        vec![
            purchase_text(i.initial_price, i.initial_lot, i.initial_fee),
            purchase_text(i.next_price, i.next_lot, i.next_fee),
            format_number(self.result.avg_price, AVERAGE_DOWN_FRACTION_DIGITS),
            format_number(self.result.total_lot, AVERAGE_DOWN_FRACTION_DIGITS),
            format_idr(self.result.total_cost as f64),
        ]
    }

    fn export_fields(&self) -> Vec<String> {
        let i = &self.input;
        let d = AVERAGE_DOWN_FRACTION_DIGITS;
        vec![
            format!(
                "Initial: {} | Lot {} | Fee {}",
                format_number(i.initial_price as f64, d),
                format_number(i.initial_lot, d),
                format_idr(i.initial_fee as f64)
            ),
            format!(
                "Next: {} | Lot {} | Fee {}",
                format_number(i.next_price as f64, d),
                format_number(i.next_lot, d),
                format_idr(i.next_fee as f64)
            ),
            format!("Average: {}", format_number(self.result.avg_price, d)),
            format!("Total lot: {}", format_number(self.result.total_lot, d)),
            format!("Total cost: {}", format_idr(self.result.total_cost as f64)),
        ]
    }
}

impl HistoryRecord for TradeEntry {
    fn columns(&self) -> Vec<String> {
        let d = TRADE_FRACTION_DIGITS;
        vec![
            format_number(self.input.buy_price as f64, d),
            format_number(self.input.sell_price as f64, d),
            format_number(self.input.lot, d),
            format_idr(self.result.total_buy),
            format_idr(self.result.total_sell),
            profit_text(&self.result),
        ]
    }

    fn export_fields(&self) -> Vec<String> {
        let d = TRADE_FRACTION_DIGITS;
        vec![
            format!("Buy price: {}", format_number(self.input.buy_price as f64, d)),
            format!("Sell price: {}", format_number(self.input.sell_price as f64, d)),
            format!("Lot: {}", format_number(self.input.lot, d)),
            format!("Total buy: {}", format_idr(self.result.total_buy)),
            format!("Total sell: {}", format_idr(self.result.total_sell)),
            format!("Profit/loss: {}", profit_text(&self.result)),
        ]
    }
}
