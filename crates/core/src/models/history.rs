use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calculation::{CalculationInput, CalculationResult};
use super::trade::{TradeInput, TradeResult};

/// A saved calculation: the inputs, their result and when it was saved.
///
/// Serialized flat (`{...input, ...result, createdAt}`) so snapshots written
/// by the browser pages load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry<I, R> {
    #[serde(flatten)]
    pub input: I,

    #[serde(flatten)]
    pub result: R,

    pub created_at: DateTime<Utc>,
}

impl<I, R> HistoryEntry<I, R> {
    pub fn new(input: I, result: R, created_at: DateTime<Utc>) -> Self {
        Self {
            input,
            result,
            created_at,
        }
    }
}

pub type AverageDownEntry = HistoryEntry<CalculationInput, CalculationResult>;

pub type TradeEntry = HistoryEntry<TradeInput, TradeResult>;

/// Display projection of a history entry, implemented per calculator.
pub trait HistoryRecord {
    /// Table columns after the row number, in display order.
    fn columns(&self) -> Vec<String>;

    /// Labelled fields for the copyable export, in fixed order,
    /// excluding the leading `#n`.
    fn export_fields(&self) -> Vec<String>;
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// 1-based position as shown to the user.
    pub number: usize,
    /// 0-based index to pass back to `remove`.
    pub index: usize,
    pub columns: Vec<String>,
}

/// What the history tab shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    /// Explicit empty state instead of an empty table.
    Empty,
    Rows(Vec<HistoryRow>),
}

impl HistoryView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, HistoryView::Empty)
    }
}
