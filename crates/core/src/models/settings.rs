use serde::{Deserialize, Serialize};

/// Storage key of the average-down history snapshot.
pub const AVERAGE_DOWN_HISTORY_KEY: &str = "stock_avg_down_history_v1";

/// Storage key of the trade profit history snapshot.
pub const TRADE_HISTORY_KEY: &str = "stock_trade_history_v1";

/// Front-end configurable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Key under which average-down history is persisted.
    pub average_down_history_key: String,

    /// Key under which trade profit history is persisted.
    pub trade_history_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            average_down_history_key: AVERAGE_DOWN_HISTORY_KEY.to_string(),
            trade_history_key: TRADE_HISTORY_KEY.to_string(),
        }
    }
}
