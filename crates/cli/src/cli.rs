use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lotcalc", version, about = "Average-down and trade profit calculators for lot-based stock trading")]
pub struct Cli {
    /// Directory holding saved history (default: $LOTCALC_DATA_DIR or ./.lotcalc)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Average price after buying more of a held position
    Avg(AvgArgs),

    /// Profit or loss of a buy/sell round trip
    Trade(TradeArgs),

    /// Inspect or edit saved calculations
    History {
        #[arg(value_enum)]
        page: Page,

        #[command(subcommand)]
        action: HistoryAction,
    },
}

/// Amounts accept rupiah text such as "Rp 5.000"; lots are plain numbers.
#[derive(Debug, Args)]
pub struct AvgArgs {
    #[arg(long)]
    pub initial_price: String,

    #[arg(long)]
    pub initial_lot: String,

    /// Amount paid for the first purchase (default: price × lot × 100)
    #[arg(long)]
    pub initial_fee: Option<String>,

    #[arg(long)]
    pub next_price: String,

    #[arg(long)]
    pub next_lot: String,

    /// Amount paid for the second purchase (default: price × lot × 100)
    #[arg(long)]
    pub next_fee: Option<String>,

    /// Save the result to history
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Args)]
pub struct TradeArgs {
    #[arg(long)]
    pub buy_price: String,

    #[arg(long)]
    pub sell_price: String,

    #[arg(long)]
    pub lot: String,

    /// Buy fee in percent
    #[arg(long, default_value = "")]
    pub buy_fee: String,

    /// Sell fee in percent
    #[arg(long, default_value = "")]
    pub sell_fee: String,

    /// Save the result to history
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Page {
    Avg,
    Trade,
}

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryAction {
    /// Show saved calculations, newest first
    List,

    /// Delete the entry with the number shown by `list`
    Remove { number: String },

    /// Delete every saved calculation
    Clear,

    /// Copy all entries to the clipboard as text
    Copy,
}
