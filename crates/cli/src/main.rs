use anyhow::Result;
use clap::Parser;
use lotcalc_core::{
    clipboard::CopyOutcome,
    models::{
        form::{AverageDownField, TradeField},
        history::{HistoryRecord, HistoryView},
        settings::Settings,
        summary::ResultSummary,
    },
    storage::{
        backend::{FileStorage, StorageBackend},
        history::{parse_index, HistoryStore},
    },
    AverageDownCalculator, TradeCalculator,
};
use serde::{de::DeserializeOwned, Serialize};

mod cli;
mod clipboard;
mod config;

use cli::{AvgArgs, Cli, Commands, HistoryAction, Page, TradeArgs};
use clipboard::{StdoutFallback, SystemClipboard};

#[tokio::main]
async fn main() -> Result<()> {
    config::preprocess();

    let cli = Cli::parse();
    log::info!("Command line input recorded: {cli:#?}");

    let dir = config::data_dir(cli.data_dir);
    let storage = FileStorage::open(&dir)?;
    log::debug!("using data directory {}", storage.dir().display());
    let settings = Settings::default();

    match cli.command {
        Commands::Avg(args) => run_avg(args, Box::new(storage), &settings)?,
        Commands::Trade(args) => run_trade(args, Box::new(storage), &settings)?,
        Commands::History { page, action } => match page {
            Page::Avg => {
                let mut calc = AverageDownCalculator::open(Box::new(storage), &settings);
                run_history(calc.history_mut(), action).await?;
            }
            Page::Trade => {
                let mut calc = TradeCalculator::open(Box::new(storage), &settings);
                run_history(calc.history_mut(), action).await?;
            }
        },
    }

    Ok(())
}

fn run_avg(args: AvgArgs, storage: Box<dyn StorageBackend>, settings: &Settings) -> Result<()> {
    let mut calc = AverageDownCalculator::open(storage, settings);

    calc.input(AverageDownField::InitialPrice, args.initial_price);
    calc.input(AverageDownField::InitialLot, args.initial_lot);
    calc.input(AverageDownField::NextPrice, args.next_price);
    calc.input(AverageDownField::NextLot, args.next_lot);
    if let Some(fee) = args.initial_fee {
        calc.input(AverageDownField::InitialFee, fee);
    }
    if let Some(fee) = args.next_fee {
        calc.input(AverageDownField::NextFee, fee);
    }
    for field in [
        AverageDownField::InitialPrice,
        AverageDownField::InitialFee,
        AverageDownField::NextPrice,
        AverageDownField::NextFee,
    ] {
        calc.blur(field);
    }

    println!(
        "Initial: {} × {} lot = {}",
        calc.field_text(AverageDownField::InitialPrice),
        calc.field_text(AverageDownField::InitialLot),
        calc.field_text(AverageDownField::InitialFee),
    );
    println!(
        "Next:    {} × {} lot = {}",
        calc.field_text(AverageDownField::NextPrice),
        calc.field_text(AverageDownField::NextLot),
        calc.field_text(AverageDownField::NextFee),
    );
    println!("{}", calc.summary());

    if args.save {
        calc.add_to_history()?;
        println!("Saved ({} in history)", calc.history().len());
    }
    Ok(())
}

fn run_trade(args: TradeArgs, storage: Box<dyn StorageBackend>, settings: &Settings) -> Result<()> {
    let mut calc = TradeCalculator::open(storage, settings);

    calc.input(TradeField::BuyPrice, args.buy_price);
    calc.input(TradeField::SellPrice, args.sell_price);
    calc.input(TradeField::Lot, args.lot);
    calc.input(TradeField::BuyFee, args.buy_fee);
    calc.input(TradeField::SellFee, args.sell_fee);

    let summary = calc.summary();
    println!("{summary}");
    if let ResultSummary::Lines {
        outcome: Some(outcome),
        ..
    } = &summary
    {
        println!("Outcome: {outcome}");
    }

    if args.save {
        calc.add_to_history()?;
        println!("Saved ({} in history)", calc.history().len());
    }
    Ok(())
}

async fn run_history<T>(store: &mut HistoryStore<T>, action: HistoryAction) -> Result<()>
where
    T: Serialize + DeserializeOwned + HistoryRecord,
{
    match action {
        HistoryAction::List => match store.render() {
            HistoryView::Empty => println!("No saved calculations yet."),
            HistoryView::Rows(rows) => {
                for row in rows {
                    println!("{}. {}", row.number, row.columns.join(" | "));
                }
            }
        },
        HistoryAction::Remove { number } => {
            // `list` numbers rows from 1.
            let removed = match parse_index(&number).and_then(|n| n.checked_sub(1)) {
                Some(index) => store.remove(index)?,
                None => false,
            };
            if removed {
                println!("Removed #{}", number.trim());
            } else {
                println!("No entry #{}", number.trim());
            }
        }
        HistoryAction::Clear => {
            store.clear()?;
            println!("History cleared.");
        }
        HistoryAction::Copy => match store.copy(&SystemClipboard, &StdoutFallback).await {
            CopyOutcome::Nothing => println!("No saved calculations yet."),
            CopyOutcome::Clipboard => println!("Copied {} entries to the clipboard.", store.len()),
            CopyOutcome::Fallback => log::info!("clipboard unavailable, printed history instead"),
            CopyOutcome::Failed => log::warn!("could not copy history"),
        },
    }
    Ok(())
}
