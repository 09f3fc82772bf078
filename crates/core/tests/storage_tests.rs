// ═══════════════════════════════════════════════════════════════════
// Storage Tests — backends, HistoryStore, clipboard export
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use lotcalc_core::clipboard::{copy_with_fallback, Clipboard, CopyOutcome, FallbackCopy};
use lotcalc_core::errors::CoreError;
use lotcalc_core::models::calculation::{CalculationInput, CalculationResult};
use lotcalc_core::models::form::{AverageDownField, TradeField};
use lotcalc_core::models::history::{AverageDownEntry, HistoryEntry, HistoryView};
use lotcalc_core::models::settings::Settings;
use lotcalc_core::storage::backend::{FileStorage, MemoryStorage, StorageBackend};
use lotcalc_core::storage::history::{parse_index, HistoryStore};
use lotcalc_core::{AverageDownCalculator, TradeCalculator};
use std::sync::Mutex;

const KEY: &str = "stock_avg_down_history_v1";

fn entry(initial_price: u64, minute: u32) -> AverageDownEntry {
    let input = CalculationInput {
        initial_price,
        initial_lot: 10.0,
        initial_fee: initial_price * 1000,
        next_price: 4000,
        next_lot: 5.0,
        next_fee: 2_000_000,
    };
    let total_shares = 1500.0;
    let total_cost = input.initial_fee + input.next_fee;
    HistoryEntry::new(
        input,
        CalculationResult {
            total_cost,
            total_shares,
            total_lot: 15.0,
            avg_price: total_cost as f64 / total_shares,
        },
        Utc.with_ymd_and_hms(2025, 1, 15, 10, minute, 0).unwrap(),
    )
}

fn open(storage: &MemoryStorage) -> HistoryStore<AverageDownEntry> {
    HistoryStore::load(Box::new(storage.clone()), KEY)
}

// ═══════════════════════════════════════════════════════════════════
// Mock clipboards
// ═══════════════════════════════════════════════════════════════════

#[derive(Default)]
struct RecordingClipboard {
    fail: bool,
    written: Mutex<Vec<String>>,
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), CoreError> {
        if self.fail {
            return Err(CoreError::Clipboard("permission denied".into()));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingFallback {
    fail: bool,
    copied: Mutex<Vec<String>>,
}

impl FallbackCopy for RecordingFallback {
    fn copy_text(&self, text: &str) -> Result<(), CoreError> {
        if self.fail {
            return Err(CoreError::Clipboard("copy command unsupported".into()));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStorage
// ═══════════════════════════════════════════════════════════════════

mod memory_storage {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let s = MemoryStorage::new();
        assert_eq!(s.get_item("nope").unwrap(), None);
    }

    #[test]
    fn set_get_remove() {
        let s = MemoryStorage::new();
        s.set_item("k", "[1]").unwrap();
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("[1]"));
        s.set_item("k", "[2]").unwrap();
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("[2]"));
        s.remove_item("k").unwrap();
        assert_eq!(s.get_item("k").unwrap(), None);
        s.remove_item("k").unwrap();
    }

    #[test]
    fn clones_share_items() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set_item("k", "v").unwrap();
        assert_eq!(b.get_item("k").unwrap().as_deref(), Some("v"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStorage
// ═══════════════════════════════════════════════════════════════════

mod file_storage {
    use super::*;

    #[test]
    fn open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let s = FileStorage::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(s.dir(), dir.as_path());
    }

    #[test]
    fn set_writes_key_file() {
        let tmp = tempfile::tempdir().unwrap();
        let s = FileStorage::open(tmp.path()).unwrap();
        s.set_item(KEY, "[]").unwrap();
        let on_disk = std::fs::read_to_string(tmp.path().join(format!("{KEY}.json"))).unwrap();
        assert_eq!(on_disk, "[]");
        assert_eq!(s.get_item(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn missing_key_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let s = FileStorage::open(tmp.path()).unwrap();
        assert_eq!(s.get_item(KEY).unwrap(), None);
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let s = FileStorage::open(tmp.path()).unwrap();
        s.remove_item(KEY).unwrap();
        s.set_item(KEY, "[]").unwrap();
        s.remove_item(KEY).unwrap();
        assert_eq!(s.get_item(KEY).unwrap(), None);
    }

    #[test]
    fn rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let s = FileStorage::open(tmp.path()).unwrap();
        for key in ["../escape", "a/b", "", "dot.key"] {
            match s.set_item(key, "[]") {
                Err(CoreError::Storage(msg)) => assert!(msg.contains("Invalid storage key")),
                other => panic!("key {key:?}: expected Storage error, got {other:?}"),
            }
        }
    }

    #[test]
    fn history_survives_new_instance() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let s = FileStorage::open(tmp.path()).unwrap();
            let mut store: HistoryStore<AverageDownEntry> = HistoryStore::load(Box::new(s), KEY);
            store.add(entry(5000, 0)).unwrap();
            store.add(entry(6000, 1)).unwrap();
        }
        let s = FileStorage::open(tmp.path()).unwrap();
        let store: HistoryStore<AverageDownEntry> = HistoryStore::load(Box::new(s), KEY);
        assert_eq!(store.entries(), &[entry(6000, 1), entry(5000, 0)]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// HistoryStore — load
// ═══════════════════════════════════════════════════════════════════

mod load {
    use super::*;

    #[test]
    fn missing_snapshot_is_empty() {
        let store = open(&MemoryStorage::new());
        assert!(store.is_empty());
        assert_eq!(store.key(), KEY);
    }

    #[test]
    fn malformed_snapshot_is_empty() {
        for raw in ["not json", "null", "{\"a\":1}", "[{\"initialPrice\":1}]", "[1,2", ""] {
            let storage = MemoryStorage::new();
            storage.set_item(KEY, raw).unwrap();
            let store = open(&storage);
            assert!(store.is_empty(), "snapshot {raw:?}");
        }
    }

    #[test]
    fn malformed_snapshot_is_left_untouched_until_next_write() {
        let storage = MemoryStorage::new();
        storage.set_item(KEY, "garbage").unwrap();
        let mut store = open(&storage);
        assert_eq!(storage.get_item(KEY).unwrap().as_deref(), Some("garbage"));

        store.add(entry(5000, 0)).unwrap();
        let raw = storage.get_item(KEY).unwrap().unwrap();
        let parsed: Vec<AverageDownEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn loads_browser_snapshot() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                KEY,
                r#"[{"initialPrice":5000,"initialLot":10,"initialFee":5000000,"nextPrice":4000,"nextLot":5,"nextFee":2000000,"totalCost":7000000,"totalShares":1500,"totalLot":15,"avgPrice":4666.666666666667,"createdAt":"2025-01-15T10:00:00.000Z"}]"#,
            )
            .unwrap();
        let store = open(&storage);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().result.total_cost, 7_000_000);
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let storage = MemoryStorage::new();
        let mut reader = open(&storage);
        let mut writer = open(&storage);
        writer.add(entry(5000, 0)).unwrap();
        assert!(reader.is_empty());
        reader.reload();
        assert_eq!(reader.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// HistoryStore — mutations
// ═══════════════════════════════════════════════════════════════════

mod mutations {
    use super::*;

    #[test]
    fn add_prepends_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.add(entry(5000, 0)).unwrap();
        store.add(entry(6000, 1)).unwrap();
        assert_eq!(store.get(0), Some(&entry(6000, 1)));
        assert_eq!(store.get(1), Some(&entry(5000, 0)));

        let fresh = open(&storage);
        assert_eq!(fresh.entries(), store.entries());
    }

    #[test]
    fn add_then_remove_first_restores_previous_state() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.add(entry(5000, 0)).unwrap();
        store.add(entry(6000, 1)).unwrap();
        let before = store.entries().to_vec();

        store.add(entry(7000, 2)).unwrap();
        assert!(store.remove(0).unwrap());
        assert_eq!(store.entries(), before.as_slice());
        assert_eq!(open(&storage).entries(), before.as_slice());
    }

    #[test]
    fn remove_middle_entry() {
        let mut store = open(&MemoryStorage::new());
        for (i, price) in [1000, 2000, 3000].into_iter().enumerate() {
            store.add(entry(price, i as u32)).unwrap();
        }
        assert!(store.remove(1).unwrap());
        let prices: Vec<u64> = store.entries().iter().map(|e| e.input.initial_price).collect();
        assert_eq!(prices, vec![3000, 1000]);
    }

    #[test]
    fn remove_out_of_range_is_noop_and_writes_nothing() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        assert!(!store.remove(0).unwrap());
        assert!(!store.remove(usize::MAX).unwrap());
        assert_eq!(storage.get_item(KEY).unwrap(), None);
    }

    #[test]
    fn remove_raw_ignores_non_numeric_index() {
        let mut store = open(&MemoryStorage::new());
        store.add(entry(5000, 0)).unwrap();
        for raw in ["abc", "-1", "1.5", "", "NaN"] {
            assert!(!store.remove_raw(raw).unwrap(), "raw {raw:?}");
        }
        assert_eq!(store.len(), 1);
        assert!(store.remove_raw(" 0 ").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn parse_index_accepts_only_non_negative_integers() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index(" 12\n"), Some(12));
        for raw in ["", " ", "abc", "-1", "1.5", "+-2", "1e3"] {
            assert_eq!(parse_index(raw), None, "raw {raw:?}");
        }
    }

    #[test]
    fn clear_persists_empty_collection() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.add(entry(5000, 0)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(storage.get_item(KEY).unwrap().as_deref(), Some("[]"));
        assert!(open(&storage).is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// HistoryStore — render & export
// ═══════════════════════════════════════════════════════════════════

mod render_export {
    use super::*;

    #[test]
    fn render_empty_state() {
        let store = open(&MemoryStorage::new());
        assert_eq!(store.render(), HistoryView::Empty);
        assert!(store.render().is_empty());
    }

    #[test]
    fn render_rows_numbered_from_one() {
        let mut store = open(&MemoryStorage::new());
        store.add(entry(5000, 0)).unwrap();
        store.add(entry(6000, 1)).unwrap();
        match store.render() {
            HistoryView::Rows(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!((rows[0].number, rows[0].index), (1, 0));
                assert_eq!((rows[1].number, rows[1].index), (2, 1));
                assert_eq!(rows[1].columns[0], "5.000 | Lot 10 | Rp 5.000.000,00");
                assert_eq!(rows[1].columns[2], "4.666,67");
                assert_eq!(rows[1].columns[3], "15");
                assert_eq!(rows[1].columns[4], "Rp 7.000.000,00");
            }
            HistoryView::Empty => panic!("expected rows"),
        }
    }

    #[test]
    fn export_empty_is_none() {
        assert_eq!(open(&MemoryStorage::new()).export_text(), None);
    }

    #[test]
    fn export_one_line_per_entry() {
        let mut store = open(&MemoryStorage::new());
        store.add(entry(5000, 0)).unwrap();
        store.add(entry(6000, 1)).unwrap();
        let text = store.export_text().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#1 | Initial: 6.000 | Lot 10 | Fee Rp 6.000.000,00"));
        assert_eq!(
            lines[1],
            "#2 | Initial: 5.000 | Lot 10 | Fee Rp 5.000.000,00 | Next: 4.000 | Lot 5 \
             | Fee Rp 2.000.000,00 | Average: 4.666,67 | Total lot: 15 | Total cost: Rp 7.000.000,00"
        );
        assert!(!text.ends_with('\n'));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Clipboard
// ═══════════════════════════════════════════════════════════════════

mod clipboard {
    use super::*;

    #[tokio::test]
    async fn clipboard_success_skips_fallback() {
        let cb = RecordingClipboard::default();
        let fb = RecordingFallback::default();
        assert_eq!(copy_with_fallback(&cb, &fb, "hello").await, CopyOutcome::Clipboard);
        assert_eq!(cb.written.lock().unwrap().as_slice(), ["hello"]);
        assert!(fb.copied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejected_clipboard_uses_fallback() {
        let cb = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let fb = RecordingFallback::default();
        assert_eq!(copy_with_fallback(&cb, &fb, "hello").await, CopyOutcome::Fallback);
        assert_eq!(fb.copied.lock().unwrap().as_slice(), ["hello"]);
    }

    #[tokio::test]
    async fn both_paths_failing_is_reported_not_raised() {
        let cb = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let fb = RecordingFallback {
            fail: true,
            ..Default::default()
        };
        assert_eq!(copy_with_fallback(&cb, &fb, "hello").await, CopyOutcome::Failed);
    }

    #[tokio::test]
    async fn store_copy_sends_export_text() {
        let mut store = open(&MemoryStorage::new());
        store.add(entry(5000, 0)).unwrap();
        let cb = RecordingClipboard::default();
        let fb = RecordingFallback::default();
        assert_eq!(store.copy(&cb, &fb).await, CopyOutcome::Clipboard);
        assert_eq!(cb.written.lock().unwrap()[0], store.export_text().unwrap());
    }

    #[tokio::test]
    async fn store_copy_with_empty_history_does_nothing() {
        let store = open(&MemoryStorage::new());
        let cb = RecordingClipboard::default();
        let fb = RecordingFallback::default();
        assert_eq!(store.copy(&cb, &fb).await, CopyOutcome::Nothing);
        assert!(cb.written.lock().unwrap().is_empty());
        assert!(fb.copied.lock().unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Calculator snapshots — oversized input
// ═══════════════════════════════════════════════════════════════════

mod oversized_input {
    use super::*;

    #[test]
    fn average_down_history_survives_huge_lot() {
        let storage = MemoryStorage::new();
        let settings = Settings::default();
        let mut calc = AverageDownCalculator::open(Box::new(storage.clone()), &settings);
        calc.input(AverageDownField::InitialPrice, "5000");
        calc.input(AverageDownField::InitialLot, "10");
        calc.add_to_history().unwrap();
        calc.input(AverageDownField::InitialLot, "1e307");
        calc.add_to_history().unwrap();

        let reopened = AverageDownCalculator::open(Box::new(storage.clone()), &settings);
        assert_eq!(reopened.history().len(), 2);
        for entry in reopened.history().entries() {
            let r = &entry.result;
            assert!(r.total_shares.is_finite());
            assert!(r.total_lot.is_finite());
            assert!(r.avg_price.is_finite());
        }
        assert_eq!(reopened.history().entries()[1].result.total_shares, 1000.0);
        assert!(!storage.get_item(KEY).unwrap().unwrap().contains("null"));
    }

    #[test]
    fn trade_history_survives_huge_lot() {
        let storage = MemoryStorage::new();
        let settings = Settings::default();
        let mut calc = TradeCalculator::open(Box::new(storage.clone()), &settings);
        calc.input(TradeField::BuyPrice, "1000");
        calc.input(TradeField::SellPrice, "1100");
        calc.input(TradeField::Lot, "10");
        calc.add_to_history().unwrap();
        calc.input(TradeField::Lot, "1e306");
        calc.add_to_history().unwrap();

        let reopened = TradeCalculator::open(Box::new(storage.clone()), &settings);
        assert_eq!(reopened.history().len(), 2);
        for entry in reopened.history().entries() {
            let r = &entry.result;
            for value in [r.shares, r.total_buy, r.total_sell, r.profit, r.profit_pct] {
                assert!(value.is_finite());
            }
        }
        let stored = storage.get_item(&settings.trade_history_key).unwrap().unwrap();
        assert!(!stored.contains("null"));
    }
}
