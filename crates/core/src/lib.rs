pub mod clipboard;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::{DateTime, Utc};
use clipboard::{Clipboard, CopyOutcome, FallbackCopy};
use log::debug;
use models::{
    calculation::{CalculationInput, CalculationResult},
    form::{AverageDownField, Form, FormField, ManualOverride, NumberMode, TradeField},
    history::{AverageDownEntry, HistoryEntry, TradeEntry},
    settings::Settings,
    summary::ResultSummary,
    trade::{TradeInput, TradeResult},
};
use services::{
    auto_fill::{AutoFillService, FeePair},
    average_down::AverageDownService,
    format::format_rupiah_input,
    normalizer::parse_currency,
    render::{summarize_average_down, summarize_trade},
    trade::TradeService,
};
use storage::{backend::StorageBackend, history::HistoryStore};

use errors::CoreError;

/// Focusing a currency field shows its bare digits for editing.
fn focus_text(text: &str) -> String {
    match parse_currency(text) {
        0 => String::new(),
        n => n.to_string(),
    }
}

/// Leaving a currency field shows it as `Rp 5.000`.
fn blur_text(text: &str) -> String {
    format_rupiah_input(parse_currency(text))
}

/// State of the average-down page: form text, fee override flags and the
/// persisted history.
///
/// Every user event maps to one method. Methods that change the form return
/// the freshly computed summary for the result box.
#[must_use]
pub struct AverageDownCalculator {
    form: Form<AverageDownField>,
    /// Indexed like [`FeePair::BOTH`]: initial, then next.
    overrides: [ManualOverride; 2],
    history: HistoryStore<AverageDownEntry>,
    calculator: AverageDownService,
    auto_fill: AutoFillService,
}

impl std::fmt::Debug for AverageDownCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AverageDownCalculator")
            .field("form", &self.form)
            .field("overrides", &self.overrides)
            .field("history", &self.history)
            .finish()
    }
}

impl AverageDownCalculator {
    /// Open the page state, loading history from the configured key.
    pub fn open(backend: Box<dyn StorageBackend>, settings: &Settings) -> Self {
        let history = HistoryStore::load(backend, settings.average_down_history_key.clone());
        debug!("average-down: loaded {} history entries", history.len());
        Self {
            form: Form::new(),
            overrides: [ManualOverride::default(); 2],
            history,
            calculator: AverageDownService::new(),
            auto_fill: AutoFillService::new(),
        }
    }

    // ── Form Events ─────────────────────────────────────────────────

    /// The user typed into `field`; `text` is the field's new content.
    ///
    /// Typing into a fee field takes it over from the auto-fill assistant
    /// until the field is emptied again. Both fee pairs are then
    /// re-derived and the result recomputed.
    pub fn input(&mut self, field: AverageDownField, text: impl Into<String>) -> ResultSummary {
        let text = text.into();
        if let Some(slot) = Self::override_slot(field) {
            self.overrides[slot].on_input(&text);
        }
        self.form.set_text(field, text);

        for (slot, pair) in FeePair::BOTH.into_iter().enumerate() {
            self.auto_fill.apply(&mut self.form, self.overrides[slot], pair);
        }
        self.summary()
    }

    /// Currency fields switch to bare digits while focused.
    pub fn focus(&mut self, field: AverageDownField) {
        if field.mode() == NumberMode::Currency {
            let text = focus_text(self.form.text(field));
            self.form.set_text(field, text);
        }
    }

    /// Currency fields are reformatted on blur; the result is recomputed.
    pub fn blur(&mut self, field: AverageDownField) -> ResultSummary {
        if field.mode() == NumberMode::Currency {
            let text = blur_text(self.form.text(field));
            self.form.set_text(field, text);
        }
        self.summary()
    }

    #[must_use]
    pub fn field_text(&self, field: AverageDownField) -> &str {
        self.form.text(field)
    }

    /// `true` when `field` is a fee field the user has taken over.
    #[must_use]
    pub fn is_manual(&self, field: AverageDownField) -> bool {
        Self::override_slot(field).is_some_and(|slot| self.overrides[slot].is_set())
    }

    // ── Calculation ─────────────────────────────────────────────────

    #[must_use]
    pub fn current_input(&self) -> CalculationInput {
        self.calculator.read_input(&self.form)
    }

    #[must_use]
    pub fn calculate(&self) -> CalculationResult {
        self.calculator.calculate(&self.current_input())
    }

    #[must_use]
    pub fn summary(&self) -> ResultSummary {
        summarize_average_down(&self.calculate())
    }

    // ── History ─────────────────────────────────────────────────────

    /// Save the current calculation as the newest history entry.
    pub fn add_to_history(&mut self) -> Result<AverageDownEntry, CoreError> {
        self.add_to_history_at(Utc::now())
    }

    /// [`add_to_history`](Self::add_to_history) with an explicit timestamp.
    pub fn add_to_history_at(
        &mut self,
        created_at: DateTime<Utc>,
    ) -> Result<AverageDownEntry, CoreError> {
        let input = self.current_input();
        let result = self.calculator.calculate(&input);
        let entry = HistoryEntry::new(input, result, created_at);
        self.history.add(entry.clone())?;
        Ok(entry)
    }

    pub fn history(&self) -> &HistoryStore<AverageDownEntry> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore<AverageDownEntry> {
        &mut self.history
    }

    /// Delete the entry at `index`; `false` when there is no such row.
    pub fn remove_history(&mut self, index: usize) -> Result<bool, CoreError> {
        self.history.remove(index)
    }

    /// [`remove_history`](Self::remove_history) for an index still in text form.
    pub fn remove_history_raw(&mut self, raw: &str) -> Result<bool, CoreError> {
        self.history.remove_raw(raw)
    }

    pub fn clear_history(&mut self) -> Result<(), CoreError> {
        self.history.clear()
    }

    /// Copy the average-down history export to the clipboard, or hand it to
    /// `fallback` when the clipboard refuses it.
    pub async fn copy_history(
        &self,
        clipboard: &dyn Clipboard,
        fallback: &dyn FallbackCopy,
    ) -> CopyOutcome {
        self.history.copy(clipboard, fallback).await
    }

    // ── Internal ────────────────────────────────────────────────────

    fn override_slot(field: AverageDownField) -> Option<usize> {
        FeePair::BOTH.iter().position(|pair| pair.fee == field)
    }
}

/// State of the buy/sell profit page. No auto-fill: fees are percentages
/// typed by the user.
#[must_use]
pub struct TradeCalculator {
    form: Form<TradeField>,
    history: HistoryStore<TradeEntry>,
    calculator: TradeService,
}

impl std::fmt::Debug for TradeCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeCalculator")
            .field("form", &self.form)
            .field("history", &self.history)
            .finish()
    }
}

impl TradeCalculator {
    pub fn open(backend: Box<dyn StorageBackend>, settings: &Settings) -> Self {
        let history = HistoryStore::load(backend, settings.trade_history_key.clone());
        debug!("trade: loaded {} history entries", history.len());
        Self {
            form: Form::new(),
            history,
            calculator: TradeService::new(),
        }
    }

    // ── Form Events ─────────────────────────────────────────────────

    pub fn input(&mut self, field: TradeField, text: impl Into<String>) -> ResultSummary {
        self.form.set_text(field, text);
        self.summary()
    }

    pub fn focus(&mut self, field: TradeField) {
        if field.mode() == NumberMode::Currency {
            let text = focus_text(self.form.text(field));
            self.form.set_text(field, text);
        }
    }

    pub fn blur(&mut self, field: TradeField) -> ResultSummary {
        if field.mode() == NumberMode::Currency {
            let text = blur_text(self.form.text(field));
            self.form.set_text(field, text);
        }
        self.summary()
    }

    #[must_use]
    pub fn field_text(&self, field: TradeField) -> &str {
        self.form.text(field)
    }

    // ── Calculation ─────────────────────────────────────────────────

    #[must_use]
    pub fn current_input(&self) -> TradeInput {
        self.calculator.read_input(&self.form)
    }

    #[must_use]
    pub fn calculate(&self) -> TradeResult {
        self.calculator.calculate(&self.current_input())
    }

    #[must_use]
    pub fn summary(&self) -> ResultSummary {
        summarize_trade(&self.calculate())
    }

    // ── History ─────────────────────────────────────────────────────

    pub fn add_to_history(&mut self) -> Result<TradeEntry, CoreError> {
        self.add_to_history_at(Utc::now())
    }

    pub fn add_to_history_at(&mut self, created_at: DateTime<Utc>) -> Result<TradeEntry, CoreError> {
        let input = self.current_input();
        let result = self.calculator.calculate(&input);
        let entry = HistoryEntry::new(input, result, created_at);
        self.history.add(entry.clone())?;
        Ok(entry)
    }

    pub fn history(&self) -> &HistoryStore<TradeEntry> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore<TradeEntry> {
        &mut self.history
    }

    /// Delete the entry at `index`; `false` when there is no such row.
    pub fn remove_history(&mut self, index: usize) -> Result<bool, CoreError> {
        self.history.remove(index)
    }

    /// [`remove_history`](Self::remove_history) for an index still in text form.
    pub fn remove_history_raw(&mut self, raw: &str) -> Result<bool, CoreError> {
        self.history.remove_raw(raw)
    }

    pub fn clear_history(&mut self) -> Result<(), CoreError> {
        self.history.clear()
    }

    /// Copy the trade history export to the clipboard, or hand it to
    /// `fallback` when the clipboard refuses it.
    pub async fn copy_history(
        &self,
        clipboard: &dyn Clipboard,
        fallback: &dyn FallbackCopy,
    ) -> CopyOutcome {
        self.history.copy(clipboard, fallback).await
    }
}
