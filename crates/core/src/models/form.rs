use std::marker::PhantomData;

/// How the raw text of a field is turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberMode {
    /// `Rp 5.000`-style text; every non-digit is ignored.
    Currency,
    /// Plain numeric text such as `10` or `0.15`.
    Plain,
}

/// A named input field of a calculator form.
pub trait FormField: Copy + Eq + std::fmt::Debug + 'static {
    /// Every field of the form, in display order.
    const ALL: &'static [Self];

    fn index(self) -> usize;

    fn mode(self) -> NumberMode;

    /// Stable identifier (matches the browser form's element ids).
    fn name(self) -> &'static str;
}

/// Fields of the average-down form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AverageDownField {
    InitialPrice,
    InitialLot,
    InitialFee,
    NextPrice,
    NextLot,
    NextFee,
}

impl AverageDownField {
    /// Fee fields are the ones the auto-fill assistant may rewrite.
    #[must_use]
    pub fn is_fee(self) -> bool {
        matches!(self, AverageDownField::InitialFee | AverageDownField::NextFee)
    }
}

impl FormField for AverageDownField {
    const ALL: &'static [Self] = &[
        AverageDownField::InitialPrice,
        AverageDownField::InitialLot,
        AverageDownField::InitialFee,
        AverageDownField::NextPrice,
        AverageDownField::NextLot,
        AverageDownField::NextFee,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn mode(self) -> NumberMode {
        match self {
            AverageDownField::InitialLot | AverageDownField::NextLot => NumberMode::Plain,
            _ => NumberMode::Currency,
        }
    }

    fn name(self) -> &'static str {
        match self {
            AverageDownField::InitialPrice => "initialPrice",
            AverageDownField::InitialLot => "initialLot",
            AverageDownField::InitialFee => "initialFee",
            AverageDownField::NextPrice => "nextPrice",
            AverageDownField::NextLot => "nextLot",
            AverageDownField::NextFee => "nextFee",
        }
    }
}

/// Fields of the buy/sell profit form. Fees are percentages, not amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeField {
    BuyPrice,
    SellPrice,
    Lot,
    BuyFee,
    SellFee,
}

impl FormField for TradeField {
    const ALL: &'static [Self] = &[
        TradeField::BuyPrice,
        TradeField::SellPrice,
        TradeField::Lot,
        TradeField::BuyFee,
        TradeField::SellFee,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn mode(self) -> NumberMode {
        match self {
            TradeField::BuyPrice | TradeField::SellPrice => NumberMode::Currency,
            _ => NumberMode::Plain,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TradeField::BuyPrice => "buyPrice",
            TradeField::SellPrice => "sellPrice",
            TradeField::Lot => "lot",
            TradeField::BuyFee => "buyFee",
            TradeField::SellFee => "sellFee",
        }
    }
}

/// Current display text of every field of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Form<F: FormField> {
    values: Vec<String>,
    _fields: PhantomData<F>,
}

impl<F: FormField> Default for Form<F> {
    fn default() -> Self {
        Self {
            values: vec![String::new(); F::ALL.len()],
            _fields: PhantomData,
        }
    }
}

impl<F: FormField> Form<F> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self, field: F) -> &str {
        &self.values[field.index()]
    }

    pub fn set_text(&mut self, field: F, text: impl Into<String>) {
        self.values[field.index()] = text.into();
    }

    pub fn clear(&mut self, field: F) {
        self.values[field.index()].clear();
    }

    #[must_use]
    pub fn is_empty(&self, field: F) -> bool {
        self.values[field.index()].is_empty()
    }
}

/// Per-fee-field flag: set once the user types into the field,
/// cleared when the field is emptied. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualOverride(bool);

impl ManualOverride {
    #[must_use]
    pub fn is_set(self) -> bool {
        self.0
    }

    /// Track a direct edit of the fee field.
    pub fn on_input(&mut self, text: &str) {
        self.0 = !text.is_empty();
    }

    pub fn reset(&mut self) {
        self.0 = false;
    }
}
