use thiserror::Error;

/// Unified error type for the lotcalc-core library.
///
/// Only the plumbing can fail: storage writes, JSON encoding and the
/// clipboard. Input parsing and history loading are total and never
/// produce a `CoreError`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Clipboard ───────────────────────────────────────────────────
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
