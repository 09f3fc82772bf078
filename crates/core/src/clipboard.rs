use async_trait::async_trait;
use log::{debug, warn};

use crate::errors::CoreError;

/// Asynchronous system clipboard (write only).
///
/// Front-ends plug in the platform API here; the core never reads the
/// clipboard back.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), CoreError>;
}

/// Synchronous copy path used when the clipboard API is missing or rejects
/// the write (in a browser: select a temporary off-screen text field and
/// issue a copy command).
pub trait FallbackCopy {
    fn copy_text(&self, text: &str) -> Result<(), CoreError>;
}

/// How an export reached the user. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Nothing to copy (empty history).
    Nothing,
    Clipboard,
    Fallback,
    /// Both paths failed; the failure is logged and otherwise swallowed.
    Failed,
}

/// Write `text` to the clipboard, falling back to the synchronous path.
pub async fn copy_with_fallback(
    clipboard: &dyn Clipboard,
    fallback: &dyn FallbackCopy,
    text: &str,
) -> CopyOutcome {
    match clipboard.write_text(text).await {
        Ok(()) => {
            debug!("copied {} bytes to clipboard", text.len());
            CopyOutcome::Clipboard
        }
        Err(e) => {
            debug!("clipboard write rejected ({e}), using fallback copy");
            match fallback.copy_text(text) {
                Ok(()) => CopyOutcome::Fallback,
                Err(e) => {
                    warn!("fallback copy failed: {e}");
                    CopyOutcome::Failed
                }
            }
        }
    }
}
