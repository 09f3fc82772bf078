use async_trait::async_trait;
use lotcalc_core::clipboard::{Clipboard, FallbackCopy};
use lotcalc_core::errors::CoreError;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Clipboard commands tried in order; the first one that runs wins.
#[cfg(target_os = "macos")]
const COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Writes to the desktop clipboard through the platform's copy command.
pub struct SystemClipboard;

impl SystemClipboard {
    async fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<(), CoreError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CoreError::Clipboard(format!("{program}: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| CoreError::Clipboard(format!("{program}: {e}")))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| CoreError::Clipboard(format!("{program}: {e}")))?;
        if status.success() {
            Ok(())
        } else {
            Err(CoreError::Clipboard(format!("{program} exited with {status}")))
        }
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), CoreError> {
        let mut last_err = CoreError::Clipboard("no clipboard command configured".into());
        for (program, args) in COMMANDS {
            match Self::pipe_to(program, args, text).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    log::debug!("clipboard command failed: {e}");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}

/// Prints the text so the user can copy it from the terminal.
pub struct StdoutFallback;

impl FallbackCopy for StdoutFallback {
    fn copy_text(&self, text: &str) -> Result<(), CoreError> {
        println!("{text}");
        Ok(())
    }
}
