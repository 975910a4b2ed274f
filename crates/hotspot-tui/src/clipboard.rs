//! Clipboard writes through the terminal's OSC 52 escape sequence.
//!
//! Works over SSH and inside multiplexers that pass OSC 52 through; there
//! is no way to confirm the terminal honored it, so "no I/O error" is the
//! only success signal available.

use std::io::stdout;

use crossterm::ExecutableCommand;
use crossterm::clipboard::CopyToClipboard;
use tracing::debug;

use hotspot_core::{Clipboard, CoreError};

#[derive(Debug, Clone, Copy, Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write(&mut self, text: &str) -> Result<(), CoreError> {
        stdout()
            .execute(CopyToClipboard::to_clipboard_from(text))
            .map_err(|e| CoreError::Clipboard {
                message: e.to_string(),
            })?;
        debug!(bytes = text.len(), "wrote clipboard via OSC 52");
        Ok(())
    }
}
