// ── Clipboard seam ──

use crate::error::CoreError;

/// Destination for copied text. The terminal build writes through OSC 52;
/// tests substitute an in-memory sink.
pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<(), CoreError>;
}
