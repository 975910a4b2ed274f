// ── Copy-to-clipboard feedback ──
//
// A single transient "copied" marker keyed by entity id. Each successful
// copy bumps a generation; the clear timer carries that generation and
// only clears the marker it was scheduled for.

use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::error::CoreError;
use crate::model::EntityId;

#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    marker: Option<(EntityId, u64)>,
    generation: u64,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `code` to the clipboard and mark `id` as copied. Returns the
    /// generation the expiry timer must present. A clipboard failure
    /// leaves the marker untouched.
    pub fn copy(
        &mut self,
        clipboard: &mut dyn Clipboard,
        code: &str,
        id: &EntityId,
    ) -> Result<u64, CoreError> {
        if let Err(e) = clipboard.write(code) {
            warn!(error = %e, "clipboard write failed");
            return Err(e);
        }
        Ok(self.mark(id.clone()))
    }

    /// Set the marker without touching the clipboard.
    pub fn mark(&mut self, id: EntityId) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        debug!(id = %id, generation = self.generation, "copy marker set");
        self.marker = Some((id, self.generation));
        self.generation
    }

    /// Clear the marker if it is still the one stamped with `generation`.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.marker {
            Some((_, current)) if *current == generation => {
                self.marker = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_copied(&self, id: &EntityId) -> bool {
        self.marker.as_ref().is_some_and(|(marked, _)| marked == id)
    }

    pub fn copied_id(&self) -> Option<&EntityId> {
        self.marker.as_ref().map(|(id, _)| id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Option<String>,
        fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write(&mut self, text: &str) -> Result<(), CoreError> {
            if self.fail {
                return Err(CoreError::Clipboard {
                    message: "terminal refused".into(),
                });
            }
            self.contents = Some(text.to_owned());
            Ok(())
        }
    }

    #[test]
    fn copy_writes_clipboard_and_sets_marker() {
        let mut clipboard = MemoryClipboard::default();
        let mut feedback = CopyFeedback::new();
        let id = EntityId::from("1");

        let generation = feedback.copy(&mut clipboard, "HSP-AXBQ-2847", &id).unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some("HSP-AXBQ-2847"));
        assert!(feedback.is_copied(&id));

        assert!(feedback.expire(generation));
        assert!(!feedback.is_copied(&id));
    }

    #[test]
    fn stale_expiry_does_not_clear_newer_marker() {
        let mut clipboard = MemoryClipboard::default();
        let mut feedback = CopyFeedback::new();
        let first = EntityId::from("1");
        let second = EntityId::from("2");

        let g1 = feedback.copy(&mut clipboard, "A", &first).unwrap();
        let g2 = feedback.copy(&mut clipboard, "B", &second).unwrap();

        assert!(!feedback.expire(g1));
        assert!(feedback.is_copied(&second));
        assert!(!feedback.is_copied(&first));
        assert!(feedback.expire(g2));
        assert_eq!(feedback.copied_id(), None);
    }

    #[test]
    fn recopying_same_id_invalidates_old_timer() {
        let mut feedback = CopyFeedback::new();
        let id = EntityId::from("3");
        let g1 = feedback.mark(id.clone());
        let g2 = feedback.mark(id.clone());
        assert!(!feedback.expire(g1));
        assert!(feedback.is_copied(&id));
        assert!(feedback.expire(g2));
    }

    #[test]
    fn clipboard_failure_sets_no_marker() {
        let mut clipboard = MemoryClipboard {
            fail: true,
            ..MemoryClipboard::default()
        };
        let mut feedback = CopyFeedback::new();
        let id = EntityId::from("1");

        let err = feedback.copy(&mut clipboard, "A", &id).unwrap_err();
        assert!(matches!(err, CoreError::Clipboard { .. }));
        assert!(!feedback.is_copied(&id));
    }
}
