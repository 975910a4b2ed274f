// ── Cancellable delayed messages ──
//
// Every timer in the UI is a `ScheduledTask`: one message, sent once after
// a delay, unless the owner cancels it or drops the handle first.
// Replacing a stored handle therefore cancels the timer it held.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::trace;

#[derive(Debug)]
#[must_use = "dropping a ScheduledTask cancels it"]
pub struct ScheduledTask {
    cancel: CancellationToken,
}

impl ScheduledTask {
    /// Send `message` on `tx` after `delay`. Must be called from within a
    /// tokio runtime.
    pub fn after<T>(delay: Duration, tx: UnboundedSender<T>, message: T) -> Self
    where
        T: Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    trace!("scheduled task cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    // The receiver may already be gone during shutdown.
                    let _ = tx.send(message);
                }
            }
        });
        Self { cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
