//! All possible UI actions. Actions are the sole mechanism for state mutation.

use hotspot_core::{CoreError, PanelId};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification: a bold title and an optional detail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub detail: Option<String>,
    pub level: NotificationLevel,
}

impl Notification {
    fn new(level: NotificationLevel, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: None,
            level,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title)
    }

    /// Attach a second line of text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Surface a core error. Unwired features are a warning, not a failure.
    pub fn from_error(title: impl Into<String>, err: &CoreError) -> Self {
        let base = match err {
            CoreError::Unsupported { .. } => Self::warning(title),
            CoreError::NotFound { .. }
            | CoreError::Validation { .. }
            | CoreError::Clipboard { .. } => Self::error(title),
        };
        base.with_detail(err.to_string())
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchPanel(PanelId),
    GoBack,
    ToggleSidebar,

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Input ─────────────────────────────────────────────────────
    Paste(String),

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,

    // ── Scheduled completions ─────────────────────────────────────
    CopyFeedbackExpired { generation: u64 },
    RebootComplete { generation: u64 },
}

impl Action {
    /// Actions fired by timers. These reach every panel, because the panel
    /// that scheduled them may no longer be the active one.
    pub fn is_scheduled(&self) -> bool {
        matches!(
            self,
            Self::CopyFeedbackExpired { .. } | Self::RebootComplete { .. }
        )
    }
}
