// ── Settings editor ──
//
// Same draft/commit shape as the template editor: edits land in a draft,
// `save()` validates and commits, `revert()` throws the draft away.

use tracing::debug;

use crate::error::CoreError;
use crate::model::SystemSettings;

/// Free-text settings fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsText {
    SystemName,
    Timezone,
    FullName,
    Email,
    Phone,
    Role,
}

impl SettingsText {
    pub fn label(self) -> &'static str {
        match self {
            Self::SystemName => "System Name",
            Self::Timezone => "Timezone",
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Role => "Role",
        }
    }
}

/// On/off settings. Notification rules are addressed by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsFlag {
    AutoRefresh,
    ShowOfflineRouters,
    AutoDeleteExpired,
    ArchiveLogs,
    Notification(usize),
    TwoFactor,
    SessionTimeout,
}

#[derive(Debug, Clone)]
pub struct SettingsEditor {
    committed: SystemSettings,
    draft: SystemSettings,
}

impl SettingsEditor {
    pub fn new(settings: SystemSettings) -> Self {
        Self {
            draft: settings.clone(),
            committed: settings,
        }
    }

    pub fn committed(&self) -> &SystemSettings {
        &self.committed
    }

    pub fn draft(&self) -> &SystemSettings {
        &self.draft
    }

    pub fn text(&self, field: SettingsText) -> &str {
        let d = &self.draft;
        match field {
            SettingsText::SystemName => &d.general.system_name,
            SettingsText::Timezone => &d.general.timezone,
            SettingsText::FullName => &d.account.full_name,
            SettingsText::Email => &d.account.email,
            SettingsText::Phone => &d.account.phone,
            SettingsText::Role => &d.account.role,
        }
    }

    pub fn set_text(&mut self, field: SettingsText, value: String) {
        let d = &mut self.draft;
        let slot = match field {
            SettingsText::SystemName => &mut d.general.system_name,
            SettingsText::Timezone => &mut d.general.timezone,
            SettingsText::FullName => &mut d.account.full_name,
            SettingsText::Email => &mut d.account.email,
            SettingsText::Phone => &mut d.account.phone,
            SettingsText::Role => &mut d.account.role,
        };
        *slot = value;
    }

    /// Current draft value of a flag. `None` for an out-of-range
    /// notification index.
    pub fn flag(&self, flag: SettingsFlag) -> Option<bool> {
        let d = &self.draft;
        match flag {
            SettingsFlag::AutoRefresh => Some(d.general.auto_refresh),
            SettingsFlag::ShowOfflineRouters => Some(d.general.show_offline_routers),
            SettingsFlag::AutoDeleteExpired => Some(d.general.auto_delete_expired),
            SettingsFlag::ArchiveLogs => Some(d.general.archive_logs),
            SettingsFlag::Notification(i) => d.notifications.get(i).map(|n| n.enabled),
            SettingsFlag::TwoFactor => Some(d.security.two_factor),
            SettingsFlag::SessionTimeout => Some(d.security.session_timeout),
        }
    }

    /// Flip a flag in the draft, returning its new value.
    pub fn toggle(&mut self, flag: SettingsFlag) -> Option<bool> {
        let d = &mut self.draft;
        let slot = match flag {
            SettingsFlag::AutoRefresh => &mut d.general.auto_refresh,
            SettingsFlag::ShowOfflineRouters => &mut d.general.show_offline_routers,
            SettingsFlag::AutoDeleteExpired => &mut d.general.auto_delete_expired,
            SettingsFlag::ArchiveLogs => &mut d.general.archive_logs,
            SettingsFlag::Notification(i) => &mut d.notifications.get_mut(i)?.enabled,
            SettingsFlag::TwoFactor => &mut d.security.two_factor,
            SettingsFlag::SessionTimeout => &mut d.security.session_timeout,
        };
        *slot = !*slot;
        Some(*slot)
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.committed
    }

    /// Validate and commit the draft.
    pub fn save(&mut self) -> Result<&SystemSettings, CoreError> {
        self.draft.validate()?;
        self.committed = self.draft.clone();
        debug!("settings saved");
        Ok(&self.committed)
    }

    pub fn revert(&mut self) {
        self.draft = self.committed.clone();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed::Seed;

    fn editor() -> SettingsEditor {
        SettingsEditor::new(Seed::builtin().settings)
    }

    #[test]
    fn edits_stay_in_draft_until_saved() {
        let mut editor = editor();
        editor.set_text(SettingsText::SystemName, "Airport Hotspots".into());
        assert!(editor.is_dirty());
        assert_eq!(editor.committed().general.system_name, "HotSpot Pro");

        editor.save().unwrap();
        assert!(!editor.is_dirty());
        assert_eq!(editor.committed().general.system_name, "Airport Hotspots");
    }

    #[test]
    fn toggles_flip_flags() {
        let mut editor = editor();
        assert_eq!(editor.flag(SettingsFlag::TwoFactor), Some(false));
        assert_eq!(editor.toggle(SettingsFlag::TwoFactor), Some(true));
        assert_eq!(editor.toggle(SettingsFlag::Notification(4)), Some(true));
        assert_eq!(editor.toggle(SettingsFlag::Notification(99)), None);
    }

    #[test]
    fn invalid_email_is_rejected_and_nothing_commits() {
        let mut editor = editor();
        editor.set_text(SettingsText::Email, "admin.example.com".into());
        let err = editor.save().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "email", .. }));
        assert_eq!(editor.committed(), &Seed::builtin().settings);
    }

    #[test]
    fn blank_system_name_is_rejected() {
        let mut editor = editor();
        editor.set_text(SettingsText::SystemName, "  ".into());
        assert!(matches!(
            editor.save(),
            Err(CoreError::Validation { field: "system name", .. })
        ));
    }

    #[test]
    fn revert_discards_draft() {
        let mut editor = editor();
        editor.toggle(SettingsFlag::ArchiveLogs);
        editor.revert();
        assert!(!editor.is_dirty());
    }
}
