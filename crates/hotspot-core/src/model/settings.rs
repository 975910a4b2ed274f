// ── System settings domain types ──

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettings {
    pub system_name: String,
    pub timezone: String,
    pub auto_refresh: bool,
    pub show_offline_routers: bool,
    pub auto_delete_expired: bool,
    pub archive_logs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSettings {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

/// A named alert the administrator can opt in or out of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRule {
    pub title: String,
    pub description: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettings {
    pub two_factor: bool,
    pub session_timeout: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub general: GeneralSettings,
    pub account: AccountSettings,
    pub notifications: Vec<NotificationRule>,
    pub security: SecuritySettings,
}

impl SystemSettings {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.general.system_name.trim().is_empty() {
            return Err(CoreError::validation("system name", "cannot be empty"));
        }
        let email = self.account.email.trim();
        if !email.contains('@') {
            return Err(CoreError::validation(
                "email",
                format!("'{email}' is not an email address"),
            ));
        }
        Ok(())
    }
}
