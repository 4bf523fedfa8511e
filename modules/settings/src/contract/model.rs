use serde::{Deserialize, Serialize};

/// Per-user application settings.
///
/// Every field, nested ones included, carries a serde default. A persisted
/// blob from an older version that lacks a field deserializes with that
/// field defaulted while all present fields are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub email: EmailSettings,
    pub theme: Theme,
    pub language: Language,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            email: EmailSettings::default(),
            theme: Theme::System,
            language: Language::Es,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailSettings {
    pub enabled: bool,
    pub notifications: EmailNotifications,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            notifications: EmailNotifications::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailNotifications {
    pub payments: bool,
    pub reminders: bool,
    pub monthly_report: bool,
}

impl Default for EmailNotifications {
    fn default() -> Self {
        Self {
            payments: true,
            reminders: true,
            monthly_report: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
    Val,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let s = UserSettings::default();
        assert!(s.email.enabled);
        assert!(s.email.notifications.payments);
        assert!(s.email.notifications.reminders);
        assert!(s.email.notifications.monthly_report);
        assert_eq!(s.theme, Theme::System);
        assert_eq!(s.language, Language::Es);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = serde_json::to_value(UserSettings::default()).unwrap();
        assert_eq!(json["email"]["notifications"]["monthlyReport"], true);
        assert_eq!(json["theme"], "system");
        assert_eq!(json["language"], "es");
    }

    #[test]
    fn missing_nested_field_is_backfilled_with_its_default() {
        // Blob written before `reminders` existed; present fields must win.
        let blob = serde_json::json!({
            "email": {
                "enabled": false,
                "notifications": { "payments": false, "monthlyReport": false }
            },
            "theme": "dark"
        });
        let s: UserSettings = serde_json::from_value(blob).unwrap();
        assert!(!s.email.enabled);
        assert!(!s.email.notifications.payments);
        assert!(s.email.notifications.reminders);
        assert!(!s.email.notifications.monthly_report);
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.language, Language::Es);
    }
}
