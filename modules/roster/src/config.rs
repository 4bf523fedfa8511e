use serde::Deserialize;

/// Module configuration (`modules.roster` section).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterConfig {
    /// Email boundary for payment receipts. Receipt emails are skipped
    /// with a warning when unset.
    pub mailer: Option<mailer::MailerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailer_section_is_optional() {
        let cfg: RosterConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(cfg.mailer.is_none());
    }

    #[test]
    fn parses_mailer_section() {
        let cfg: RosterConfig = serde_json::from_value(serde_json::json!({
            "mailer": {
                "endpoint": "https://functions.example/send-email",
                "from": "club@example.com"
            }
        }))
        .unwrap();
        let mailer = cfg.mailer.unwrap();
        assert_eq!(mailer.from, "club@example.com");
        assert_eq!(mailer.timeout_sec, 30);
    }
}
