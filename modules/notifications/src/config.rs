use serde::Deserialize;
use uuid::Uuid;

/// Module configuration (`modules.notifications` section).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Recipient of scanner-generated payment-due notifications. The
    /// scanner stays idle when unset.
    pub admin_user_id: Option<Uuid>,

    /// Hours between scanner wake-ups.
    #[serde(default = "default_scan_interval_hours")]
    pub scan_interval_hours: u64,
}

fn default_scan_interval_hours() -> u64 {
    24
}
