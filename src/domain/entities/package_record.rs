use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted label event, owned by the remote store and read-only here.
///
/// `package_code` is the internal normalized identifier; `label_package_code`
/// is what the operator actually typed, kept separately so the two may differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub id: String,
    pub apartment: String,
    pub package_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_package_code: Option<String>,
    pub arrived_at: DateTime<Utc>,
    pub created_by: String,
}

impl PackageRecord {
    /// The operator-facing code: the label override when present, otherwise
    /// the internal one.
    pub fn display_code(&self) -> &str {
        self.label_package_code
            .as_deref()
            .unwrap_or(&self.package_code)
    }
}

/// Payload for registering a freshly captured label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabelRecord {
    pub package_code: String,
    pub apartment: String,
}
