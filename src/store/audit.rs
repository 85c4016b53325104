use chrono::Local;
use serde::{Deserialize, Serialize};

/// One line of the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

impl AuditEntry {
    /// New entry stamped with the local time in ISO 8601.
    pub fn now(operation: &str, target: &str, message: &str) -> Self {
        Self {
            date: Local::now().to_rfc3339(),
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        }
    }
}
