use crate::errors::AppResult;
use crate::store::{Direction, Query, RowStore, Table, fetch, insert_one};
use chrono::Local;
use log::warn;
use serde::{Deserialize, Serialize};

/// One row of the internal `audit_log` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: String,
    pub operation: String,
    #[serde(default)]
    pub target: String,
    pub message: String,
}

/// Append an audit line. Failures are logged and swallowed: the audit
/// trail must never block the mutation it describes.
pub fn record(store: &impl RowStore, operation: &str, target: &str, message: &str) {
    let entry = AuditEntry {
        id: None,
        date: Local::now().to_rfc3339(),
        operation: operation.to_string(),
        target: target.to_string(),
        message: message.to_string(),
    };

    if let Err(e) = insert_one(store, Table::AuditLog, &entry) {
        warn!(
            "event=audit_write_failed operation={} target={} error={}",
            operation, target, e
        );
    }
}

pub fn load_all(store: &impl RowStore) -> AppResult<Vec<AuditEntry>> {
    fetch(
        store,
        Table::AuditLog,
        &Query::new().order_by("id", Direction::Asc),
    )
}
