use serde::{Deserialize, Serialize};

/// Identity of the one and only sales-target row.
pub const CURRENT_TARGET_ID: &str = "current";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTarget {
    pub id: String,
    pub monthly_target: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetUpdate {
    pub monthly_target: f64,
}
