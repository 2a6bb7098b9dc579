use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CountSummary {
    pub count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventorySummary {
    /// Number of inventory records (batches).
    pub count: u64,
    /// Units on hand across every batch.
    pub units: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesTotal {
    pub total: f64,
}
