use chrono::Utc;

use crate::{
    dto::summary::{CountSummary, InventorySummary, SalesTotal},
    error::AppResult,
    response::ApiResponse,
    services::{inventory_service, product_service, sale_service},
    state::AppState,
};

pub async fn products_count(state: &AppState) -> AppResult<ApiResponse<CountSummary>> {
    let count = product_service::count_products(state).await?;
    Ok(ApiResponse::success("Product count", CountSummary { count }))
}

pub async fn inventory_count(state: &AppState) -> AppResult<ApiResponse<InventorySummary>> {
    let (count, units) = inventory_service::inventory_totals(state).await?;
    Ok(ApiResponse::success(
        "Inventory count",
        InventorySummary { count, units },
    ))
}

/// Revenue recorded for the current UTC date.
pub async fn sales_today_total(state: &AppState) -> AppResult<ApiResponse<SalesTotal>> {
    let today = Utc::now().date_naive();
    let total = sale_service::total_for_day(state, today).await?;
    Ok(ApiResponse::success("Sales total for today", SalesTotal { total }))
}
