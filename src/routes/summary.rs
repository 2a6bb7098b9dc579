use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::summary::{CountSummary, InventorySummary, SalesTotal},
    error::AppResult,
    response::ApiResponse,
    services::summary_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products-count", get(products_count))
        .route("/inventory-count", get(inventory_count))
        .route("/sales-today", get(sales_today))
}

#[utoipa::path(
    get,
    path = "/api/summary/products-count",
    responses(
        (status = 200, description = "Number of products", body = ApiResponse<CountSummary>)
    ),
    tag = "Summary"
)]
pub async fn products_count(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CountSummary>>> {
    Ok(Json(summary_service::products_count(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/summary/inventory-count",
    responses(
        (
            status = 200,
            description = "Inventory batches and units on hand",
            body = ApiResponse<InventorySummary>
        )
    ),
    tag = "Summary"
)]
pub async fn inventory_count(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<InventorySummary>>> {
    Ok(Json(summary_service::inventory_count(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/summary/sales-today",
    responses(
        (status = 200, description = "Today's sales total", body = ApiResponse<SalesTotal>)
    ),
    tag = "Summary"
)]
pub async fn sales_today(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SalesTotal>>> {
    Ok(Json(summary_service::sales_today_total(&state).await?))
}
