use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::inventory::{CreateInventoryRequest, UpdateInventoryRequest},
    error::AppResult,
    extract::{JsonBody, PathParam, QueryParams},
    models::InventoryItem,
    response::ApiResponse,
    routes::params::SearchQuery,
    services::inventory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory_item))
        .route(
            "/{id}",
            get(get_inventory_item)
                .put(update_inventory_item)
                .delete(delete_inventory_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    params(SearchQuery),
    responses(
        (
            status = 200,
            description = "List inventory batches",
            body = ApiResponse<Vec<InventoryItem>>
        )
    ),
    tag = "Inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<InventoryItem>>>> {
    let resp = inventory_service::list_inventory(&state, query.q.as_deref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Inventory ID")
    ),
    responses(
        (status = 200, description = "Get inventory item", body = ApiResponse<InventoryItem>),
        (status = 404, description = "Inventory item not found"),
    ),
    tag = "Inventory"
)]
pub async fn get_inventory_item(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    let resp = inventory_service::get_inventory_item(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = CreateInventoryRequest,
    responses(
        (status = 201, description = "Create inventory item", body = ApiResponse<InventoryItem>),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "Inventory"
)]
pub async fn create_inventory_item(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateInventoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<InventoryItem>>)> {
    let item = payload.validate()?;
    let resp = inventory_service::create_inventory_item(&state, item).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Inventory ID")
    ),
    request_body = UpdateInventoryRequest,
    responses(
        (status = 200, description = "Updated inventory item", body = ApiResponse<InventoryItem>),
        (status = 400, description = "No fields or invalid fields"),
        (status = 404, description = "Inventory item not found"),
    ),
    tag = "Inventory"
)]
pub async fn update_inventory_item(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<UpdateInventoryRequest>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    let changes = payload.validate()?;
    let resp = inventory_service::update_inventory_item(&state, id, changes).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Inventory ID")
    ),
    responses(
        (status = 200, description = "Deleted inventory item"),
        (status = 404, description = "Inventory item not found"),
    ),
    tag = "Inventory"
)]
pub async fn delete_inventory_item(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    let resp = inventory_service::delete_inventory_item(&state, id).await?;
    Ok(Json(resp))
}
