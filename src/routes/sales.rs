use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::sales::CreateSaleRequest,
    error::AppResult,
    extract::{JsonBody, PathParam, QueryParams},
    models::Sale,
    response::ApiResponse,
    routes::params::SearchQuery,
    services::sale_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/{id}", get(get_sale).delete(delete_sale))
}

#[utoipa::path(
    get,
    path = "/api/sales",
    params(SearchQuery),
    responses(
        (status = 200, description = "List sales", body = ApiResponse<Vec<Sale>>)
    ),
    tag = "Sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<Sale>>>> {
    let resp = sale_service::list_sales(&state, query.q.as_deref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    params(
        ("id" = i32, Path, description = "Sale ID")
    ),
    responses(
        (status = 200, description = "Get sale", body = ApiResponse<Sale>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn get_sale(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<Sale>>> {
    let resp = sale_service::get_sale(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Record sale", body = ApiResponse<Sale>),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "Sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateSaleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Sale>>)> {
    let sale = payload.validate()?;
    let resp = sale_service::create_sale(&state, sale).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    params(
        ("id" = i32, Path, description = "Sale ID")
    ),
    responses(
        (status = 200, description = "Deleted sale"),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn delete_sale(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    let resp = sale_service::delete_sale(&state, id).await?;
    Ok(Json(resp))
}
