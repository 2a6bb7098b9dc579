use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    dto::lookups::{CreateCustomerRequest, CreateManufacturerRequest},
    error::AppResult,
    extract::JsonBody,
    models::{Customer, Manufacturer},
    response::ApiResponse,
    services::lookup_service,
    state::AppState,
};

pub fn manufacturers_router() -> Router<AppState> {
    Router::new().route("/", get(list_manufacturers).post(create_manufacturer))
}

pub fn customers_router() -> Router<AppState> {
    Router::new().route("/", get(list_customers).post(create_customer))
}

#[utoipa::path(
    get,
    path = "/api/manufacturers",
    responses(
        (status = 200, description = "List manufacturers", body = ApiResponse<Vec<Manufacturer>>)
    ),
    tag = "Lookups"
)]
pub async fn list_manufacturers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Manufacturer>>>> {
    let resp = lookup_service::list_manufacturers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/manufacturers",
    request_body = CreateManufacturerRequest,
    responses(
        (status = 201, description = "Create manufacturer", body = ApiResponse<Manufacturer>),
        (status = 409, description = "Name already taken"),
    ),
    tag = "Lookups"
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateManufacturerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Manufacturer>>)> {
    let name = payload.validate()?;
    let resp = lookup_service::create_manufacturer(&state, name).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "List customers", body = ApiResponse<Vec<Customer>>)
    ),
    tag = "Lookups"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Customer>>>> {
    let resp = lookup_service::list_customers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Create customer", body = ApiResponse<Customer>)
    ),
    tag = "Lookups"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateCustomerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Customer>>)> {
    let name = payload.validate()?;
    let resp = lookup_service::create_customer(&state, name).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
